//! In-memory stand-ins for the filesystem and process seams
//!
//! Used by unit tests here and by the integration tests crate.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use contracts::SpawnRequest;

use crate::sdk::DirectoryLister;
use crate::spawner::ProcessSpawner;

#[derive(Debug, Clone, Copy)]
enum Listing {
    Empty,
    Populated,
    Fails(io::ErrorKind),
}

/// Scripted `DirectoryLister` that records every directory it is asked about.
///
/// Unscripted paths behave as absent (`NotFound`).
#[derive(Debug, Default)]
pub struct MockDirectoryLister {
    entries: HashMap<PathBuf, Listing>,
    calls: RefCell<Vec<PathBuf>>,
}

impl MockDirectoryLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory exists with no children
    pub fn empty(mut self, dir: impl Into<PathBuf>) -> Self {
        self.entries.insert(dir.into(), Listing::Empty);
        self
    }

    /// Directory exists with at least one child
    pub fn populated(mut self, dir: impl Into<PathBuf>) -> Self {
        self.entries.insert(dir.into(), Listing::Populated);
        self
    }

    /// Listing fails with `kind`
    pub fn failing(mut self, dir: impl Into<PathBuf>, kind: io::ErrorKind) -> Self {
        self.entries.insert(dir.into(), Listing::Fails(kind));
        self
    }

    /// Directories listed so far, in order
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl DirectoryLister for MockDirectoryLister {
    fn has_entries(&self, dir: &Path) -> io::Result<bool> {
        self.calls.borrow_mut().push(dir.to_path_buf());
        match self.entries.get(dir) {
            Some(Listing::Empty) => Ok(false),
            Some(Listing::Populated) => Ok(true),
            Some(Listing::Fails(kind)) => Err(io::Error::new(*kind, "simulated listing failure")),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}

/// `ProcessSpawner` that records requests instead of creating processes
#[derive(Debug, Default)]
pub struct RecordingSpawner {
    fail_with: Option<io::ErrorKind>,
    requests: RefCell<Vec<SpawnRequest>>,
}

impl RecordingSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every spawn fails with `kind`
    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            fail_with: Some(kind),
            requests: RefCell::default(),
        }
    }

    pub fn requests(&self) -> Vec<SpawnRequest> {
        self.requests.borrow().clone()
    }
}

impl ProcessSpawner for RecordingSpawner {
    fn spawn(&self, request: &SpawnRequest) -> io::Result<u32> {
        self.requests.borrow_mut().push(request.clone());
        match self.fail_with {
            Some(kind) => Err(io::Error::new(kind, "simulated spawn failure")),
            None => Ok(4242),
        }
    }
}
