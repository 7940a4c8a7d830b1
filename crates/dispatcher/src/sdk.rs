//! SDK resolution
//!
//! An SDK runtime can be registered (its mount point exists) without being
//! populated, as happens with layered/overlay filesystems. A candidate only
//! counts as installed when it has at least one child entry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::error::DispatcherError;

/// Filesystem seam used by SDK resolution
pub trait DirectoryLister {
    /// Whether `dir` has at least one immediate child.
    ///
    /// A missing directory must surface as `io::ErrorKind::NotFound`.
    fn has_entries(&self, dir: &Path) -> io::Result<bool>;
}

impl<T: DirectoryLister + ?Sized> DirectoryLister for &T {
    fn has_entries(&self, dir: &Path) -> io::Result<bool> {
        (**self).has_entries(dir)
    }
}

/// `DirectoryLister` over the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectoryLister;

impl DirectoryLister for FsDirectoryLister {
    fn has_entries(&self, dir: &Path) -> io::Result<bool> {
        // Only the first entry is read.
        match fs::read_dir(dir)?.next() {
            None => Ok(false),
            Some(entry) => entry.map(|_| true),
        }
    }
}

/// Find the first populated SDK in `candidates` (highest priority first).
///
/// - absent or empty candidates are skipped
/// - any other listing failure aborts; later candidates are not consulted
///
/// # Errors
/// - `SdkEnumeration` for a hard listing failure
/// - `NoCandidateSdk` if nothing qualified
#[instrument(
    name = "find_sdk_with_highest_priority",
    skip(lister, candidates),
    fields(candidates = candidates.len())
)]
pub fn find_sdk_with_highest_priority<'a, L>(
    lister: &L,
    candidates: &'a [PathBuf],
    services_version: &str,
) -> Result<&'a Path, DispatcherError>
where
    L: DirectoryLister + ?Sized,
{
    for candidate in candidates {
        match lister.has_entries(candidate) {
            Ok(true) => {
                info!(sdk = %candidate.display(), "Selected SDK");
                return Ok(candidate.as_path());
            }
            Ok(false) => {
                debug!(sdk = %candidate.display(), "SDK directory is empty, skipping");
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(sdk = %candidate.display(), "SDK directory not found, skipping");
            }
            Err(e) => {
                warn!(sdk = %candidate.display(), error = %e, "Failed to enumerate SDK directory");
                return Err(DispatcherError::SdkEnumeration {
                    path: candidate.clone(),
                    source: e,
                });
            }
        }
    }

    Err(DispatcherError::no_candidate_sdk(services_version))
}
