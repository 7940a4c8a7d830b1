//! # Dispatcher
//!
//! Services-version dispatch.
//!
//! Responsibilities:
//! - Map a services version to its SDK candidates, binary and prefix
//! - Pick the highest-priority SDK that is actually populated
//! - Build `PATH` / `LD_LIBRARY_PATH` / `XDG_DATA_DIRS`
//! - Spawn the versioned binary without waiting on it, so it inherits
//!   (and keeps serving) every fd this process was started with

pub mod dispatcher;
pub mod error;
pub mod mock;
pub mod paths;
pub mod sdk;
pub mod spawner;

pub use contracts::{DispatchTable, PathSet, SpawnRequest, VersionMapping};
pub use dispatcher::{create_dispatcher, dispatch, Dispatcher, SpawnedService};
pub use error::DispatcherError;
pub use mock::{MockDirectoryLister, RecordingSpawner};
pub use paths::{create_paths_for_prefixes, ServicePaths};
pub use sdk::{find_sdk_with_highest_priority, DirectoryLister, FsDirectoryLister};
pub use spawner::{CommandSpawner, ProcessSpawner};
