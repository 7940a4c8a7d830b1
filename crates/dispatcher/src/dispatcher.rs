//! Dispatcher - version lookup, SDK resolution, path building and spawn

use serde::Serialize;
use tracing::{info, instrument};

use contracts::{DispatchTable, SpawnRequest};

use crate::error::DispatcherError;
use crate::paths::{check_arch, create_paths_for_prefixes};
use crate::sdk::{find_sdk_with_highest_priority, DirectoryLister, FsDirectoryLister};
use crate::spawner::{CommandSpawner, ProcessSpawner};

/// Result of a successful dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpawnedService {
    /// Process id of the child; it is not waited on
    pub pid: u32,
    pub request: SpawnRequest,
}

/// Dispatches a services version to its versioned binary
///
/// Generic over the filesystem and process seams; `Dispatcher::new` wires up
/// the real ones.
#[derive(Debug)]
pub struct Dispatcher<L = FsDirectoryLister, S = CommandSpawner> {
    table: DispatchTable,
    lister: L,
    spawner: S,
}

impl Dispatcher {
    /// Dispatcher over the real filesystem and `std::process::Command`
    pub fn new(table: DispatchTable) -> Self {
        Self::with_parts(table, FsDirectoryLister, CommandSpawner)
    }
}

impl<L, S> Dispatcher<L, S>
where
    L: DirectoryLister,
    S: ProcessSpawner,
{
    /// Create a dispatcher with custom seams (for testing)
    pub fn with_parts(table: DispatchTable, lister: L, spawner: S) -> Self {
        Self {
            table,
            lister,
            spawner,
        }
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn lister(&self) -> &L {
        &self.lister
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Resolve everything short of spawning.
    ///
    /// # Errors
    /// - `UnknownVersion` before any filesystem access
    /// - `SdkEnumeration` / `NoCandidateSdk` from SDK resolution
    /// - `InvalidArch` if `arch` would escape `{sdk}/lib`
    /// - `Contract` if a search path cannot be rendered
    #[instrument(name = "dispatcher_plan", skip(self))]
    pub fn plan(
        &self,
        services_version: &str,
        arch: Option<&str>,
    ) -> Result<SpawnRequest, DispatcherError> {
        let mapping = self
            .table
            .lookup(services_version)
            .ok_or_else(|| DispatcherError::unknown_version(services_version))?;

        // Fail on a bad arch before touching the filesystem.
        if let Some(arch) = arch.filter(|arch| !arch.is_empty()) {
            check_arch(arch)?;
        }

        let sdk_prefix =
            find_sdk_with_highest_priority(&self.lister, &mapping.sdk_candidates, services_version)?;

        let paths = create_paths_for_prefixes(
            &mapping.binary,
            sdk_prefix,
            &mapping.services_prefix,
            arch,
            &self.table.abi_tag,
        )?;

        Ok(paths.into_spawn_request()?)
    }

    /// Resolve and spawn the binary for `services_version`.
    ///
    /// Returns once the child exists; its exit status is never observed.
    #[instrument(name = "dispatcher_dispatch", skip(self))]
    pub fn dispatch(
        &self,
        services_version: &str,
        arch: Option<&str>,
    ) -> Result<SpawnedService, DispatcherError> {
        let request = self.plan(services_version, arch)?;

        let pid = self
            .spawner
            .spawn(&request)
            .map_err(|source| DispatcherError::Spawn {
                program: request.program.clone(),
                source,
            })?;

        info!(
            pid,
            program = %request.program.display(),
            "Service dispatched"
        );

        Ok(SpawnedService { pid, request })
    }
}

/// Convenience function to create a real dispatcher from a table
pub fn create_dispatcher(table: DispatchTable) -> Dispatcher {
    Dispatcher::new(table)
}

/// Dispatch with the built-in reference table, real filesystem and real
/// process spawning.
pub fn dispatch(
    services_version: &str,
    arch: Option<&str>,
) -> Result<SpawnedService, DispatcherError> {
    create_dispatcher(DispatchTable::reference()).dispatch(services_version, arch)
}
