//! Search-path construction for a resolved SDK / services prefix pair

use std::path::{Path, PathBuf};

use contracts::{ContractError, PathSet, SpawnRequest};

use crate::error::DispatcherError;

/// Target executable plus the search paths it runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePaths {
    pub program: PathBuf,
    pub search: PathSet,
}

impl ServicePaths {
    /// Render the search paths into a `SpawnRequest`
    pub fn into_spawn_request(self) -> Result<SpawnRequest, ContractError> {
        SpawnRequest::new(self.program, &self.search)
    }
}

/// Build the executable, library and data search paths.
///
/// The services prefix always comes first so the service's own `bin`/`lib`/
/// `share` shadow the SDK's. When `arch` is given (and non-empty) the
/// arch-triple library dir `{sdk_prefix}/lib/{arch}-{abi_tag}` is appended
/// last.
///
/// # Errors
/// - `InvalidArch` if `arch` is not a single path component
pub fn create_paths_for_prefixes(
    binary: &str,
    sdk_prefix: &Path,
    services_prefix: &Path,
    arch: Option<&str>,
    abi_tag: &str,
) -> Result<ServicePaths, DispatcherError> {
    let arch = arch.filter(|arch| !arch.is_empty());
    if let Some(arch) = arch {
        check_arch(arch)?;
    }

    let program = services_prefix.join("bin").join(binary);

    let executable_paths = vec![services_prefix.join("bin"), sdk_prefix.join("bin")];

    let mut ld_library_paths = vec![services_prefix.join("lib"), sdk_prefix.join("lib")];
    if let Some(arch) = arch {
        ld_library_paths.push(sdk_prefix.join("lib").join(format!("{arch}-{abi_tag}")));
    }

    let xdg_data_dirs = vec![services_prefix.join("share"), sdk_prefix.join("share")];

    Ok(ServicePaths {
        program,
        search: PathSet {
            executable_paths,
            ld_library_paths,
            xdg_data_dirs,
        },
    })
}

/// The arch triple must stay a single entry under `{sdk_prefix}/lib`.
pub(crate) fn check_arch(arch: &str) -> Result<(), DispatcherError> {
    if arch.contains(['/', ':', '\0']) {
        return Err(DispatcherError::invalid_arch(arch));
    }
    Ok(())
}
