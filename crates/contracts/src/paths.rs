//! PathSet / SpawnRequest - per-invocation search paths and child launch data

use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::ContractError;

/// Executable search path variable
pub const PATH_VAR: &str = "PATH";
/// Dynamic-library search path variable
pub const LD_LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";
/// Data directories variable
pub const XDG_DATA_DIRS_VAR: &str = "XDG_DATA_DIRS";

/// Ordered search-path lists for one dispatch
///
/// Order is significant and preserved when rendering: service prefix first,
/// SDK prefix second, arch-triple library dir (if any) last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathSet {
    pub executable_paths: Vec<PathBuf>,
    pub ld_library_paths: Vec<PathBuf>,
    pub xdg_data_dirs: Vec<PathBuf>,
}

impl PathSet {
    /// Render `PATH`
    pub fn path_variable(&self) -> Result<String, ContractError> {
        join_search_path(PATH_VAR, &self.executable_paths)
    }

    /// Render `LD_LIBRARY_PATH`
    pub fn ld_library_path_variable(&self) -> Result<String, ContractError> {
        join_search_path(LD_LIBRARY_PATH_VAR, &self.ld_library_paths)
    }

    /// Render `XDG_DATA_DIRS`
    pub fn xdg_data_dirs_variable(&self) -> Result<String, ContractError> {
        join_search_path(XDG_DATA_DIRS_VAR, &self.xdg_data_dirs)
    }
}

/// Colon-join a path list.
///
/// Fails if an entry contains the separator or is not valid UTF-8, since
/// either would corrupt the variable seen by the child.
pub fn join_search_path(variable: &str, paths: &[PathBuf]) -> Result<String, ContractError> {
    let joined = env::join_paths(paths)
        .map_err(|e| ContractError::invalid_search_path(variable, e.to_string()))?;

    joined.into_string().map_err(|raw| {
        ContractError::invalid_search_path(variable, format!("not valid UTF-8: {raw:?}"))
    })
}

/// Everything needed to launch the service binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpawnRequest {
    /// Absolute path of the service binary, also used as argv[0]
    pub program: PathBuf,

    /// Value for `PATH`
    pub path: String,

    /// Value for `LD_LIBRARY_PATH`
    pub ld_library_path: String,

    /// Value for `XDG_DATA_DIRS`
    pub xdg_data_dirs: String,
}

impl SpawnRequest {
    /// Render a `PathSet` into a request for `program`
    pub fn new(program: impl Into<PathBuf>, paths: &PathSet) -> Result<Self, ContractError> {
        Ok(Self {
            program: program.into(),
            path: paths.path_variable()?,
            ld_library_path: paths.ld_library_path_variable()?,
            xdg_data_dirs: paths.xdg_data_dirs_variable()?,
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Variables to overwrite in the child's environment
    pub fn env_vars(&self) -> [(&'static str, &str); 3] {
        [
            (PATH_VAR, self.path.as_str()),
            (LD_LIBRARY_PATH_VAR, self.ld_library_path.as_str()),
            (XDG_DATA_DIRS_VAR, self.xdg_data_dirs.as_str()),
        ]
    }
}
