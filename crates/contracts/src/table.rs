//! DispatchTable - services-version to SDK/binary mapping
//!
//! The table is a configuration constant of the dispatcher. Callers pick a
//! version; they never supply paths.

use serde::Serialize;
use std::path::PathBuf;

/// ABI tag appended to the arch when building the arch-triple library dir
pub const DEFAULT_ABI_TAG: &str = "linux-gnu";

/// Full dispatch table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchTable {
    /// ABI tag for `{arch}-{abi_tag}` library subdirectories
    pub abi_tag: String,

    /// One entry per supported services version
    pub services: Vec<VersionMapping>,
}

/// A single services-version entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionMapping {
    /// Services version string (e.g. "2")
    pub version: String,

    /// Candidate SDK roots, highest priority first
    pub sdk_candidates: Vec<PathBuf>,

    /// File name of the binary under `{services_prefix}/bin`
    pub binary: String,

    /// Installation prefix of this services version
    pub services_prefix: PathBuf,
}

impl VersionMapping {
    pub fn new<I, P>(
        version: impl Into<String>,
        sdk_candidates: I,
        binary: impl Into<String>,
        services_prefix: impl Into<PathBuf>,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            version: version.into(),
            sdk_candidates: sdk_candidates.into_iter().map(Into::into).collect(),
            binary: binary.into(),
            services_prefix: services_prefix.into(),
        }
    }
}

impl DispatchTable {
    /// The built-in table shipped with the dispatcher.
    ///
    /// | version | SDK candidates | binary |
    /// |---|---|---|
    /// | "1" | /app/sdk/1, /app/sdk/0 | eks-search-provider-v1 |
    /// | "2" | /app/sdk/3, /app/sdk/2 | eks-search-provider-v2 |
    /// | "3" | /app/sdk/5, /app/sdk/4 | eks-search-provider-v3 |
    pub fn reference() -> Self {
        Self {
            abi_tag: DEFAULT_ABI_TAG.to_string(),
            services: vec![
                VersionMapping::new(
                    "1",
                    ["/app/sdk/1", "/app/sdk/0"],
                    "eks-search-provider-v1",
                    "/app/eos-knowledge-services/1",
                ),
                VersionMapping::new(
                    "2",
                    ["/app/sdk/3", "/app/sdk/2"],
                    "eks-search-provider-v2",
                    "/app/eos-knowledge-services/2",
                ),
                VersionMapping::new(
                    "3",
                    ["/app/sdk/5", "/app/sdk/4"],
                    "eks-search-provider-v3",
                    "/app/eos-knowledge-services/3",
                ),
            ],
        }
    }

    /// Exact-match lookup; there is no fallback entry.
    pub fn lookup(&self, services_version: &str) -> Option<&VersionMapping> {
        self.services
            .iter()
            .find(|mapping| mapping.version == services_version)
    }

    /// Supported version strings in table order
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.services.iter().map(|mapping| mapping.version.as_str())
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::reference()
    }
}
