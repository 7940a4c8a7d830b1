//! # Contracts
//!
//! Shared data model for the multi-services dispatcher.
//!
//! Every other crate in the workspace depends on this one; it depends on
//! nothing but `serde` and `thiserror`.
//!
//! ## Lifecycle
//! - `DispatchTable` is a configuration constant built into the binary
//! - `PathSet` / `SpawnRequest` are built per dispatch call and dropped once
//!   the child has been created

mod error;
mod paths;
mod table;

pub use error::*;
pub use paths::*;
pub use table::*;
