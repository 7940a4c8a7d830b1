//! Command implementations.

mod dispatch;
mod versions;

pub use dispatch::run_dispatch;
pub use versions::run_list_versions;
