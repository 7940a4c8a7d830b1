//! Process seam: launching the resolved service binary

use std::io;
use std::process::Command;

use contracts::SpawnRequest;
use tracing::{debug, instrument};

/// Creates the child process described by a `SpawnRequest`
pub trait ProcessSpawner {
    /// Create the child and return its pid.
    ///
    /// Implementations must not wait for the child to exit.
    fn spawn(&self, request: &SpawnRequest) -> io::Result<u32>;
}

impl<T: ProcessSpawner + ?Sized> ProcessSpawner for &T {
    fn spawn(&self, request: &SpawnRequest) -> io::Result<u32> {
        (**self).spawn(request)
    }
}

/// `ProcessSpawner` backed by `std::process::Command`.
///
/// argv is just the program path. `PATH`, `LD_LIBRARY_PATH` and
/// `XDG_DATA_DIRS` are overwritten; the rest of the environment, stdio and
/// every fd not marked close-on-exec pass through to the child.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandSpawner;

impl ProcessSpawner for CommandSpawner {
    #[instrument(name = "command_spawner_spawn", skip(self, request), fields(program = %request.program.display()))]
    // The child is left running unreaped: after we exit it is re-parented to
    // init and keeps consuming traffic on the inherited fds.
    #[allow(clippy::zombie_processes)]
    fn spawn(&self, request: &SpawnRequest) -> io::Result<u32> {
        let mut command = Command::new(request.program());
        command.envs(request.env_vars());

        let child = command.spawn()?;
        debug!(pid = child.id(), "Child process created");
        Ok(child.id())
    }
}
