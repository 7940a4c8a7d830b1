//! Default command: dispatch a services version.

use dispatcher::{create_dispatcher, DispatchTable, SpawnRequest};
use tracing::info;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Resolve and spawn (or, with `--dry-run`, only resolve and print)
pub fn run_dispatch(cli: &Cli) -> Result<()> {
    // clap guarantees presence unless --list-versions was given
    let version = cli.services_version.as_deref().unwrap_or_default();
    let arch = cli.arch.as_deref().filter(|arch| !arch.is_empty());

    let dispatcher = create_dispatcher(DispatchTable::reference());

    if cli.dry_run {
        let request = dispatcher
            .plan(version, arch)
            .map_err(|e| CliError::dispatch(version, e))?;
        return print_request(&request, cli.json);
    }

    let spawned = dispatcher
        .dispatch(version, arch)
        .map_err(|e| CliError::dispatch(version, e))?;

    info!(
        services_version = version,
        pid = spawned.pid,
        "Handing over to dispatched service"
    );

    Ok(())
}

fn print_request(request: &SpawnRequest, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(request)?);
        return Ok(());
    }

    println!("program: {}", request.program.display());
    for (name, value) in request.env_vars() {
        println!("{name}={value}");
    }
    Ok(())
}
