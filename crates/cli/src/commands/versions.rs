//! `--list-versions` implementation.

use dispatcher::DispatchTable;

use crate::cli::Cli;
use crate::error::Result;

/// Print the built-in dispatch table
pub fn run_list_versions(cli: &Cli) -> Result<()> {
    let table = DispatchTable::reference();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        print_table(&table);
    }
    Ok(())
}

fn print_table(table: &DispatchTable) {
    println!("Services versions ({}):", table.services.len());
    for mapping in &table.services {
        println!("  {} -> {}", mapping.version, mapping.binary);
        println!("     prefix: {}", mapping.services_prefix.display());
        let candidates: Vec<String> = mapping
            .sdk_candidates
            .iter()
            .map(|c| c.display().to_string())
            .collect();
        println!("     sdks:   {}", candidates.join(", "));
    }
    println!("  arch triple: <arch>-{}", table.abi_tag);
}
