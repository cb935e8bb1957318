use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, graph, init, list},
    report,
};

/// Main entry point for the modgraph CLI.
///
/// Dispatches to the appropriate command handler and prints its summary.
/// Returns `Err` only for fatal conditions (unwritable artifact, invalid
/// configuration); recovered per-descriptor failures are reported on
/// stderr and do not fail the run.
pub fn run_cli(args: Arguments) -> Result<()> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(());
    };

    let result = run(args)?;
    report::print(&result);

    Ok(())
}

fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Graph(cmd)) => graph(cmd),
        Some(Command::List(cmd)) => list(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
