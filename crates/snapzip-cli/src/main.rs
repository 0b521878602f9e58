//! Snapzip CLI - fast streaming ZIP snapshots of project directories.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    tracing::debug!(?cli, "parsed arguments");

    let formatter = output::create_formatter(cli.json, cli.verbose > 0, cli.quiet);
    let show_progress = !cli.quiet && !cli.json && progress::CliProgress::should_show();

    let result = match &cli.command {
        cli::Commands::Backup(args) => {
            commands::backup::execute(args, &*formatter, show_progress)
        }
        cli::Commands::Scan(args) => commands::scan::execute(args, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            formatter.format_error(cli.command.name(), &err);
            ExitCode::FAILURE
        }
    }
}
