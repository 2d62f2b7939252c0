//! CLI entry point for the zigfix fixture generator.
//!
//! Parses arguments with clap, generates the requested fixture, writes it to
//! stdout and maps failures to a non-zero exit code. Logging is initialised
//! first so every later step can emit diagnostics via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, field};

use zigfix_cli::{
    cli::{Cli, CliError, render_output, run_cli},
    logging::{self, LoggingError},
};

/// Parse arguments, run the command, render its output and flush stdout.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let pretty = cli.generation.pretty;
    let output = run_cli(cli).context("failed to generate fixture")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_output(&output, pretty, &mut writer).context("failed to write output")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = err.downcast_ref::<CliError>().and_then(CliError::code);
        error!(
            error = %format_args!("{err:#}"),
            code = code.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
