//! Command-line interface for generating fixtures.
//!
//! Every command builds one seeded generator over the sample catalog or a
//! JSON catalog file and writes a single document to stdout.

mod commands;

pub use commands::{
    Cli, CliError, Command, DeviceCommand, DeviceTypeArg, GenerationArgs, GroupCommand,
    MapFormat, NetworkMapCommand, Output, SnapshotCommand, render_output, run_cli,
};

#[cfg(test)]
mod tests;
