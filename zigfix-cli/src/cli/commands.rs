//! Command implementations and argument parsing for the zigfix CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use zigfix_core::{
    Catalog, Device, DeviceOptions, DeviceType, FixtureGenerator, FixtureGeneratorBuilder,
    GenerateError, Group, NetworkMapKind, NetworkMapResponse, render_graphviz, sample_catalog,
};
use zigfix_providers_json::{JsonCatalog, JsonCatalogError};

const DEFAULT_SNAPSHOT_DEVICES: usize = 20;
const DEFAULT_SNAPSHOT_GROUPS: usize = 4;
const DEFAULT_CANDIDATES: usize = 10;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "zigfix",
    about = "Generate deterministic gateway fixtures: devices, groups, network maps and snapshots."
)]
pub struct Cli {
    /// Options shared by every command.
    #[command(flatten)]
    pub generation: GenerationArgs,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Generator configuration shared by every command.
#[derive(Debug, Args, Clone, Default)]
pub struct GenerationArgs {
    /// Stream seed; defaults to the wall clock.
    #[arg(long, global = true)]
    pub seed: Option<u32>,

    /// JSON catalog file; defaults to the built-in sample catalog.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Reference time in milliseconds since the epoch.
    #[arg(long = "epoch-ms", global = true)]
    pub epoch_ms: Option<u64>,

    /// Attach routing-table entries to network map links.
    #[arg(long, global = true)]
    pub routes: bool,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a consistent snapshot of a whole gateway.
    Snapshot(SnapshotCommand),
    /// Generate one device.
    Device(DeviceCommand),
    /// Generate candidate devices and one group over them.
    Group(GroupCommand),
    /// Generate a coordinator, devices and their network map.
    NetworkMap(NetworkMapCommand),
}

/// Options accepted by the `snapshot` command.
#[derive(Debug, Args, Clone)]
pub struct SnapshotCommand {
    /// Devices besides the coordinator.
    #[arg(long, default_value_t = DEFAULT_SNAPSHOT_DEVICES)]
    pub devices: usize,

    /// Groups over the generated devices.
    #[arg(long, default_value_t = DEFAULT_SNAPSHOT_GROUPS)]
    pub groups: usize,
}

/// Options accepted by the `device` command.
#[derive(Debug, Args, Clone, Default)]
pub struct DeviceCommand {
    /// Force the device type.
    #[arg(long = "type", value_enum)]
    pub device_type: Option<DeviceTypeArg>,

    /// Force the catalog model, matched case-insensitively including aliases.
    #[arg(long)]
    pub model: Option<String>,
}

/// Options accepted by the `group` command.
#[derive(Debug, Args, Clone)]
pub struct GroupCommand {
    /// Candidate devices the group draws members from.
    #[arg(long, default_value_t = DEFAULT_CANDIDATES)]
    pub devices: usize,
}

/// Options accepted by the `network-map` command.
#[derive(Debug, Args, Clone)]
pub struct NetworkMapCommand {
    /// Devices besides the coordinator.
    #[arg(long, default_value_t = DEFAULT_SNAPSHOT_DEVICES)]
    pub devices: usize,

    /// Output representation.
    #[arg(long, value_enum, default_value_t = MapFormat::Raw)]
    pub format: MapFormat,
}

/// Device types a caller may force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeviceTypeArg {
    /// Mains-powered relay node.
    Router,
    /// Leaf node.
    EndDevice,
    /// Node without a reported role.
    Unknown,
    /// Green-power node.
    GreenPower,
}

impl From<DeviceTypeArg> for DeviceType {
    fn from(arg: DeviceTypeArg) -> Self {
        match arg {
            DeviceTypeArg::Router => Self::Router,
            DeviceTypeArg::EndDevice => Self::EndDevice,
            DeviceTypeArg::Unknown => Self::Unknown,
            DeviceTypeArg::GreenPower => Self::GreenPower,
        }
    }
}

/// Network map output representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MapFormat {
    /// JSON nodes and links.
    Raw,
    /// Graphviz DOT digraph.
    Graphviz,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The catalog file could not be loaded.
    #[error(transparent)]
    Catalog(#[from] JsonCatalogError),
    /// Fixture generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),
    /// A fixture could not be converted to JSON.
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    /// Returns the stable code of the underlying library error.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Catalog(err) => Some(err.code()),
            Self::Generate(err) => Some(err.code().as_str()),
            Self::Encode(_) => None,
        }
    }
}

/// A rendered command result.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// A JSON document.
    Json(Value),
    /// A Graphviz document.
    Dot(String),
}

#[derive(Serialize)]
struct GroupFixture {
    devices: Vec<Device>,
    group: Group,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the catalog cannot be loaded or generation
/// fails.
///
/// # Examples
/// ```
/// use zigfix_cli::cli::{Cli, Command, DeviceCommand, GenerationArgs, Output, run_cli};
///
/// let cli = Cli {
///     generation: GenerationArgs {
///         seed: Some(1),
///         ..GenerationArgs::default()
///     },
///     command: Command::Device(DeviceCommand::default()),
/// };
/// let Output::Json(device) = run_cli(cli)? else {
///     unreachable!("devices render as JSON");
/// };
/// assert_eq!(device["ieee_address"], "0xff49b6f772632716");
/// # Ok::<(), zigfix_cli::cli::CliError>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty, catalog = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<Output, CliError> {
    let Cli {
        generation,
        command,
    } = cli;
    let catalog = load_catalog(&generation)?;
    let span = Span::current();
    span.record("catalog", field::display(catalog.name()));

    let mut builder = FixtureGeneratorBuilder::new().with_routes(generation.routes);
    if let Some(seed) = generation.seed {
        builder = builder.with_seed(seed);
    }
    if let Some(epoch_ms) = generation.epoch_ms {
        builder = builder.with_epoch_ms(epoch_ms);
    }
    let mut generator = builder.build(&*catalog);
    info!(seed = generator.seed(), "generator ready");

    let output = match command {
        Command::Snapshot(args) => {
            span.record("command", field::display("snapshot"));
            let snapshot = generator.snapshot(args.devices, args.groups)?;
            Output::Json(serde_json::to_value(snapshot)?)
        }
        Command::Device(args) => {
            span.record("command", field::display("device"));
            let mut options = DeviceOptions::new();
            if let Some(device_type) = args.device_type {
                options = options.with_device_type(device_type.into());
            }
            if let Some(model) = args.model {
                options = options.with_model(model);
            }
            Output::Json(serde_json::to_value(generator.device(&options)?)?)
        }
        Command::Group(args) => {
            span.record("command", field::display("group"));
            let devices = devices(&mut generator, args.devices)?;
            let group = generator.group(&devices)?;
            Output::Json(serde_json::to_value(GroupFixture { devices, group })?)
        }
        Command::NetworkMap(args) => {
            span.record("command", field::display("network-map"));
            network_map(&mut generator, &args, generation.routes)?
        }
    };
    Ok(output)
}

fn load_catalog(generation: &GenerationArgs) -> Result<Box<dyn Catalog>, CliError> {
    match &generation.catalog {
        Some(path) => Ok(Box::new(JsonCatalog::try_from_path(path)?)),
        None => Ok(Box::new(sample_catalog())),
    }
}

pub(super) fn devices(
    generator: &mut FixtureGenerator<'_>,
    count: usize,
) -> Result<Vec<Device>, GenerateError> {
    (0..count)
        .map(|_| generator.device(&DeviceOptions::new()))
        .collect()
}

fn network_map(
    generator: &mut FixtureGenerator<'_>,
    args: &NetworkMapCommand,
    routes: bool,
) -> Result<Output, CliError> {
    let coordinator = generator.coordinator()?;
    let devices = devices(generator, args.devices)?;
    let value = generator.network_map(&coordinator, &devices, routes)?;
    Ok(match args.format {
        MapFormat::Raw => Output::Json(serde_json::to_value(NetworkMapResponse {
            kind: NetworkMapKind::Raw,
            routes,
            value,
        })?),
        MapFormat::Graphviz => Output::Dot(render_graphviz(&value)),
    })
}

/// Writes `output` to `writer`, followed by a newline.
///
/// # Errors
/// Returns [`io::Error`] if encoding or writing fails.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use zigfix_cli::cli::{Output, render_output};
///
/// let mut buffer = Vec::new();
/// render_output(&Output::Json(json!({"state": "online"})), false, &mut buffer)?;
/// assert_eq!(buffer, b"{\"state\":\"online\"}\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_output(output: &Output, pretty: bool, mut writer: impl Write) -> io::Result<()> {
    match output {
        Output::Json(value) if pretty => serde_json::to_writer_pretty(&mut writer, value)?,
        Output::Json(value) => serde_json::to_writer(&mut writer, value)?,
        Output::Dot(text) => writer.write_all(text.trim_end().as_bytes())?,
    }
    writeln!(writer)
}
