//! Unit tests for CLI parsing, command execution and rendering.

use super::commands::devices;
use super::{
    Cli, CliError, Command, DeviceCommand, DeviceTypeArg, GenerationArgs, GroupCommand,
    MapFormat, NetworkMapCommand, Output, SnapshotCommand, render_output, run_cli,
};

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use rstest::rstest;
use serde_json::Value;
use tempfile::TempDir;
use tracing_subscriber::layer::SubscriberExt;
use zigfix_core::{FixtureGeneratorBuilder, GenerateErrorCode, sample_catalog};
use zigfix_providers_json::JsonCatalogError;

use zigfix_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn seeded(seed: u32) -> GenerationArgs {
    GenerationArgs {
        seed: Some(seed),
        ..GenerationArgs::default()
    }
}

fn json(output: Output) -> Value {
    match output {
        Output::Json(value) => value,
        Output::Dot(text) => panic!("expected JSON, got DOT: {text}"),
    }
}

fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

fn create_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

#[rstest]
fn snapshot_command_emits_a_full_snapshot() -> TestResult {
    let cli = Cli {
        generation: seeded(1),
        command: Command::Snapshot(SnapshotCommand {
            devices: 20,
            groups: 4,
        }),
    };
    let snapshot = json(run_cli(cli)?);
    assert_eq!(snapshot["devices"].as_array().map(Vec::len), Some(21));
    assert_eq!(snapshot["groups"].as_array().map(Vec::len), Some(4));
    assert_eq!(snapshot["devices"][0]["type"], "Coordinator");
    assert_eq!(snapshot["network_map"]["type"], "raw");
    Ok(())
}

#[rstest]
fn equal_seeds_render_identical_documents() -> TestResult {
    let render = || -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        let cli = Cli {
            generation: seeded(77),
            command: Command::Snapshot(SnapshotCommand {
                devices: 8,
                groups: 2,
            }),
        };
        let mut buffer = Vec::new();
        render_output(&run_cli(cli)?, false, &mut buffer)?;
        Ok(buffer)
    };
    assert_eq!(render()?, render()?);
    Ok(())
}

#[rstest]
#[case::router(DeviceTypeArg::Router, "Router")]
#[case::end_device(DeviceTypeArg::EndDevice, "EndDevice")]
#[case::green_power(DeviceTypeArg::GreenPower, "GreenPower")]
fn device_command_forces_the_type(
    #[case] device_type: DeviceTypeArg,
    #[case] expected: &str,
) -> TestResult {
    let cli = Cli {
        generation: seeded(3),
        command: Command::Device(DeviceCommand {
            device_type: Some(device_type),
            model: None,
        }),
    };
    let device = json(run_cli(cli)?);
    assert_eq!(device["type"], expected);
    Ok(())
}

#[rstest]
fn device_command_reports_unknown_models() {
    let cli = Cli {
        generation: seeded(3),
        command: Command::Device(DeviceCommand {
            device_type: None,
            model: Some("NOPE-1".into()),
        }),
    };
    let err = run_cli_expecting_error(cli, "unknown model must fail");
    assert!(matches!(
        err,
        CliError::Generate(ref inner) if inner.code() == GenerateErrorCode::DefinitionNotFound
    ));
    assert_eq!(err.code(), Some("ZIGFIX_DEFINITION_NOT_FOUND"));
}

#[rstest]
fn group_command_matches_library_output() -> TestResult {
    let cli = Cli {
        generation: seeded(12),
        command: Command::Group(GroupCommand { devices: 6 }),
    };
    let fixture = json(run_cli(cli)?);

    let catalog = sample_catalog();
    let mut generator = FixtureGeneratorBuilder::new().with_seed(12).build(&catalog);
    let candidates = devices(&mut generator, 6)?;
    let group = generator.group(&candidates)?;
    assert_eq!(fixture["group"], serde_json::to_value(&group)?);
    assert_eq!(fixture["devices"].as_array().map(Vec::len), Some(6));
    Ok(())
}

#[rstest]
fn network_map_renders_graphviz() -> TestResult {
    let cli = Cli {
        generation: seeded(5),
        command: Command::NetworkMap(NetworkMapCommand {
            devices: 10,
            format: MapFormat::Graphviz,
        }),
    };
    let output = run_cli(cli)?;
    let Output::Dot(dot) = &output else {
        panic!("graphviz format must render DOT");
    };
    assert!(dot.starts_with("digraph G {"));
    assert!(dot.contains("doubleoctagon"));

    let mut buffer = Vec::new();
    render_output(&output, false, &mut buffer)?;
    assert!(String::from_utf8(buffer)?.ends_with("}\n"));
    Ok(())
}

#[rstest]
fn network_map_raw_carries_the_routes_flag() -> TestResult {
    let cli = Cli {
        generation: GenerationArgs {
            routes: true,
            ..seeded(5)
        },
        command: Command::NetworkMap(NetworkMapCommand {
            devices: 10,
            format: MapFormat::Raw,
        }),
    };
    let map = json(run_cli(cli)?);
    assert_eq!(map["type"], "raw");
    assert_eq!(map["routes"], true);
    assert_eq!(map["value"]["nodes"][0]["type"], "Coordinator");
    Ok(())
}

#[rstest]
fn catalog_file_drives_generation() -> TestResult {
    let dir = TempDir::new()?;
    let path = create_file(
        &dir,
        "lab.json",
        r#"[{"model": "SW-1", "vendor": "Acme", "exposes": [
            {"type": "binary", "name": "state", "value_on": "ON", "value_off": "OFF"}
        ]}]"#,
    )?;
    let cli = Cli {
        generation: GenerationArgs {
            catalog: Some(path),
            ..seeded(9)
        },
        command: Command::Device(DeviceCommand {
            device_type: Some(DeviceTypeArg::Router),
            model: None,
        }),
    };
    let device = json(run_cli(cli)?);
    assert_eq!(device["definition"]["model"], "SW-1");
    assert_eq!(device["definition"]["vendor"], "Acme");
    Ok(())
}

#[rstest]
fn missing_catalog_file_is_reported() -> TestResult {
    let dir = TempDir::new()?;
    let cli = Cli {
        generation: GenerationArgs {
            catalog: Some(dir.path().join("absent.json")),
            ..seeded(9)
        },
        command: Command::Device(DeviceCommand::default()),
    };
    let err = run_cli_expecting_error(cli, "missing catalog must fail");
    assert!(matches!(err, CliError::Catalog(JsonCatalogError::Io(_))));
    assert_eq!(err.code(), Some("ZIGFIX_CATALOG_IO"));
    Ok(())
}

#[rstest]
fn run_records_command_and_catalog_fields() -> TestResult {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let result = tracing::subscriber::with_default(subscriber, || {
        run_cli(Cli {
            generation: seeded(4),
            command: Command::Snapshot(SnapshotCommand {
                devices: 3,
                groups: 1,
            }),
        })
    });
    result?;

    let span = layer.span("cli.run").ok_or("cli.run span missing")?;
    assert_eq!(span.field("command"), Some("snapshot"));
    assert_eq!(span.field("catalog"), Some("sample"));
    assert!(layer.span("generate.snapshot").is_some());
    Ok(())
}

#[rstest]
#[case::pretty(true)]
#[case::compact(false)]
fn render_output_terminates_with_newline(#[case] pretty: bool) -> TestResult {
    let mut buffer = Vec::new();
    render_output(
        &Output::Json(serde_json::json!({"state": "online"})),
        pretty,
        &mut buffer,
    )?;
    let text = String::from_utf8(buffer)?;
    assert!(text.ends_with("}\n"));
    assert_eq!(text.lines().count() > 1, pretty);
    Ok(())
}

#[rstest]
#[case::snapshot(&["zigfix", "--seed", "1", "snapshot", "--devices", "3"])]
#[case::global_after(&["zigfix", "device", "--type", "end-device", "--seed", "2"])]
#[case::map(&["zigfix", "network-map", "--format", "graphviz", "--routes"])]
#[case::group(&["zigfix", "group", "--devices", "4", "--epoch-ms", "1700000000000"])]
fn clap_accepts_documented_invocations(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_ok());
}

#[rstest]
#[case::unknown_format(&["zigfix", "network-map", "--format", "svg"])]
#[case::coordinator_type(&["zigfix", "device", "--type", "coordinator"])]
#[case::negative_seed(&["zigfix", "--seed", "-1", "snapshot"])]
#[case::missing_command(&["zigfix"])]
fn clap_rejects_invalid_invocations(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn clap_parses_shared_options() -> TestResult {
    let cli = Cli::try_parse_from([
        "zigfix",
        "snapshot",
        "--seed",
        "42",
        "--routes",
        "--pretty",
        "--groups",
        "2",
    ])?;
    assert_eq!(cli.generation.seed, Some(42));
    assert!(cli.generation.routes);
    assert!(cli.generation.pretty);
    let Command::Snapshot(args) = cli.command else {
        panic!("snapshot command expected");
    };
    assert_eq!(args.groups, 2);
    assert_eq!(args.devices, 20);
    Ok(())
}
