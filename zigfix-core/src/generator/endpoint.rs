//! Endpoint, scene, binding and reporting generation.

use tracing::debug;

use super::Session;
use crate::{
    error::Result,
    model::{Binding, BindingTarget, Clusters, ConfiguredReporting, Endpoint, Scene},
    rng::RandomStream,
    words,
};

/// Cluster seeded on ordinary endpoints.
pub(super) const BASIC_CLUSTER: &str = "genBasic";
/// Cluster seeded on the coordinator's green-power endpoint.
pub(super) const GREEN_POWER_CLUSTER: &str = "greenPower";

const CLUSTERS: &[&str] = &[
    "genBasic",
    "genPowerCfg",
    "genIdentify",
    "genGroups",
    "genScenes",
    "genOnOff",
    "genLevelCtrl",
    "genOta",
    "genPollCtrl",
    "lightingColorCtrl",
    "closuresDoorLock",
    "closuresWindowCovering",
    "hvacThermostat",
    "hvacFanCtrl",
    "msTemperatureMeasurement",
    "msRelativeHumidity",
    "msOccupancySensing",
    "msIlluminanceMeasurement",
    "seMetering",
    "haElectricalMeasurement",
    "ssIasZone",
    "touchlink",
];

const ATTRIBUTES: &[&str] = &[
    "onOff",
    "currentLevel",
    "colorTemperature",
    "currentX",
    "currentY",
    "measuredValue",
    "batteryPercentageRemaining",
    "batteryVoltage",
    "localTemperature",
    "occupiedHeatingSetpoint",
    "currentPositionLiftPercentage",
    "instantaneousDemand",
    "activePower",
];

const SCENE_ID_MAX: u8 = 255;

/// Draws a scene with a session-unique id, or `None` when every id is taken.
pub(super) fn scene(stream: &mut RandomStream, session: &mut Session) -> Result<Option<Scene>> {
    if session.scene_ids.len() >= usize::from(SCENE_ID_MAX) {
        debug!("scene ids exhausted; skipping scene");
        return Ok(None);
    }
    let id = loop {
        let candidate = stream.int_as(1_u8, SCENE_ID_MAX);
        if session.scene_ids.insert(candidate) {
            break candidate;
        }
    };
    let name = format!("{} scene", words::word(stream)?);
    Ok(Some(Scene { id, name }))
}

/// Draws `count` scenes, skipping any that cannot get a unique id.
pub(super) fn scenes(
    stream: &mut RandomStream,
    session: &mut Session,
    count: i64,
) -> Result<Vec<Scene>> {
    let mut out = Vec::new();
    for _ in 0..count {
        if let Some(scene) = scene(stream, session)? {
            out.push(scene);
        }
    }
    Ok(out)
}

fn pick_clusters(stream: &mut RandomStream, into: &mut Vec<String>, count: i64) -> Result<()> {
    for _ in 0..count {
        let cluster = *stream.pick("cluster", CLUSTERS)?;
        if !into.iter().any(|known| known == cluster) {
            into.push(cluster.to_owned());
        }
    }
    Ok(())
}

fn binding(stream: &mut RandomStream, clusters: &[&String]) -> Result<Binding> {
    let cluster = (*stream.pick("binding cluster", clusters)?).clone();
    let target = if stream.bool(0.75) {
        BindingTarget::Endpoint {
            ieee_address: format!("0x{}", stream.hex(16)),
            endpoint: stream.int_as(1_u8, 254),
        }
    } else {
        BindingTarget::Group {
            id: stream.int_as(1_u16, 0xFFFE),
        }
    };
    Ok(Binding { cluster, target })
}

fn reporting(stream: &mut RandomStream, inputs: &[String]) -> Result<ConfiguredReporting> {
    let cluster = stream.pick("reporting cluster", inputs)?.clone();
    let attribute = (*stream.pick("attribute", ATTRIBUTES)?).to_owned();
    Ok(ConfiguredReporting {
        cluster,
        attribute,
        minimum_report_interval: stream.int_as(0_u32, 60),
        maximum_report_interval: stream.int_as(60_u32, 3600),
        reportable_change: stream.int_as(0_u32, 100),
    })
}

/// Generates one endpoint whose input clusters start with `seed_cluster`.
pub(super) fn endpoint(
    stream: &mut RandomStream,
    session: &mut Session,
    seed_cluster: &str,
    name: Option<String>,
) -> Result<Endpoint> {
    let mut input = vec![seed_cluster.to_owned()];
    let input_count = stream.int(1, 5);
    pick_clusters(stream, &mut input, input_count)?;

    let mut output = Vec::new();
    let output_count = stream.int(0, 3);
    pick_clusters(stream, &mut output, output_count)?;

    let scene_count = stream.int(0, 3);
    let scenes = scenes(stream, session, scene_count)?;

    let bindable: Vec<&String> = input.iter().chain(output.iter()).collect();
    let binding_count = stream.int(0, 2);
    let mut bindings = Vec::new();
    for _ in 0..binding_count {
        bindings.push(binding(stream, &bindable)?);
    }

    let reporting_count = stream.int(0, 2);
    let mut configured_reportings = Vec::new();
    for _ in 0..reporting_count {
        configured_reportings.push(reporting(stream, &input)?);
    }

    Ok(Endpoint {
        name,
        bindings,
        configured_reportings,
        clusters: Clusters { input, output },
        scenes,
    })
}
