//! Bridge state, information and health generation.

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use crate::{
    error::Result,
    expose::synthesize_state,
    model::{
        BridgeHealth, BridgeInfo, BridgeOnline, BridgeState, CoordinatorInfo, CoordinatorMeta,
        Device, DeviceHealth, DeviceType, ExtendedPanId, Group, LogLevel, MqttHealth, NetworkInfo,
        OsHealth, ProcessHealth,
    },
    rng::RandomStream,
};

const VERSIONS: &[&str] = &["1.40.2", "1.41.0", "1.42.0", "2.0.0", "2.1.1"];
const ADAPTERS: &[&str] = &["zstack", "ember", "deconz", "zigate", "zboss"];

pub(super) fn state(stream: &mut RandomStream) -> BridgeState {
    let state = if stream.bool(0.95) {
        BridgeOnline::Online
    } else {
        BridgeOnline::Offline
    };
    BridgeState { state }
}

fn device_options(stream: &mut RandomStream, devices: &[Device]) -> Result<Map<String, Value>> {
    let mut entries = Map::new();
    for device in devices {
        let Some(definition) = &device.definition else {
            continue;
        };
        let mut entry = synthesize_state(stream, &definition.options)?;
        entry.insert(
            "friendly_name".to_owned(),
            Value::String(device.friendly_name.clone()),
        );
        entries.insert(device.ieee_address.clone(), Value::Object(entry));
    }
    Ok(entries)
}

fn group_config(groups: &[Group]) -> Map<String, Value> {
    groups
        .iter()
        .map(|group| {
            (
                group.id.to_string(),
                json!({ "friendly_name": group.friendly_name }),
            )
        })
        .collect()
}

pub(super) fn info(
    stream: &mut RandomStream,
    epoch_ms: u64,
    coordinator: &Device,
    devices: &[Device],
    groups: &[Group],
) -> Result<BridgeInfo> {
    let version = (*stream.pick("version", VERSIONS)?).to_owned();
    let commit = stream.hex(7);
    let adapter = (*stream.pick("adapter", ADAPTERS)?).to_owned();
    let revision = stream.int_as(20_200_000_u32, 20_259_999);
    let channel = stream.int_as(11_u8, 26);
    let pan_id = stream.int_as(1_u16, 0xFFFE);
    let extended_pan_id = ExtendedPanId::generate(stream);
    let log_level = *stream.pick("log level", &LogLevel::ALL)?;
    let permit_join = stream.bool(0.1);
    let permit_join_end = if permit_join {
        let seconds = u64::try_from(stream.int(1, 254)).unwrap_or(1);
        Some(epoch_ms.saturating_add(seconds * 1000))
    } else {
        None
    };
    let restart_required = stream.bool(0.05);

    let mut config = Map::new();
    config.insert(
        "mqtt".to_owned(),
        json!({ "base_topic": "zigbee2mqtt", "server": "mqtt://localhost:1883" }),
    );
    config.insert(
        "serial".to_owned(),
        json!({ "adapter": adapter.clone(), "port": "/dev/ttyACM0" }),
    );
    config.insert(
        "devices".to_owned(),
        Value::Object(device_options(stream, devices)?),
    );
    config.insert("groups".to_owned(), Value::Object(group_config(groups)));

    Ok(BridgeInfo {
        version,
        commit,
        coordinator: CoordinatorInfo {
            ieee_address: coordinator.ieee_address.clone(),
            adapter,
            meta: CoordinatorMeta { revision },
        },
        network: NetworkInfo {
            channel,
            pan_id,
            extended_pan_id,
        },
        log_level,
        permit_join,
        permit_join_end,
        restart_required,
        config,
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "health figures are reported to two decimals"
)]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(super) fn health(stream: &mut RandomStream, devices: &[Device]) -> BridgeHealth {
    let response_time = stream.int_as(1_u32, 200);
    let load_average = [
        round2(stream.float(0.0, 4.0)),
        round2(stream.float(0.0, 4.0)),
        round2(stream.float(0.0, 4.0)),
    ];
    let os = OsHealth {
        load_average,
        memory_used_mb: stream.int_as(128_u32, 4096),
        memory_percent: round2(stream.float(1.0, 90.0)),
    };
    let process = ProcessHealth {
        uptime_sec: stream.int_as(0_u32, 2_592_000),
        memory_used_mb: stream.int_as(32_u32, 512),
        memory_percent: round2(stream.float(0.5, 20.0)),
    };
    let mqtt = MqttHealth {
        connected: stream.bool(0.95),
        queued: stream.int_as(0_u32, 20),
        published: stream.int_as(0_u32, 100_000),
        received: stream.int_as(0_u32, 100_000),
    };
    let mut per_device = BTreeMap::new();
    for device in devices
        .iter()
        .filter(|device| device.device_type != DeviceType::Coordinator)
    {
        per_device.insert(
            device.ieee_address.clone(),
            DeviceHealth {
                messages: stream.int_as(0_u32, 50_000),
                messages_per_sec: round2(stream.float(0.0, 5.0)),
                leave_count: stream.int_as(0_u32, 3),
                network_address_changes: stream.int_as(0_u32, 2),
            },
        );
    }
    BridgeHealth {
        response_time,
        os,
        process,
        mqtt,
        devices: per_device,
    }
}
