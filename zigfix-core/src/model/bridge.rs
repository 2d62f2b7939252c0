//! Bridge metadata payloads: state, info and health.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::ExtendedPanId;

/// Whether the bridge is reachable.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeOnline {
    /// The bridge is running.
    Online,
    /// The bridge is stopped.
    Offline,
}

/// Published bridge state.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct BridgeState {
    /// Reachability.
    pub state: BridgeOnline,
}

/// Log verbosity configured on the bridge.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warning,
    /// Informational output.
    Info,
    /// Everything.
    Debug,
}

impl LogLevel {
    /// Every level, in draw order.
    pub const ALL: [Self; 4] = [Self::Error, Self::Warning, Self::Info, Self::Debug];
}

/// Radio adapter metadata.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CoordinatorMeta {
    /// Adapter firmware revision.
    pub revision: u32,
}

/// Coordinator summary carried by bridge info.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CoordinatorInfo {
    /// Coordinator address.
    pub ieee_address: String,
    /// Adapter family.
    #[serde(rename = "type")]
    pub adapter: String,
    /// Adapter metadata.
    pub meta: CoordinatorMeta,
}

/// Radio network parameters.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct NetworkInfo {
    /// Radio channel in `11..=26`.
    pub channel: u8,
    /// 16-bit PAN id.
    pub pan_id: u16,
    /// Extended PAN id.
    pub extended_pan_id: ExtendedPanId,
}

/// Published bridge information.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BridgeInfo {
    /// Gateway software version.
    pub version: String,
    /// Gateway source revision.
    pub commit: String,
    /// Coordinator summary.
    pub coordinator: CoordinatorInfo,
    /// Network parameters.
    pub network: NetworkInfo,
    /// Configured log level.
    pub log_level: LogLevel,
    /// Whether joining is currently permitted.
    pub permit_join: bool,
    /// When joining closes, in milliseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit_join_end: Option<u64>,
    /// Whether a restart is pending.
    pub restart_required: bool,
    /// Effective configuration, including per-device options.
    pub config: Map<String, Value>,
}

/// Host operating-system health.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OsHealth {
    /// One, five and fifteen minute load averages.
    pub load_average: [f64; 3],
    /// Memory used, in megabytes.
    pub memory_used_mb: u32,
    /// Memory used, in percent.
    pub memory_percent: f64,
}

/// Gateway process health.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessHealth {
    /// Seconds since start.
    pub uptime_sec: u32,
    /// Memory used, in megabytes.
    pub memory_used_mb: u32,
    /// Memory used, in percent.
    pub memory_percent: f64,
}

/// Broker connection health.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MqttHealth {
    /// Whether the broker connection is up.
    pub connected: bool,
    /// Messages waiting to be sent.
    pub queued: u32,
    /// Messages sent.
    pub published: u32,
    /// Messages received.
    pub received: u32,
}

/// Per-device message statistics.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeviceHealth {
    /// Messages received from the device.
    pub messages: u32,
    /// Average message rate.
    pub messages_per_sec: f64,
    /// Times the device left the network.
    pub leave_count: u32,
    /// Times the device's short address changed.
    pub network_address_changes: u32,
}

/// Published bridge health.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BridgeHealth {
    /// Health check round trip, in milliseconds.
    pub response_time: u32,
    /// Host health.
    pub os: OsHealth,
    /// Process health.
    pub process: ProcessHealth,
    /// Broker health.
    pub mqtt: MqttHealth,
    /// Statistics keyed by device address.
    pub devices: BTreeMap<String, DeviceHealth>,
}
