//! Device and endpoint payloads.

use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use crate::expose::Expose;

/// Role of a device on the mesh.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum DeviceType {
    /// The single network controller.
    Coordinator,
    /// A mains-powered relay node.
    Router,
    /// A leaf node that cannot relay.
    EndDevice,
    /// A node that did not report its role.
    Unknown,
    /// A battery-less green-power node, never part of the mesh proper.
    GreenPower,
}

impl DeviceType {
    /// Types the device generator draws from when no type is forced.
    pub const GENERATED: [Self; 4] = [Self::Router, Self::EndDevice, Self::Unknown, Self::GreenPower];

    /// Returns whether nodes of this type appear in a mesh topology.
    #[must_use]
    pub const fn is_on_mesh(self) -> bool {
        matches!(
            self,
            Self::Coordinator | Self::Router | Self::EndDevice | Self::Unknown
        )
    }

    /// Returns the wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coordinator => "Coordinator",
            Self::Router => "Router",
            Self::EndDevice => "EndDevice",
            Self::Unknown => "Unknown",
            Self::GreenPower => "GreenPower",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of the gateway's interview with a device.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewState {
    /// Interview has not started.
    Pending,
    /// Interview is running.
    InProgress,
    /// Interview finished and the device is usable.
    Successful,
    /// Interview gave up.
    Failed,
}

impl InterviewState {
    /// Every interview state, in draw order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Successful,
        Self::Failed,
    ];
}

/// Summary of the catalog definition a device was matched against.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DefinitionSummary {
    /// Model identifier (white-label model when the device was forced to one).
    pub model: String,
    /// Vendor name.
    pub vendor: String,
    /// Human description.
    pub description: String,
    /// Whether the device supports over-the-air updates.
    pub supports_ota: bool,
    /// Capability tree resolved for the device.
    pub exposes: Vec<Expose>,
    /// Options tree declared by the definition.
    pub options: Vec<Expose>,
    /// Where the definition came from.
    pub source: &'static str,
}

/// A device as published on the gateway's device list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Device {
    /// Globally unique 64-bit address, `0x`-prefixed hex.
    pub ieee_address: String,
    /// Mesh role.
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    /// 16-bit short address.
    pub network_address: u16,
    /// Whether a catalog definition was matched.
    pub supported: bool,
    /// Display name.
    pub friendly_name: String,
    /// Whether the device is disabled.
    pub disabled: bool,
    /// Optional free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Matched definition, absent for the coordinator.
    pub definition: Option<DefinitionSummary>,
    /// Reported power source.
    pub power_source: Option<String>,
    /// Firmware build identifier.
    pub software_build_id: Option<String>,
    /// Firmware date code.
    pub date_code: Option<String>,
    /// Hardware model id reported by the device.
    pub model_id: Option<String>,
    /// Manufacturer name reported by the device.
    pub manufacturer: Option<String>,
    /// Whether an interview is running.
    pub interviewing: bool,
    /// Whether the interview completed.
    pub interview_completed: bool,
    /// Interview state.
    pub interview_state: InterviewState,
    /// Last time the device was heard from, in milliseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<u64>,
    /// Endpoints keyed by id.
    pub endpoints: BTreeMap<u8, Endpoint>,
}

impl Device {
    /// Returns the device's endpoint ids in ascending order.
    #[must_use]
    pub fn endpoint_ids(&self) -> Vec<u8> {
        self.endpoints.keys().copied().collect()
    }
}

/// One application endpoint on a device.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Endpoint {
    /// Name declared by the catalog, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Bindings originating at this endpoint.
    pub bindings: Vec<Binding>,
    /// Configured attribute reporting rules.
    pub configured_reportings: Vec<ConfiguredReporting>,
    /// Cluster sets.
    pub clusters: Clusters,
    /// Stored scenes.
    pub scenes: Vec<Scene>,
}

/// Input and output cluster names of an endpoint. Each list holds no duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Clusters {
    /// Server-side clusters.
    pub input: Vec<String>,
    /// Client-side clusters.
    pub output: Vec<String>,
}

/// A stored scene.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Scene {
    /// Scene id, unique within one generation session.
    pub id: u8,
    /// Display name.
    pub name: String,
}

/// A binding from a cluster to a target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Binding {
    /// Bound cluster name.
    pub cluster: String,
    /// Binding destination.
    pub target: BindingTarget,
}

/// Destination of a binding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BindingTarget {
    /// A specific endpoint on another device.
    Endpoint {
        /// Target device address.
        ieee_address: String,
        /// Target endpoint id.
        endpoint: u8,
    },
    /// A group.
    Group {
        /// Target group id.
        id: u16,
    },
}

/// One attribute reporting rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfiguredReporting {
    /// Cluster owning the attribute.
    pub cluster: String,
    /// Reported attribute.
    pub attribute: String,
    /// Minimum seconds between reports.
    pub minimum_report_interval: u32,
    /// Maximum seconds between reports.
    pub maximum_report_interval: u32,
    /// Change threshold triggering a report.
    pub reportable_change: u32,
}
