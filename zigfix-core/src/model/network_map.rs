//! Raw network map payloads.
//!
//! Field names follow the camel-case shape consumers of the raw map expect,
//! including the legacy duplicates on [`TopologyLink`].

use serde::{Serialize, Serializer};

use super::DeviceType;

/// How the target of a link relates to its source.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Relationship {
    /// The target is the source's parent.
    Parent,
    /// The target is the source's child.
    Child,
    /// The targets are peers.
    Sibling,
    /// None of the above.
    NoneOfTheAbove,
    /// The target used to be the source's child. Never generated.
    PreviousChild,
}

impl Relationship {
    /// Returns the numeric code used on the wire.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Parent => 0,
            Self::Child => 1,
            Self::Sibling => 2,
            Self::NoneOfTheAbove => 3,
            Self::PreviousChild => 4,
        }
    }

    /// Returns the relationship seen from the other end of the link.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Parent => Self::Child,
            Self::Child => Self::Parent,
            other => other,
        }
    }
}

impl Serialize for Relationship {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Definition summary attached to a topology node.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct NodeDefinition {
    /// Model identifier.
    pub model: String,
    /// Vendor name.
    pub vendor: String,
    /// Human description.
    pub description: String,
    /// Whether the device supports over-the-air updates.
    pub supports_ota: bool,
}

/// Projection of a device onto the mesh graph.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyNode {
    /// Device address.
    pub ieee_addr: String,
    /// Device display name.
    pub friendly_name: String,
    /// Mesh role.
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    /// 16-bit short address.
    pub network_address: u16,
    /// Manufacturer name, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer_name: Option<String>,
    /// Hardware model id, if known.
    #[serde(rename = "modelID", skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Last time the device was heard from, in milliseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<u64>,
    /// Definition summary, if the device is supported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<NodeDefinition>,
}

/// One end of a link.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkEnd {
    /// Device address.
    pub ieee_addr: String,
    /// 16-bit short address.
    pub network_address: u16,
}

/// Routing-table state of a route entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteStatus {
    /// The route is usable.
    Active,
    /// Route discovery is running.
    DiscoveryUnderway,
    /// Route discovery failed.
    DiscoveryFailed,
    /// The route is stale.
    Inactive,
}

impl RouteStatus {
    /// Every status, in draw order.
    pub const ALL: [Self; 4] = [
        Self::Active,
        Self::DiscoveryUnderway,
        Self::DiscoveryFailed,
        Self::Inactive,
    ];
}

/// One routing-table entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Destination short address.
    pub destination_address: u16,
    /// Route state.
    pub status: RouteStatus,
    /// Next hop short address.
    pub next_hop: u16,
}

/// Directed edge between two distinct topology nodes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyLink {
    /// Link source.
    pub source: LinkEnd,
    /// Link target.
    pub target: LinkEnd,
    /// Link quality in `30..=255`.
    pub linkquality: u8,
    /// Depth in `1..=3`.
    pub depth: u8,
    /// Routing-table entries, empty unless routes were requested.
    pub routes: Vec<Route>,
    /// Legacy duplicate of `source.ieeeAddr`.
    pub source_ieee_addr: String,
    /// Legacy duplicate of `target.ieeeAddr`.
    pub target_ieee_addr: String,
    /// Legacy duplicate of `source.networkAddress`.
    pub source_nwk_addr: u16,
    /// Legacy duplicate of `linkquality`.
    pub lqi: u8,
    /// How the target relates to the source.
    pub relationship: Relationship,
}

/// Nodes and links of a mesh.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct NetworkMap {
    /// Nodes; index 0 is the coordinator.
    pub nodes: Vec<TopologyNode>,
    /// Directed links.
    pub links: Vec<TopologyLink>,
}

/// Representation of a network map response.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMapKind {
    /// Structured nodes and links.
    Raw,
}

/// Network map response as published by the bridge.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct NetworkMapResponse {
    /// Response representation.
    #[serde(rename = "type")]
    pub kind: NetworkMapKind,
    /// Whether routing tables were requested.
    pub routes: bool,
    /// The map.
    pub value: NetworkMap,
}
