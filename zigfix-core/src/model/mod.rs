//! Payload types emitted by the generators.

mod bridge;
mod device;
mod group;
mod network_map;
mod pan_id;

pub use bridge::{
    BridgeHealth, BridgeInfo, BridgeOnline, BridgeState, CoordinatorInfo, CoordinatorMeta,
    DeviceHealth, LogLevel, MqttHealth, NetworkInfo, OsHealth, ProcessHealth,
};
pub use device::{
    Binding, BindingTarget, Clusters, ConfiguredReporting, DefinitionSummary, Device, DeviceType,
    Endpoint, InterviewState, Scene,
};
pub use group::{Group, GroupMember};
pub use network_map::{
    LinkEnd, NetworkMap, NetworkMapKind, NetworkMapResponse, NodeDefinition, Relationship, Route,
    RouteStatus, TopologyLink, TopologyNode,
};
pub use pan_id::{ExtendedPanId, ExtendedPanIdError};
