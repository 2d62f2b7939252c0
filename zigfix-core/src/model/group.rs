//! Group payloads.

use serde::Serialize;

use super::Scene;

/// A group as published on the gateway's group list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Group id in `1..=0xFFFE`.
    pub id: u16,
    /// Display name.
    pub friendly_name: String,
    /// Optional free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Member endpoints.
    pub members: Vec<GroupMember>,
    /// Stored scenes.
    pub scenes: Vec<Scene>,
}

/// A device endpoint that belongs to a group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupMember {
    /// Member device address.
    pub ieee_address: String,
    /// One of the member device's endpoint ids.
    pub endpoint: u8,
}
