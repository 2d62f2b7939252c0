//! Multi-entity snapshots sharing one generation session.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::{
    error::Result,
    generator::{DeviceOptions, FixtureGenerator, Session},
    model::{
        BridgeHealth, BridgeInfo, BridgeState, Device, DeviceType, Group, NetworkMapKind,
        NetworkMapResponse,
    },
};

/// A consistent view of a gateway: devices, groups, bridge metadata, device
/// states and topology built from one device set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    /// Bridge reachability.
    pub bridge_state: BridgeState,
    /// Bridge information, including per-device options.
    pub bridge_info: BridgeInfo,
    /// Bridge health statistics.
    pub bridge_health: BridgeHealth,
    /// Devices; index 0 is the coordinator.
    pub devices: Vec<Device>,
    /// Groups over the non-coordinator devices.
    pub groups: Vec<Group>,
    /// Device states keyed by device address.
    pub states: BTreeMap<String, Map<String, Value>>,
    /// Raw network map over every on-mesh device.
    pub network_map: NetworkMapResponse,
}

impl Snapshot {
    /// Returns the coordinator, if the device list starts with one.
    #[must_use]
    pub fn coordinator(&self) -> Option<&Device> {
        self.devices
            .first()
            .filter(|device| device.device_type == DeviceType::Coordinator)
    }

    /// Lists group-member and topology addresses missing from the device
    /// list, in encounter order.
    ///
    /// # Examples
    /// ```
    /// use zigfix_core::{FixtureGeneratorBuilder, sample_catalog};
    ///
    /// let catalog = sample_catalog();
    /// let mut generator = FixtureGeneratorBuilder::new().with_seed(3).build(&catalog);
    /// let snapshot = generator.snapshot(5, 2)?;
    /// assert!(snapshot.dangling_references().is_empty());
    /// # Ok::<(), zigfix_core::GenerateError>(())
    /// ```
    #[must_use]
    pub fn dangling_references(&self) -> Vec<String> {
        let known: HashSet<&str> = self
            .devices
            .iter()
            .map(|device| device.ieee_address.as_str())
            .collect();
        let members = self
            .groups
            .iter()
            .flat_map(|group| group.members.iter().map(|member| member.ieee_address.as_str()));
        let map = &self.network_map.value;
        let nodes = map.nodes.iter().map(|node| node.ieee_addr.as_str());
        let link_ends = map
            .links
            .iter()
            .flat_map(|link| [link.source.ieee_addr.as_str(), link.target.ieee_addr.as_str()]);

        let mut seen = HashSet::new();
        members
            .chain(nodes)
            .chain(link_ends)
            .filter(|address| !known.contains(address) && seen.insert(*address))
            .map(str::to_owned)
            .collect()
    }
}

impl FixtureGenerator<'_> {
    /// Generates a snapshot with `device_count` devices besides the
    /// coordinator and `group_count` groups.
    ///
    /// Parts are drawn in a fixed order: coordinator, devices, groups, bridge
    /// state, bridge info, device states, bridge health, topology.
    ///
    /// # Errors
    /// Propagates any error from the individual generators.
    ///
    /// # Examples
    /// ```
    /// use zigfix_core::{FixtureGeneratorBuilder, sample_catalog};
    ///
    /// let catalog = sample_catalog();
    /// let mut generator = FixtureGeneratorBuilder::new().with_seed(1).build(&catalog);
    /// let snapshot = generator.snapshot(20, 4)?;
    /// assert_eq!(snapshot.devices.len(), 21);
    /// assert_eq!(snapshot.groups.len(), 4);
    /// assert!(snapshot.coordinator().is_some());
    /// # Ok::<(), zigfix_core::GenerateError>(())
    /// ```
    #[instrument(
        name = "generate.snapshot",
        err,
        skip(self),
        fields(seed = self.seed(), routes = self.routes())
    )]
    pub fn snapshot(&mut self, device_count: usize, group_count: usize) -> Result<Snapshot> {
        let mut session = Session::default();
        let coordinator = self.coordinator_in(&mut session)?;
        let mut others = Vec::with_capacity(device_count);
        for _ in 0..device_count {
            others.push(self.device_in(&mut session, &DeviceOptions::new())?);
        }
        let mut groups = Vec::with_capacity(group_count);
        for _ in 0..group_count {
            groups.push(self.group_in(&mut session, &others)?);
        }

        let bridge_state = self.bridge_state();
        let bridge_info = self.bridge_info(&coordinator, &others, &groups)?;
        let mut states = BTreeMap::new();
        for device in others.iter().filter(|device| device.definition.is_some()) {
            states.insert(device.ieee_address.clone(), self.device_state(device)?);
        }
        let bridge_health = self.bridge_health(&others);
        let routes = self.routes();
        let value = self.network_map(&coordinator, &others, routes)?;
        info!(
            devices = others.len() + 1,
            groups = groups.len(),
            links = value.links.len(),
            "snapshot generated"
        );

        let mut devices = Vec::with_capacity(others.len() + 1);
        devices.push(coordinator);
        devices.extend(others);
        Ok(Snapshot {
            bridge_state,
            bridge_info,
            bridge_health,
            devices,
            groups,
            states,
            network_map: NetworkMapResponse {
                kind: NetworkMapKind::Raw,
                routes,
                value,
            },
        })
    }
}
