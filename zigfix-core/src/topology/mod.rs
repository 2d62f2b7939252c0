//! Mesh topology synthesis.
//!
//! Nodes are the coordinator followed by every on-mesh device. Each node but
//! the last originates a handful of links; targets lean towards the
//! coordinator so that generated meshes look like real star-ish networks.

mod graphviz;
mod relationship;

use std::collections::HashSet;

use tracing::debug;

use crate::{
    error::Result,
    model::{
        Device, DeviceType, LinkEnd, NetworkMap, NodeDefinition, Route, RouteStatus,
        TopologyLink, TopologyNode,
    },
    rng::RandomStream,
};

pub use graphviz::render_graphviz;
pub use relationship::resolve_relationship;

/// Networks at or above this size draw more links and lean less on the
/// coordinator.
const LARGE_NETWORK: usize = 50;

fn project(device: &Device) -> TopologyNode {
    TopologyNode {
        ieee_addr: device.ieee_address.clone(),
        friendly_name: device.friendly_name.clone(),
        device_type: device.device_type,
        network_address: device.network_address,
        manufacturer_name: device.manufacturer.clone(),
        model_id: device.model_id.clone(),
        last_seen: device.last_seen,
        definition: device.definition.as_ref().map(|summary| NodeDefinition {
            model: summary.model.clone(),
            vendor: summary.vendor.clone(),
            description: summary.description.clone(),
            supports_ota: summary.supports_ota,
        }),
    }
}

fn nodes(coordinator: &Device, devices: &[Device]) -> Vec<TopologyNode> {
    let mut nodes = vec![project(coordinator)];
    nodes.extend(
        devices
            .iter()
            .filter(|device| {
                device.device_type.is_on_mesh() && device.device_type != DeviceType::Coordinator
            })
            .map(project),
    );
    nodes
}

fn adjacent_allowed(left: DeviceType, right: DeviceType) -> bool {
    !(left == DeviceType::EndDevice && right == DeviceType::EndDevice)
}

fn link_end(node: &TopologyNode) -> LinkEnd {
    LinkEnd {
        ieee_addr: node.ieee_addr.clone(),
        network_address: node.network_address,
    }
}

fn draw_target(stream: &mut RandomStream, source: usize, last: i64, bias: f64) -> usize {
    let index = if source != 0 && stream.bool(bias) {
        0
    } else {
        stream.int(1, last)
    };
    usize::try_from(index).unwrap_or_default()
}

/// Builds a raw network map over `coordinator` and `devices`.
///
/// Devices that are not on the mesh (green-power nodes) and extra
/// coordinators are left out. Links never join a node to itself, never
/// repeat a target for the same source and never join two end devices.
///
/// # Errors
/// Propagates [`crate::GenerateError`] from the relationship resolver and
/// from route destination picks.
pub fn generate_network_map(
    stream: &mut RandomStream,
    coordinator: &Device,
    devices: &[Device],
    routes: bool,
) -> Result<NetworkMap> {
    let nodes = nodes(coordinator, devices);
    let count = nodes.len();
    let large = count >= LARGE_NETWORK;
    let max_links: i64 = if large { 6 } else { 3 };
    let bias = if large { 0.5 } else { 0.75 };
    let last = i64::try_from(count.saturating_sub(1)).unwrap_or(i64::MAX);
    let addresses: Vec<u16> = nodes.iter().map(|node| node.network_address).collect();

    let mut links = Vec::new();
    for (index, source) in nodes.iter().enumerate().take(count.saturating_sub(1)) {
        let valid = nodes
            .iter()
            .enumerate()
            .filter(|&(other, target)| {
                other != index && adjacent_allowed(source.device_type, target.device_type)
            })
            .count();
        let drawn = usize::try_from(stream.int(0, max_links)).unwrap_or_default();
        let link_count = drawn.min(valid);
        if link_count < drawn {
            debug!(source = %source.ieee_addr, drawn, valid, "capping link count");
        }

        let mut used = HashSet::new();
        for _ in 0..link_count {
            let (target_index, target) = loop {
                let candidate = draw_target(stream, index, last, bias);
                let Some(target) = nodes.get(candidate) else {
                    continue;
                };
                if candidate != index
                    && !used.contains(&candidate)
                    && adjacent_allowed(source.device_type, target.device_type)
                {
                    break (candidate, target);
                }
            };
            used.insert(target_index);

            let linkquality = stream.int_as(30_u8, 255);
            let depth = stream.int_as(1_u8, 3);
            let relationship =
                resolve_relationship(stream, source.device_type, target.device_type)?;
            let mut link_routes = Vec::new();
            if routes && stream.bool(0.5) {
                link_routes.push(Route {
                    destination_address: *stream.pick("route destination", &addresses)?,
                    status: *stream.pick("route status", &RouteStatus::ALL)?,
                    next_hop: target.network_address,
                });
            }

            links.push(TopologyLink {
                source: link_end(source),
                target: link_end(target),
                linkquality,
                depth,
                routes: link_routes,
                source_ieee_addr: source.ieee_addr.clone(),
                target_ieee_addr: target.ieee_addr.clone(),
                source_nwk_addr: source.network_address,
                lqi: linkquality,
                relationship,
            });
        }
    }
    Ok(NetworkMap { nodes, links })
}
