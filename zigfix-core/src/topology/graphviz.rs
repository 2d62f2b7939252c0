//! Graphviz DOT rendering of raw network maps.

use std::fmt;

use crate::model::{DeviceType, NetworkMap, Relationship, TopologyNode};

struct Dot<'a>(&'a NetworkMap);

const fn shape(device_type: DeviceType) -> (&'static str, &'static str) {
    match device_type {
        DeviceType::Coordinator => ("doubleoctagon", "#e04e5d"),
        DeviceType::Router => ("box", "#4ea3e0"),
        DeviceType::EndDevice => ("ellipse", "#fff8ce"),
        DeviceType::Unknown | DeviceType::GreenPower => ("diamond", "#d3d3d3"),
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn label(node: &TopologyNode) -> String {
    let mut label = format!(
        "{}\\n{} (0x{:04x})",
        escape(&node.friendly_name),
        node.ieee_addr,
        node.network_address
    );
    if let Some(definition) = &node.definition {
        label.push_str("\\n");
        label.push_str(&escape(&format!("{} {}", definition.vendor, definition.model)));
    }
    label
}

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph G {{")?;
        writeln!(f, "  node [style=filled, fontsize=10];")?;
        for node in &self.0.nodes {
            let (shape, colour) = shape(node.device_type);
            writeln!(
                f,
                "  \"{}\" [shape={shape}, fillcolor=\"{colour}\", label=\"{}\"];",
                node.ieee_addr,
                label(node)
            )?;
        }
        for link in &self.0.links {
            let style = match link.relationship {
                Relationship::Parent | Relationship::Child => "solid",
                Relationship::Sibling
                | Relationship::NoneOfTheAbove
                | Relationship::PreviousChild => "dashed",
            };
            writeln!(
                f,
                "  \"{}\" -> \"{}\" [style={style}, label=\"{}\"];",
                link.source.ieee_addr, link.target.ieee_addr, link.linkquality
            )?;
        }
        writeln!(f, "}}")
    }
}

/// Renders a network map as a Graphviz digraph.
///
/// Node shapes follow the device type; edges are labelled with link quality
/// and drawn dashed unless the link is hierarchical.
///
/// # Examples
/// ```
/// use zigfix_core::{NetworkMap, render_graphviz};
///
/// let dot = render_graphviz(&NetworkMap::default());
/// assert!(dot.starts_with("digraph G {"));
/// ```
#[must_use]
pub fn render_graphviz(map: &NetworkMap) -> String {
    Dot(map).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinkEnd, NodeDefinition, TopologyLink};

    fn node(addr: &str, device_type: DeviceType, name: &str) -> TopologyNode {
        TopologyNode {
            ieee_addr: addr.to_owned(),
            friendly_name: name.to_owned(),
            device_type,
            network_address: 0x1a2b,
            manufacturer_name: None,
            model_id: None,
            last_seen: None,
            definition: Some(NodeDefinition {
                model: "M1".to_owned(),
                vendor: "Acme".to_owned(),
                description: "Bulb".to_owned(),
                supports_ota: false,
            }),
        }
    }

    #[test]
    fn renders_nodes_and_labelled_edges() {
        let coordinator = node("0x01", DeviceType::Coordinator, "Coordinator");
        let bulb = node("0x02", DeviceType::Router, "say \"hi\"");
        let map = NetworkMap {
            links: vec![TopologyLink {
                source: LinkEnd {
                    ieee_addr: "0x01".to_owned(),
                    network_address: 0,
                },
                target: LinkEnd {
                    ieee_addr: "0x02".to_owned(),
                    network_address: 0x1a2b,
                },
                linkquality: 142,
                depth: 1,
                routes: Vec::new(),
                source_ieee_addr: "0x01".to_owned(),
                target_ieee_addr: "0x02".to_owned(),
                source_nwk_addr: 0,
                lqi: 142,
                relationship: Relationship::Child,
            }],
            nodes: vec![coordinator, bulb],
        };
        let dot = render_graphviz(&map);
        assert!(dot.contains("\"0x01\" [shape=doubleoctagon"));
        assert!(dot.contains("\"0x02\" [shape=box"));
        assert!(dot.contains("say \\\"hi\\\""));
        assert!(dot.contains("(0x1a2b)"));
        assert!(dot.contains("\"0x01\" -> \"0x02\" [style=solid, label=\"142\"];"));
        assert!(dot.trim_end().ends_with('}'));
    }
}
