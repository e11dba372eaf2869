use std::collections::HashMap;

use crate::ir::{GraphSpec, NodeRef};

use super::LayoutError;
use super::types::{Link, LinkId, Node, NodeId, SankeyGraph};

pub(super) fn build_graph(spec: &GraphSpec) -> Result<SankeyGraph, LayoutError> {
    let mut index: HashMap<String, NodeId> = HashMap::with_capacity(spec.nodes.len());
    let mut nodes = Vec::with_capacity(spec.nodes.len());
    for (idx, node) in spec.nodes.iter().enumerate() {
        if index.insert(node.name.clone(), NodeId(idx)).is_some() {
            return Err(LayoutError::DuplicateNode {
                name: node.name.clone(),
            });
        }
        nodes.push(Node::new(node.name.clone()));
    }

    let resolve = |link: usize, endpoint: &NodeRef| -> Result<NodeId, LayoutError> {
        match endpoint {
            NodeRef::Name(name) => {
                index
                    .get(name)
                    .copied()
                    .ok_or_else(|| LayoutError::UnknownNode {
                        link,
                        node: endpoint.clone(),
                    })
            }
            NodeRef::Index(idx) if *idx < nodes.len() => Ok(NodeId(*idx)),
            NodeRef::Index(idx) => Err(LayoutError::NodeIndexOutOfRange {
                link,
                index: *idx,
                count: nodes.len(),
            }),
        }
    };

    let mut links = Vec::with_capacity(spec.links.len());
    for (link_idx, link) in spec.links.iter().enumerate() {
        if !link.value.is_finite() || link.value < 0.0 {
            return Err(LayoutError::InvalidLinkValue {
                link: link_idx,
                value: link.value,
            });
        }
        let source = resolve(link_idx, &link.source)?;
        let target = resolve(link_idx, &link.target)?;
        links.push(Link::new(source, target, link.value));
    }

    for (link_idx, link) in links.iter().enumerate() {
        nodes[link.source.0].source_links.push(LinkId(link_idx));
        nodes[link.target.0].target_links.push(LinkId(link_idx));
    }

    Ok(SankeyGraph::new(nodes, links, index))
}
