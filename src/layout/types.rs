use std::collections::HashMap;

use crate::config::LayoutParams;

/// Handle to a node of one [`SankeyGraph`]. Only the graph hands these out:
///
/// ```compile_fail
/// let id = sankey_layout::NodeId(0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a link of one [`SankeyGraph`].
///
/// ```compile_fail
/// let id = sankey_layout::LinkId(0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub(crate) usize);

impl LinkId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    /// Column index, 0 for sources and `max_rank` for sinks.
    pub rank: usize,
    pub x: f32,
    pub width: f32,
    pub y: f32,
    pub height: f32,
    pub value: f32,
    pub source_links: Vec<LinkId>,
    pub target_links: Vec<LinkId>,
}

impl Node {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            rank: 0,
            x: 0.0,
            width: 0.0,
            y: 0.0,
            height: 0.0,
            value: 0.0,
            source_links: Vec::new(),
            target_links: Vec::new(),
        }
    }

    pub fn center(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_source(&self) -> bool {
        self.target_links.is_empty()
    }

    pub fn is_sink(&self) -> bool {
        self.source_links.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
    pub value: f32,
    /// Band thickness in pixels.
    pub dy: f32,
    /// Offset of the band's top edge below the source node's top.
    pub sy: f32,
    /// Offset of the band's top edge below the target node's top.
    pub ty: f32,
}

impl Link {
    pub(crate) fn new(source: NodeId, target: NodeId, value: f32) -> Self {
        Self {
            source,
            target,
            value,
            dy: 0.0,
            sy: 0.0,
            ty: 0.0,
        }
    }
}

/// A laid-out flow graph. Nodes and links live in arenas addressed by
/// [`NodeId`] and [`LinkId`]; ids follow input order.
#[derive(Debug, Clone)]
pub struct SankeyGraph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) links: Vec<Link>,
    pub(crate) index: HashMap<String, NodeId>,
    pub(crate) params: LayoutParams,
    pub(crate) max_rank: usize,
    pub(crate) ky: f32,
}

impl SankeyGraph {
    pub(crate) fn new(nodes: Vec<Node>, links: Vec<Link>, index: HashMap<String, NodeId>) -> Self {
        Self {
            nodes,
            links,
            index,
            params: LayoutParams::default(),
            max_rank: 0,
            ky: 0.0,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.node_id(name).map(|id| self.node(id))
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn link_ids(&self) -> impl Iterator<Item = LinkId> + '_ {
        (0..self.links.len()).map(LinkId)
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn max_rank(&self) -> usize {
        self.max_rank
    }

    /// Pixels per unit of flow, shared by every node and link.
    pub fn ky(&self) -> f32 {
        self.ky
    }

    pub fn columns(&self) -> Vec<Vec<NodeId>> {
        let mut columns = group_by_rank(self);
        for column in &mut columns {
            column.sort_by(|a, b| self.node(*a).y.total_cmp(&self.node(*b).y));
        }
        columns
    }
}

// Input order is kept inside each bucket.
pub(crate) fn group_by_rank(graph: &SankeyGraph) -> Vec<Vec<NodeId>> {
    if graph.nodes.is_empty() {
        return Vec::new();
    }
    let ranks = graph.nodes.iter().map(|node| node.rank).max().unwrap_or(0) + 1;
    let mut columns = vec![Vec::new(); ranks];
    for id in graph.node_ids() {
        columns[graph.node(id).rank].push(id);
    }
    columns
}

#[cfg(test)]
mod tests {
    use crate::config::LayoutParams;
    use crate::ir::GraphSpec;
    use crate::layout::compute_layout;

    #[test]
    fn ids_come_from_the_graph() {
        let mut spec = GraphSpec::new();
        spec.ensure_node("A");
        spec.ensure_node("B");
        spec.add_link("A", "B", 2.0);
        let graph = compute_layout(&spec, &LayoutParams::default()).unwrap();
        let ids: Vec<usize> = graph.node_ids().map(|id| id.index()).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(graph.node_id("B").map(|id| id.index()), Some(1));
        for id in graph.link_ids() {
            assert_eq!(graph.link(id).value, 2.0);
        }
    }
}
