use super::types::{LinkId, NodeId, SankeyGraph};

pub(super) fn compute_link_depths(graph: &mut SankeyGraph) {
    let centers: Vec<f32> = graph.nodes.iter().map(|node| node.center()).collect();
    let links = &graph.links;
    let target_center = |id: &LinkId| centers[links[id.0].target.0];
    let source_center = |id: &LinkId| centers[links[id.0].source.0];

    for node in &mut graph.nodes {
        node.source_links
            .sort_by(|a, b| target_center(a).total_cmp(&target_center(b)));
        node.target_links
            .sort_by(|a, b| source_center(a).total_cmp(&source_center(b)));
    }

    for node in &graph.nodes {
        let mut sy = 0.0f32;
        for id in &node.source_links {
            graph.links[id.0].sy = sy;
            sy += graph.links[id.0].dy;
        }
        let mut ty = 0.0f32;
        for id in &node.target_links {
            graph.links[id.0].ty = ty;
            ty += graph.links[id.0].dy;
        }
    }
}

impl SankeyGraph {
    /// Restacks link bands after nodes were moved.
    pub fn relayout(&mut self) {
        compute_link_depths(self);
    }

    /// Returns the `y` actually applied after clamping to the chart.
    pub fn move_node(&mut self, id: NodeId, y: f32) -> f32 {
        let max_y = (self.params.height() - self.nodes[id.0].height).max(0.0);
        let y = if y.is_finite() { y.clamp(0.0, max_y) } else { self.nodes[id.0].y };
        self.nodes[id.0].y = y;
        self.relayout();
        y
    }
}
