use super::LayoutError;
use super::types::{LinkId, SankeyGraph};

pub(super) fn compute_node_values(graph: &mut SankeyGraph) -> Result<(), LayoutError> {
    let sum = |links: &[LinkId], graph: &SankeyGraph| -> f64 {
        links.iter().map(|id| f64::from(graph.link(*id).value)).sum()
    };
    for idx in 0..graph.nodes.len() {
        let node = &graph.nodes[idx];
        let value = sum(&node.source_links, graph).max(sum(&node.target_links, graph));
        if value > f64::from(f32::MAX) {
            return Err(LayoutError::FlowOverflow {
                name: node.name.clone(),
            });
        }
        graph.nodes[idx].value = value as f32;
    }
    Ok(())
}
