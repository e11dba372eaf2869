use crate::config::LayoutParams;

use super::LayoutError;
use super::types::SankeyGraph;

// Wave 0 holds every node; each node re-stamps its targets into the next
// wave, so a node settles at its longest-path distance from a source. On a
// DAG this needs at most one wave per node, more than that means a cycle.
pub(super) fn compute_node_breadths(
    graph: &mut SankeyGraph,
    params: &LayoutParams,
) -> Result<(), LayoutError> {
    let node_count = graph.nodes.len();
    let mut remaining: Vec<usize> = (0..node_count).collect();
    let mut queued = vec![false; node_count];
    let mut waves = 0usize;

    while !remaining.is_empty() {
        if waves >= node_count {
            return Err(LayoutError::CyclicGraph {
                waves,
                remaining: remaining.len(),
            });
        }
        queued.fill(false);
        let mut next = Vec::new();
        for &idx in &remaining {
            graph.nodes[idx].rank = waves;
            for link_id in &graph.nodes[idx].source_links {
                let target = graph.links[link_id.0].target.0;
                if !queued[target] {
                    queued[target] = true;
                    next.push(target);
                }
            }
        }
        remaining = next;
        waves += 1;
    }

    let max_rank = waves.saturating_sub(1);
    move_sinks_right(graph, max_rank);
    scale_node_breadths(graph, params, max_rank)?;
    graph.max_rank = max_rank;
    tracing::debug!(max_rank, "assigned node ranks");
    Ok(())
}

fn move_sinks_right(graph: &mut SankeyGraph, max_rank: usize) {
    for node in &mut graph.nodes {
        if node.is_sink() {
            node.rank = max_rank;
        }
    }
}

fn scale_node_breadths(
    graph: &mut SankeyGraph,
    params: &LayoutParams,
    max_rank: usize,
) -> Result<(), LayoutError> {
    let kx = if max_rank > 0 {
        let span = params.width() - params.node_width;
        if span <= 0.0 {
            return Err(LayoutError::InvalidParams {
                reason: format!(
                    "nodeWidth {} leaves no room for {} columns in width {}",
                    params.node_width,
                    max_rank + 1,
                    params.width()
                ),
            });
        }
        span / max_rank as f32
    } else {
        0.0
    };
    for node in &mut graph.nodes {
        node.x = node.rank as f32 * kx;
        node.width = params.node_width;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::GraphSpec;
    use crate::layout::builder::build_graph;

    fn ranked(links: &[(&str, &str)], params: &LayoutParams) -> Result<SankeyGraph, LayoutError> {
        let mut spec = GraphSpec::new();
        for (source, target) in links {
            spec.ensure_node(source);
            spec.ensure_node(target);
            spec.add_link(*source, *target, 1.0);
        }
        let mut graph = build_graph(&spec)?;
        compute_node_breadths(&mut graph, params)?;
        Ok(graph)
    }

    fn rank(graph: &SankeyGraph, name: &str) -> usize {
        graph.node_by_name(name).unwrap().rank
    }

    #[test]
    fn chain_gets_consecutive_ranks() {
        let params = LayoutParams {
            node_width: 20.0,
            size: [220.0, 100.0],
            ..Default::default()
        };
        let graph = ranked(&[("A", "B"), ("B", "C")], &params).unwrap();
        assert_eq!(graph.max_rank(), 2);
        assert_eq!(rank(&graph, "A"), 0);
        assert_eq!(rank(&graph, "B"), 1);
        assert_eq!(rank(&graph, "C"), 2);
        let xs: Vec<f32> = graph.nodes().iter().map(|n| n.x).collect();
        assert_eq!(xs, vec![0.0, 100.0, 200.0]);
        assert!(graph.nodes().iter().all(|n| n.width == 20.0));
    }

    #[test]
    fn longest_path_wins() {
        // A -> B -> C -> D and a shortcut A -> C.
        let graph = ranked(
            &[("A", "B"), ("B", "C"), ("A", "C"), ("C", "D")],
            &LayoutParams::default(),
        )
        .unwrap();
        assert_eq!(rank(&graph, "C"), 2);
        assert_eq!(rank(&graph, "D"), 3);
    }

    #[test]
    fn sinks_move_to_last_column() {
        // E is a sink reachable in one hop, but still lands in the last column.
        let graph = ranked(
            &[("A", "B"), ("B", "C"), ("C", "D"), ("A", "E")],
            &LayoutParams::default(),
        )
        .unwrap();
        assert_eq!(graph.max_rank(), 3);
        assert_eq!(rank(&graph, "E"), 3);
        assert_eq!(rank(&graph, "D"), 3);
    }

    #[test]
    fn single_node_does_not_divide_by_zero() {
        let mut spec = GraphSpec::new();
        spec.ensure_node("solo");
        let mut graph = build_graph(&spec).unwrap();
        compute_node_breadths(&mut graph, &LayoutParams::default()).unwrap();
        assert_eq!(graph.max_rank(), 0);
        assert_eq!(graph.nodes()[0].x, 0.0);
        assert!(graph.nodes()[0].x.is_finite());
    }

    #[test]
    fn node_as_wide_as_chart_needs_one_column() {
        let params = LayoutParams {
            node_width: 100.0,
            size: [100.0, 100.0],
            ..Default::default()
        };
        let err = ranked(&[("A", "B")], &params).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidParams { .. }));

        let mut spec = GraphSpec::new();
        spec.ensure_node("solo");
        let mut graph = build_graph(&spec).unwrap();
        compute_node_breadths(&mut graph, &params).unwrap();
        assert_eq!(graph.nodes()[0].x, 0.0);
    }

    #[test]
    fn cycle_is_reported() {
        let err = ranked(&[("A", "B"), ("B", "C"), ("C", "A")], &LayoutParams::default())
            .unwrap_err();
        assert!(matches!(err, LayoutError::CyclicGraph { waves: 3, .. }));
    }

    #[test]
    fn cycle_behind_a_source_is_reported() {
        let err = ranked(&[("S", "A"), ("A", "B"), ("B", "A")], &LayoutParams::default())
            .unwrap_err();
        assert!(matches!(err, LayoutError::CyclicGraph { .. }));
    }

    #[test]
    fn self_loop_is_a_cycle() {
        assert!(ranked(&[("A", "A")], &LayoutParams::default()).is_err());
    }
}
