use crate::config::LayoutParams;

use super::types::{Link, LinkId, NodeId, SankeyGraph, group_by_rank};

const ALPHA_DECAY: f32 = 0.99;

pub(super) fn compute_node_depths(graph: &mut SankeyGraph, params: &LayoutParams) {
    let mut columns = group_by_rank(graph);
    initialize_node_depths(graph, &columns, params);
    resolve_collisions(graph, &mut columns, params);

    let mut alpha = 1.0f32;
    for round in 0..params.iterations {
        alpha *= ALPHA_DECAY;
        relax_right_to_left(graph, &columns, alpha);
        resolve_collisions(graph, &mut columns, params);
        relax_left_to_right(graph, &columns, alpha);
        resolve_collisions(graph, &mut columns, params);
        tracing::trace!(round, alpha, "relaxation round");
    }
}

// Columns without flow do not constrain the scale.
fn flow_scale(graph: &SankeyGraph, columns: &[Vec<NodeId>], params: &LayoutParams) -> f32 {
    let ky = columns
        .iter()
        .filter_map(|column| {
            let total: f64 = column.iter().map(|id| f64::from(graph.node(*id).value)).sum();
            if total <= 0.0 {
                return None;
            }
            let gaps = column.len().saturating_sub(1) as f64 * f64::from(params.node_padding);
            Some((f64::from(params.height()) - gaps) / total)
        })
        .fold(f64::INFINITY, f64::min);
    if ky.is_finite() { ky.max(0.0) as f32 } else { 0.0 }
}

fn initialize_node_depths(graph: &mut SankeyGraph, columns: &[Vec<NodeId>], params: &LayoutParams) {
    let ky = flow_scale(graph, columns, params);
    for column in columns {
        let mut y = 0.0f32;
        for id in column {
            let node = &mut graph.nodes[id.0];
            node.height = node.value * ky;
            node.y = y;
            y += node.height + params.node_padding;
        }
    }
    for link in &mut graph.links {
        link.dy = link.value * ky;
    }
    graph.ky = ky;
    tracing::debug!(ky, columns = columns.len(), "initialized node depths");
}

// Accumulated in f64: center * value overflows f32 for large flows.
fn weighted_center(
    graph: &SankeyGraph,
    links: &[LinkId],
    far_end: fn(&Link) -> NodeId,
) -> Option<f32> {
    let mut weighted = 0.0f64;
    let mut total = 0.0f64;
    for id in links {
        let link = graph.link(*id);
        let value = f64::from(link.value);
        weighted += f64::from(graph.node(far_end(link)).center()) * value;
        total += value;
    }
    (total > 0.0).then(|| (weighted / total) as f32)
}

fn relax_right_to_left(graph: &mut SankeyGraph, columns: &[Vec<NodeId>], alpha: f32) {
    for column in columns.iter().rev() {
        for id in column {
            let node = graph.node(*id);
            if node.source_links.is_empty() {
                continue;
            }
            let links = node.source_links.clone();
            let Some(target_center) = weighted_center(graph, &links, |link| link.target)
            else {
                continue;
            };
            let shift = (target_center - graph.node(*id).center()) * alpha;
            graph.nodes[id.0].y += shift;
        }
    }
}

fn relax_left_to_right(graph: &mut SankeyGraph, columns: &[Vec<NodeId>], alpha: f32) {
    for column in columns {
        for id in column {
            let node = graph.node(*id);
            if node.target_links.is_empty() {
                continue;
            }
            let links = node.target_links.clone();
            let Some(source_center) = weighted_center(graph, &links, |link| link.source)
            else {
                continue;
            };
            let shift = (source_center - graph.node(*id).center()) * alpha;
            graph.nodes[id.0].y += shift;
        }
    }
}

// Leaves each column sorted by `y`.
pub(super) fn resolve_collisions(
    graph: &mut SankeyGraph,
    columns: &mut [Vec<NodeId>],
    params: &LayoutParams,
) {
    let padding = params.node_padding;
    let height = params.height();
    for column in columns.iter_mut() {
        if column.is_empty() {
            continue;
        }
        column.sort_by(|a, b| graph.node(*a).y.total_cmp(&graph.node(*b).y));

        // Top-down: keep each node at least `padding` below the previous one.
        let mut y0 = 0.0f32;
        for id in column.iter() {
            let node = &mut graph.nodes[id.0];
            let dy = y0 - node.y;
            if dy > 0.0 {
                node.y += dy;
            }
            y0 = node.bottom() + padding;
        }

        // Bottom-up: if the column spills past the bottom, pull it back up.
        let overflow = y0 - padding - height;
        if overflow > 0.0 {
            let last = column[column.len() - 1];
            graph.nodes[last.0].y -= overflow;
            let mut y0 = graph.nodes[last.0].y;
            for id in column.iter().rev().skip(1) {
                let node = &mut graph.nodes[id.0];
                let dy = node.bottom() + padding - y0;
                if dy > 0.0 {
                    node.y -= dy;
                }
                y0 = node.y;
            }
        }

        // Overcrowded columns may still poke out of the top; clamp them in.
        for id in column.iter() {
            let node = &mut graph.nodes[id.0];
            let max_y = (height - node.height).max(0.0);
            node.y = node.y.clamp(0.0, max_y);
        }
    }
}
