//! Sankey flow layout.
//!
//! The pipeline runs five stages over one owned [`SankeyGraph`]:
//! build (resolve link endpoints), values (node throughput), ranking
//! (columns and `x`), depth (relaxation and collision passes for `y`), and
//! links (band offsets on both ends of every link).

mod builder;
mod depth;
mod error;
mod links;
mod path;
mod ranking;
mod types;
mod values;

pub use error::LayoutError;
pub use path::LinkPath;
pub use types::{Link, LinkId, Node, NodeId, SankeyGraph};

use crate::config::LayoutParams;
use crate::ir::GraphSpec;

pub fn compute_layout(spec: &GraphSpec, params: &LayoutParams) -> Result<SankeyGraph, LayoutError> {
    params.validate()?;
    let _span = tracing::debug_span!(
        "sankey.layout",
        nodes = spec.nodes.len(),
        links = spec.links.len(),
        iterations = params.iterations
    )
    .entered();

    let mut graph = builder::build_graph(spec)?;
    graph.params = *params;
    values::compute_node_values(&mut graph)?;
    ranking::compute_node_breadths(&mut graph, params)?;
    depth::compute_node_depths(&mut graph, params);
    links::compute_link_depths(&mut graph);
    tracing::debug!(
        max_rank = graph.max_rank,
        ky = graph.ky,
        "layout complete"
    );
    Ok(graph)
}
