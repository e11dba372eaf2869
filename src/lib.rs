#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutParams, RenderConfig, load_config};
pub use ir::{GraphSpec, LinkSpec, NodeRef, NodeSpec, parse_graph_spec};
pub use layout::{
    Link, LinkId, LinkPath, LayoutError, Node, NodeId, SankeyGraph, compute_layout,
};
pub use layout_dump::{LayoutDump, layout_json};
