use thiserror::Error;

use crate::ir::NodeRef;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("link {link} references unknown node {node}")]
    UnknownNode { link: usize, node: NodeRef },

    #[error("link {link} references node index {index}, but only {count} nodes exist")]
    NodeIndexOutOfRange {
        link: usize,
        index: usize,
        count: usize,
    },

    #[error("node {name:?} is defined more than once")]
    DuplicateNode { name: String },

    #[error("link {link} has invalid value {value}; values must be finite and >= 0")]
    InvalidLinkValue { link: usize, value: f32 },

    #[error("flow through node {name:?} overflows f32")]
    FlowOverflow { name: String },

    #[error("graph contains a cycle; {remaining} nodes still pending after {waves} rank waves")]
    CyclicGraph { waves: usize, remaining: usize },

    #[error("invalid layout parameters: {reason}")]
    InvalidParams { reason: String },
}
