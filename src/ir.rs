use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    Index(usize),
    Name(String),
}

impl From<&str> for NodeRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for NodeRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for NodeRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(idx) => write!(f, "#{idx}"),
            Self::Name(name) => write!(f, "{name:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
}

impl NodeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub source: NodeRef,
    pub target: NodeRef,
    pub value: f32,
}

impl LinkSpec {
    pub fn new(source: impl Into<NodeRef>, target: impl Into<NodeRef>, value: f32) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub nodes: Vec<NodeSpec>,
    pub links: Vec<LinkSpec>,
}

impl GraphSpec {
    pub fn new() -> Self {
        Self::default()
    }

    // Index references are kept as-is and must already be valid.
    pub fn from_links(links: Vec<LinkSpec>) -> Self {
        let mut graph = Self::new();
        for link in &links {
            for endpoint in [&link.source, &link.target] {
                if let NodeRef::Name(name) = endpoint {
                    graph.ensure_node(name);
                }
            }
        }
        graph.links = links;
        graph
    }

    pub fn ensure_node(&mut self, name: &str) {
        if !self.nodes.iter().any(|node| node.name == name) {
            self.nodes.push(NodeSpec::new(name));
        }
    }

    pub fn add_link(
        &mut self,
        source: impl Into<NodeRef>,
        target: impl Into<NodeRef>,
        value: f32,
    ) -> &mut Self {
        self.links.push(LinkSpec::new(source, target, value));
        self
    }
}

#[derive(Debug, Deserialize)]
struct GraphFile {
    nodes: Option<Vec<NodeSpec>>,
    #[serde(default)]
    links: Vec<LinkSpec>,
}

pub fn parse_graph_spec(input: &str) -> Result<GraphSpec> {
    let parsed: GraphFile = json5::from_str(input)?;
    let graph = match parsed.nodes {
        Some(nodes) => GraphSpec {
            nodes,
            links: parsed.links,
        },
        None => GraphSpec::from_links(parsed.links),
    };
    Ok(graph)
}
