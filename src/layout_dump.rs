use crate::config::Config;
use crate::layout::SankeyGraph;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub node_width: f32,
    pub node_padding: f32,
    pub iterations: usize,
    pub max_rank: usize,
    pub ky: f32,
    pub nodes: Vec<NodeDump>,
    pub links: Vec<LinkDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub name: String,
    pub rank: usize,
    pub value: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct LinkDump {
    pub source: String,
    pub target: String,
    pub value: f32,
    pub dy: f32,
    pub sy: f32,
    pub ty: f32,
    pub path: String,
}

impl LayoutDump {
    pub fn from_graph(graph: &SankeyGraph, curvature: f32) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| NodeDump {
                name: node.name.clone(),
                rank: node.rank,
                value: node.value,
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
            })
            .collect();

        let links = graph
            .link_ids()
            .map(|id| {
                let link = graph.link(id);
                LinkDump {
                    source: graph.node(link.source).name.clone(),
                    target: graph.node(link.target).name.clone(),
                    value: link.value,
                    dy: link.dy,
                    sy: link.sy,
                    ty: link.ty,
                    path: graph.link_path(id, curvature).to_svg_path(),
                }
            })
            .collect();

        let params = graph.params();
        LayoutDump {
            width: params.width(),
            height: params.height(),
            node_width: params.node_width,
            node_padding: params.node_padding,
            iterations: params.iterations,
            max_rank: graph.max_rank(),
            ky: graph.ky(),
            nodes,
            links,
        }
    }

    pub fn to_json(&self, pretty: bool) -> anyhow::Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

pub fn layout_json(input: &str, config: &Config, pretty: bool) -> anyhow::Result<String> {
    let spec = crate::ir::parse_graph_spec(input)?;
    let graph = crate::layout::compute_layout(&spec, &config.layout)?;
    LayoutDump::from_graph(&graph, config.render.curvature).to_json(pretty)
}

pub fn write_layout_dump(
    path: Option<&Path>,
    graph: &SankeyGraph,
    curvature: f32,
    pretty: bool,
) -> anyhow::Result<()> {
    let dump = LayoutDump::from_graph(graph, curvature);
    match path {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            write_json(writer, &dump, pretty)
        }
        None => write_json(io::stdout().lock(), &dump, pretty),
    }
}

fn write_json<W: Write>(mut writer: W, dump: &LayoutDump, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, dump)?;
    } else {
        serde_json::to_writer(&mut writer, dump)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dumps_camel_case_fields() {
        let input = r#"{"links": [{"source": "A", "target": "B", "value": 2}]}"#;
        let json = layout_json(input, &Config::default(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["maxRank"], 1);
        assert_eq!(value["nodeWidth"], 24.0);
        assert_eq!(value["nodes"][0]["name"], "A");
        assert_eq!(value["links"][0]["target"], "B");
        assert!(value["links"][0]["path"].as_str().unwrap().starts_with('M'));
    }

    #[test]
    fn layout_errors_propagate() {
        let input = r#"{"nodes": [{"name": "A"}], "links": [{"source": "A", "target": "B", "value": 1}]}"#;
        let err = layout_json(input, &Config::default(), true).unwrap_err();
        assert!(err.to_string().contains("unknown node"));
    }

    #[test]
    fn writes_dump_file() {
        let input = r#"{"links": [{"source": "A", "target": "B", "value": 2}]}"#;
        let spec = crate::ir::parse_graph_spec(input).unwrap();
        let graph = crate::layout::compute_layout(&spec, &Default::default()).unwrap();
        let path = std::env::temp_dir().join(format!("sankey-dump-{}.json", std::process::id()));
        write_layout_dump(Some(&path), &graph, 0.5, true).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"ky\""));
        std::fs::remove_file(&path).ok();
    }
}
