use crate::config::{Config, load_config};
use crate::ir::parse_graph_spec;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sankey", version, about = "Sankey flow layout solver")]
pub struct Args {
    /// Input graph (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output layout JSON. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file (nodeWidth, nodePadding, size, iterations, curvature)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Chart width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Chart height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Node thickness in pixels
    #[arg(long = "nodeWidth")]
    pub node_width: Option<f32>,

    /// Minimum vertical gap between nodes of one column
    #[arg(long = "nodePadding")]
    pub node_padding: Option<f32>,

    /// Relaxation rounds
    #[arg(long = "iterations")]
    pub iterations: Option<usize>,

    /// Link ribbon curvature in [0, 1]
    #[arg(long = "curvature")]
    pub curvature: Option<f32>,

    /// Emit single-line JSON
    #[arg(long = "compact")]
    pub compact: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(v) = self.width {
            config.layout.size[0] = v;
        }
        if let Some(v) = self.height {
            config.layout.size[1] = v;
        }
        if let Some(v) = self.node_width {
            config.layout.node_width = v;
        }
        if let Some(v) = self.node_padding {
            config.layout.node_padding = v;
        }
        if let Some(v) = self.iterations {
            config.layout.iterations = v;
        }
        if let Some(v) = self.curvature {
            config.render.curvature = v;
        }
    }
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut config);

    let input = read_input(args.input.as_deref())?;
    let spec = parse_graph_spec(&input)?;
    if spec.links.is_empty() && spec.nodes.is_empty() {
        return Err(anyhow::anyhow!("No nodes or links found in input"));
    }
    let graph = compute_layout(&spec, &config.layout)?;
    write_layout_dump(
        args.output.as_deref(),
        &graph,
        config.render.curvature,
        !args.compact,
    )?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
