use sankey_layout::{Config, layout_json};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SankeyOptions {
    node_width: Option<f32>,
    node_padding: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
    iterations: Option<usize>,
    curvature: Option<f32>,
    pretty: Option<bool>,
}

fn build_config(options: &SankeyOptions) -> Config {
    let mut config = Config::default();
    if let Some(v) = options.node_width {
        config.layout.node_width = v;
    }
    if let Some(v) = options.node_padding {
        config.layout.node_padding = v;
    }
    if let Some(v) = options.width {
        config.layout.size[0] = v;
    }
    if let Some(v) = options.height {
        config.layout.size[1] = v;
    }
    if let Some(v) = options.iterations {
        config.layout.iterations = v;
    }
    if let Some(v) = options.curvature {
        config.render.curvature = v;
    }
    config
}

fn layout_with_options(graph_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let options = match options_json {
        Some(raw) => serde_json::from_str::<SankeyOptions>(raw).map_err(|error| error.to_string())?,
        None => SankeyOptions::default(),
    };
    let config = build_config(&options);
    layout_json(graph_json, &config, options.pretty.unwrap_or(false))
        .map_err(|error| error.to_string())
}

/// Lays out a JSON graph and returns the layout dump as JSON.
#[wasm_bindgen]
pub fn layout_sankey(graph_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    layout_with_options(graph_json, options_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}
