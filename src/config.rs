use crate::layout::LayoutError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CURVATURE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutParams {
    pub node_width: f32,
    pub node_padding: f32,
    /// `[width, height]` of the chart area.
    pub size: [f32; 2],
    pub iterations: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            node_width: 24.0,
            node_padding: 8.0,
            size: [960.0, 500.0],
            iterations: 32,
        }
    }
}

impl LayoutParams {
    pub fn width(&self) -> f32 {
        self.size[0]
    }

    pub fn height(&self) -> f32 {
        self.size[1]
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let invalid = |reason: String| Err(LayoutError::InvalidParams { reason });
        if !self.node_width.is_finite() || self.node_width < 0.0 {
            return invalid(format!("nodeWidth must be >= 0, got {}", self.node_width));
        }
        if !self.node_padding.is_finite() || self.node_padding < 0.0 {
            return invalid(format!(
                "nodePadding must be >= 0, got {}",
                self.node_padding
            ));
        }
        let [width, height] = self.size;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return invalid(format!("size must be positive, got [{width}, {height}]"));
        }
        if self.node_width > width {
            return invalid(format!(
                "nodeWidth {} exceeds chart width {width}",
                self.node_width
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Horizontal pull of the link ribbon control points, 0 gives straight
    /// bands and 1 pushes the bends onto the opposite node.
    pub curvature: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            curvature: DEFAULT_CURVATURE,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: LayoutParams,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    node_width: Option<f32>,
    node_padding: Option<f32>,
    size: Option<[f32; 2]>,
    width: Option<f32>,
    height: Option<f32>,
    iterations: Option<usize>,
    curvature: Option<f32>,
}

impl ConfigFile {
    fn apply(self, config: &mut Config) {
        if let Some(v) = self.node_width {
            config.layout.node_width = v;
        }
        if let Some(v) = self.node_padding {
            config.layout.node_padding = v;
        }
        if let Some(v) = self.size {
            config.layout.size = v;
        }
        if let Some(v) = self.width {
            config.layout.size[0] = v;
        }
        if let Some(v) = self.height {
            config.layout.size[1] = v;
        }
        if let Some(v) = self.iterations {
            config.layout.iterations = v;
        }
        if let Some(v) = self.curvature {
            config.render.curvature = v;
        }
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    parsed.apply(&mut config);
    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = LayoutParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.iterations, 32);
        assert_eq!(params.node_width, 24.0);
    }

    #[test]
    fn rejects_bad_params() {
        let cases = [
            LayoutParams {
                node_width: -1.0,
                ..Default::default()
            },
            LayoutParams {
                node_padding: f32::NAN,
                ..Default::default()
            },
            LayoutParams {
                size: [0.0, 100.0],
                ..Default::default()
            },
            LayoutParams {
                node_width: 50.0,
                size: [40.0, 100.0],
                ..Default::default()
            },
        ];
        for params in cases {
            assert!(
                matches!(params.validate(), Err(LayoutError::InvalidParams { .. })),
                "{params:?}"
            );
        }
    }

    #[test]
    fn params_deserialize_with_partial_fields() {
        let params: LayoutParams =
            serde_json::from_str(r#"{"nodeWidth": 10, "size": [300, 200]}"#).unwrap();
        assert_eq!(params.node_width, 10.0);
        assert_eq!(params.size, [300.0, 200.0]);
        assert_eq!(params.node_padding, 8.0);
        assert_eq!(params.iterations, 32);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("sankey-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(
            &path,
            r#"{"nodePadding": 12, "height": 640, "iterations": 4, "curvature": 0.3}"#,
        )
        .unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.layout.node_padding, 12.0);
        assert_eq!(config.layout.size, [960.0, 640.0]);
        assert_eq!(config.layout.iterations, 4);
        assert_eq!(config.render.curvature, 0.3);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_path_gives_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout, LayoutParams::default());
        assert_eq!(config.render.curvature, DEFAULT_CURVATURE);
    }
}
