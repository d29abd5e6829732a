//! Presentation config loaded from TOML
//!
//! ```toml
//! [chart]
//! title = "Q3 Look-Ahead: Finish vs Duration Variance"
//! height = 800
//! marker_radius = 6.0
//! opacity = 0.6
//!
//! [excel]
//! autofit = false
//! ```
//!
//! Every key is optional; unset keys keep the renderer defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::{ExcelRenderer, HtmlScatterRenderer};

/// Config loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub chart: ChartConfig,
    pub excel: ExcelConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub title: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub marker_radius: Option<f64>,
    pub opacity: Option<f64>,
    pub interactive: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExcelConfig {
    pub autofit: Option<bool>,
}

impl RenderConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Chart renderer with the configured overrides applied
    pub fn scatter_renderer(&self) -> HtmlScatterRenderer {
        let chart = &self.chart;
        let mut renderer = HtmlScatterRenderer::new();
        if let Some(title) = &chart.title {
            renderer = renderer.title(title.as_str());
        }
        if let Some(width) = chart.width {
            renderer = renderer.width(width);
        }
        if let Some(height) = chart.height {
            renderer = renderer.height(height);
        }
        if let Some(radius) = chart.marker_radius {
            renderer = renderer.marker_radius(radius);
        }
        if let Some(opacity) = chart.opacity {
            renderer = renderer.opacity(opacity);
        }
        if chart.interactive == Some(false) {
            renderer = renderer.static_chart();
        }
        renderer
    }

    pub fn excel_renderer(&self) -> ExcelRenderer {
        let mut renderer = ExcelRenderer::new();
        if self.excel.autofit == Some(false) {
            renderer = renderer.no_autofit();
        }
        renderer
    }
}
