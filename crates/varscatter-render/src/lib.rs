//! # varscatter-render
//!
//! Rendering backends for cleaned activity sets.
//!
//! This crate provides:
//! - Interactive HTML scatter chart rendering (inline SVG)
//! - Excel export with one sheet per total float bucket
//! - Plain-text statistics summary
//! - TOML presentation config
//!
//! ## Example
//!
//! ```rust,ignore
//! use varscatter_core::Renderer;
//! use varscatter_render::{ExcelRenderer, HtmlScatterRenderer, SummaryRenderer};
//!
//! // Interactive HTML chart
//! let html = HtmlScatterRenderer::new().render(&activities)?;
//! std::fs::write("interactive_scatter_plot.html", html)?;
//!
//! // Categorized workbook
//! let xlsx_bytes = ExcelRenderer::new().render(&activities)?;
//! std::fs::write("interactive_scatter_plot_categories.xlsx", xlsx_bytes)?;
//!
//! // Console report
//! println!("{}", SummaryRenderer::new().render(&activities)?);
//! ```

pub mod config;
pub mod excel;
pub mod scatter;
pub mod summary;

pub use config::{ChartConfig, ConfigError, ExcelConfig, RenderConfig};
pub use excel::ExcelRenderer;
pub use scatter::HtmlScatterRenderer;
pub use summary::SummaryRenderer;

/// HTML-escape a string
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escape_works() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("0 < Total Float ≤ 10"), "0 &lt; Total Float ≤ 10");
        assert_eq!(html_escape("say \"hi\""), "say &quot;hi&quot;");
    }
}
