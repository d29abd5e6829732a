//! Interactive HTML Scatter Chart Renderer
//!
//! Generates a standalone HTML file with an embedded SVG scatter plot.
//! Features:
//! - Finish date variance (x) against duration variance (y)
//! - Points colored by total float bucket, legend in threshold order
//! - Dashed reference lines through zero spanning the observed data
//! - Quadrant name annotations near the plot corners
//! - Summary box with total and per-bucket counts
//! - Hover tooltips and click-to-toggle legend entries

use svg::node::element::{Circle, Group, Line, Rectangle, Text};
use svg::Document;
use varscatter_core::{
    format_number, ActivitySet, Bucket, Quadrant, RenderError, Renderer, ValueRange,
};

use crate::html_escape;

pub const DEFAULT_TITLE: &str =
    "Interactive Scatter Plot: Finish Date Variation vs. Duration Variation";
pub const X_AXIS_LABEL: &str = "Variation - BL Project Finish Date";
pub const Y_AXIS_LABEL: &str = "Variation - BL Project Duration";
pub const LEGEND_TITLE: &str = "Categories by Total Float";

/// HTML scatter chart renderer configuration
#[derive(Clone, Debug)]
pub struct HtmlScatterRenderer {
    /// Chart title
    pub title: String,
    /// Total SVG width in pixels
    pub width: u32,
    /// Total SVG height in pixels
    pub height: u32,
    /// Space around the plot area for ticks and axis titles
    pub margin: u32,
    /// Marker radius in pixels
    pub marker_radius: f64,
    /// Marker fill opacity (0.0 - 1.0)
    pub opacity: f64,
    /// Enable interactivity (tooltips, legend toggling)
    pub interactive: bool,
    pub grid_color: String,
    pub reference_line_color: String,
    pub marker_outline_color: String,
    pub text_color: String,
    pub font_family: String,
}

impl Default for HtmlScatterRenderer {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
            width: 1000,
            height: 700,
            margin: 70,
            marker_radius: 5.0,
            opacity: 0.7,
            interactive: true,
            grid_color: "lightgray".into(),
            reference_line_color: "gray".into(),
            marker_outline_color: "DarkSlateGrey".into(),
            text_color: "black".into(),
            font_family: "Arial, sans-serif".into(),
        }
    }
}

impl HtmlScatterRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn marker_radius(mut self, radius: f64) -> Self {
        self.marker_radius = radius;
        self
    }

    /// Set marker opacity, clamped to 0.0 - 1.0
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Disable interactivity
    pub fn static_chart(mut self) -> Self {
        self.interactive = false;
        self
    }

    fn plot_area(&self, activities: &ActivitySet) -> Result<PlotArea, RenderError> {
        let margin = f64::from(self.margin);
        let width = f64::from(self.width) - 2.0 * margin;
        let height = f64::from(self.height) - 2.0 * margin;
        if width <= 0.0 || height <= 0.0 {
            return Err(RenderError::InvalidData(format!(
                "Chart size {}x{} leaves no room for the plot",
                self.width, self.height
            )));
        }

        let finish = ValueRange::from_values(activities.iter().map(|a| a.finish_variance));
        let duration = ValueRange::from_values(activities.iter().map(|a| a.duration_variance));

        Ok(PlotArea {
            left: margin,
            top: margin,
            width,
            height,
            x: Axis::around(finish),
            y: Axis::around(duration),
            finish,
            duration,
        })
    }

    /// Generate the complete HTML document
    fn generate_html(&self, activities: &ActivitySet) -> Result<String, RenderError> {
        let plot = self.plot_area(activities)?;
        let svg_content = self.generate_svg(activities, &plot).to_string();
        let css = self.generate_css();
        let js = if self.interactive {
            self.generate_js(activities)?
        } else {
            String::new()
        };

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <div class="scatter-container">
        <h1>{title}</h1>
        <div class="scatter-body">
            <div class="scatter-wrapper">
{svg_content}
            </div>
            <div class="scatter-side">
{legend}
{summary}
            </div>
        </div>
        <div id="tooltip" class="tooltip"></div>
    </div>
    <script>
{js}
    </script>
</body>
</html>"#,
            title = html_escape(&self.title),
            css = css,
            svg_content = svg_content,
            legend = self.render_legend(activities),
            summary = render_summary_box(activities),
            js = js,
        ))
    }

    /// Build the SVG document
    fn generate_svg(&self, activities: &ActivitySet, plot: &PlotArea) -> Document {
        let mut document = Document::new()
            .set("id", "scatter-svg")
            .set("width", self.width)
            .set("height", self.height)
            .set("viewBox", (0, 0, self.width, self.height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", "white");
        document = document.add(background);

        document = document.add(self.render_grid(plot));
        document = document.add(self.render_reference_lines(plot));
        document = document.add(self.render_points(activities, plot));
        document = document.add(self.render_quadrant_labels(plot));
        document.add(self.render_axis_titles(plot))
    }

    /// Grid lines, tick labels and the plot frame
    fn render_grid(&self, plot: &PlotArea) -> Group {
        let mut group = Group::new().set("class", "grid");
        let bottom = plot.top + plot.height;
        let right = plot.left + plot.width;

        for tick in plot.x.ticks() {
            let x = plot.px(tick);
            group = group.add(
                Line::new()
                    .set("x1", x)
                    .set("y1", plot.top)
                    .set("x2", x)
                    .set("y2", bottom)
                    .set("stroke", self.grid_color.as_str())
                    .set("stroke-width", 1),
            );
            group = group.add(
                Text::new(tick_label(tick))
                    .set("x", x)
                    .set("y", bottom + 18.0)
                    .set("text-anchor", "middle")
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", 11)
                    .set("fill", self.text_color.as_str()),
            );
        }

        for tick in plot.y.ticks() {
            let y = plot.py(tick);
            group = group.add(
                Line::new()
                    .set("x1", plot.left)
                    .set("y1", y)
                    .set("x2", right)
                    .set("y2", y)
                    .set("stroke", self.grid_color.as_str())
                    .set("stroke-width", 1),
            );
            group = group.add(
                Text::new(tick_label(tick))
                    .set("x", plot.left - 8.0)
                    .set("y", y + 4.0)
                    .set("text-anchor", "end")
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", 11)
                    .set("fill", self.text_color.as_str()),
            );
        }

        let frame = Rectangle::new()
            .set("x", plot.left)
            .set("y", plot.top)
            .set("width", plot.width)
            .set("height", plot.height)
            .set("fill", "none")
            .set("stroke", self.grid_color.as_str());
        group.add(frame)
    }

    /// Dashed lines through x=0 and y=0 across the observed data range
    fn render_reference_lines(&self, plot: &PlotArea) -> Group {
        let mut group = Group::new().set("class", "reference-lines");
        let (Some(finish), Some(duration)) = (plot.finish, plot.duration) else {
            return group;
        };

        let horizontal = Line::new()
            .set("class", "reference-line horizontal")
            .set("x1", plot.px(finish.min))
            .set("y1", plot.py(0.0))
            .set("x2", plot.px(finish.max))
            .set("y2", plot.py(0.0))
            .set("stroke", self.reference_line_color.as_str())
            .set("stroke-width", 1.5)
            .set("stroke-dasharray", "6,4");
        group = group.add(horizontal);

        let vertical = Line::new()
            .set("class", "reference-line vertical")
            .set("x1", plot.px(0.0))
            .set("y1", plot.py(duration.min))
            .set("x2", plot.px(0.0))
            .set("y2", plot.py(duration.max))
            .set("stroke", self.reference_line_color.as_str())
            .set("stroke-width", 1.5)
            .set("stroke-dasharray", "6,4");
        group.add(vertical)
    }

    /// One layer per bucket in legend order, points in input order
    fn render_points(&self, activities: &ActivitySet, plot: &PlotArea) -> Group {
        let mut group = Group::new().set("class", "points");

        for bucket in Bucket::ALL {
            let mut layer = Group::new()
                .set("class", format!("bucket-layer bucket-{}", bucket.slug()))
                .set("data-bucket", bucket.slug());

            for (index, activity) in activities.iter().enumerate() {
                if activity.bucket() != bucket {
                    continue;
                }
                let point = Circle::new()
                    .set("class", "point")
                    .set("data-index", index)
                    .set("cx", plot.px(activity.finish_variance))
                    .set("cy", plot.py(activity.duration_variance))
                    .set("r", self.marker_radius)
                    .set("fill", bucket.color())
                    .set("fill-opacity", self.opacity)
                    .set("stroke", self.marker_outline_color.as_str())
                    .set("stroke-width", 1);
                layer = layer.add(point);
            }

            group = group.add(layer);
        }

        group
    }

    /// Quadrant names at 90% of the observed extremes, see `annotation_anchor`
    fn render_quadrant_labels(&self, plot: &PlotArea) -> Group {
        let mut group = Group::new().set("class", "quadrant-labels");
        let (Some(finish), Some(duration)) = (plot.finish, plot.duration) else {
            return group;
        };

        for quadrant in Quadrant::ALL {
            let (x, y) = annotation_anchor(quadrant, finish, duration);
            let (cx, cy) = (plot.px(x), plot.py(y));
            let label = quadrant.label();
            let box_width = label.len() as f64 * 6.5 + 12.0;

            group = group.add(
                Rectangle::new()
                    .set("x", cx - box_width / 2.0)
                    .set("y", cy - 11.0)
                    .set("width", box_width)
                    .set("height", 20)
                    .set("fill", "white")
                    .set("fill-opacity", 0.7)
                    .set("stroke", "black")
                    .set("stroke-width", 1),
            );
            group = group.add(
                Text::new(label)
                    .set("class", "quadrant-label")
                    .set("x", cx)
                    .set("y", cy + 4.0)
                    .set("text-anchor", "middle")
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", 12)
                    .set("fill", self.text_color.as_str()),
            );
        }

        group
    }

    fn render_axis_titles(&self, plot: &PlotArea) -> Group {
        let x_title = Text::new(X_AXIS_LABEL)
            .set("x", plot.left + plot.width / 2.0)
            .set("y", plot.top + plot.height + 45.0)
            .set("text-anchor", "middle")
            .set("font-family", self.font_family.as_str())
            .set("font-size", 14)
            .set("fill", self.text_color.as_str());

        let y_center = plot.top + plot.height / 2.0;
        let y_x = plot.left - 50.0;
        let y_title = Text::new(Y_AXIS_LABEL)
            .set("x", y_x)
            .set("y", y_center)
            .set("text-anchor", "middle")
            .set("transform", format!("rotate(-90 {y_x} {y_center})"))
            .set("font-family", self.font_family.as_str())
            .set("font-size", 14)
            .set("fill", self.text_color.as_str());

        Group::new()
            .set("class", "axis-titles")
            .add(x_title)
            .add(y_title)
    }

    fn render_legend(&self, activities: &ActivitySet) -> String {
        let counts = activities.bucket_counts();
        let mut html = String::from("                <div class=\"scatter-legend\">\n");
        html.push_str(&format!(
            "                    <div class=\"legend-title\">{}</div>\n",
            html_escape(LEGEND_TITLE)
        ));
        for bucket in Bucket::ALL {
            html.push_str(&format!(
                "                    <div class=\"legend-item\" data-bucket=\"{slug}\" title=\"{count} activities\"><span class=\"legend-dot\" style=\"background: {color}\"></span>{label}</div>\n",
                slug = bucket.slug(),
                count = counts[bucket.index()],
                color = bucket.color(),
                label = html_escape(bucket.label()),
            ));
        }
        html.push_str("                </div>");
        html
    }

    /// Generate CSS styles
    fn generate_css(&self) -> String {
        format!(
            r#"        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: {font};
            background: white;
            color: {text};
            padding: 20px;
        }}
        .scatter-container {{
            max-width: 100%;
        }}
        .scatter-container h1 {{
            font-size: 16px;
            font-weight: normal;
            text-align: center;
            margin-bottom: 12px;
        }}
        .scatter-body {{
            display: flex;
            gap: 16px;
            align-items: flex-start;
        }}
        .scatter-wrapper {{
            overflow-x: auto;
        }}
        .scatter-wrapper svg {{
            max-width: 100%;
            height: auto;
        }}
        .scatter-side {{
            display: flex;
            flex-direction: column;
            gap: 16px;
            min-width: 200px;
        }}
        .scatter-legend {{
            border: 1px solid gray;
            background: rgba(255, 255, 255, 0.8);
            padding: 8px 12px;
            font-size: 13px;
        }}
        .legend-title {{
            margin-bottom: 6px;
        }}
        .legend-item {{
            display: flex;
            align-items: center;
            gap: 6px;
            padding: 2px 0;
            cursor: pointer;
            user-select: none;
        }}
        .legend-item.hidden {{
            opacity: 0.4;
        }}
        .legend-dot {{
            width: 10px;
            height: 10px;
            border-radius: 50%;
            border: 1px solid {outline};
        }}
        .summary-box {{
            border: 1px solid gray;
            background: white;
            opacity: 0.8;
            padding: 8px 12px;
            font-size: 10px;
            line-height: 1.5;
        }}
        .bucket-layer.hidden {{
            display: none;
        }}
        .point {{
            cursor: pointer;
        }}
        .point:hover {{
            stroke-width: 2;
        }}
        .tooltip {{
            position: fixed;
            background: rgba(255, 255, 255, 0.95);
            color: {text};
            border: 1px solid gray;
            padding: 8px 10px;
            border-radius: 4px;
            font-size: 12px;
            pointer-events: none;
            opacity: 0;
            transition: opacity 0.15s;
            z-index: 1000;
            max-width: 420px;
        }}
        .tooltip.visible {{
            opacity: 1;
        }}"#,
            font = self.font_family,
            text = self.text_color,
            outline = self.marker_outline_color,
        )
    }

    /// Generate JavaScript for tooltips and legend toggling
    fn generate_js(&self, activities: &ActivitySet) -> Result<String, RenderError> {
        let tooltips: Vec<String> = activities
            .iter()
            .map(|a| {
                a.tooltip_lines()
                    .iter()
                    .map(|line| html_escape(line))
                    .collect::<Vec<_>>()
                    .join("<br>")
            })
            .collect();
        let point_data = serde_json::to_string(&tooltips)
            .map_err(|e| RenderError::Format(format!("Failed to encode tooltips: {e}")))?
            .replace("</", "<\\/");

        Ok(format!(
            r#"        const pointData = {point_data};

        // Tooltip functionality
        const tooltip = document.getElementById('tooltip');

        document.querySelectorAll('.point').forEach(point => {{
            point.addEventListener('mouseenter', () => {{
                const text = pointData[Number(point.getAttribute('data-index'))];
                if (text !== undefined) {{
                    tooltip.innerHTML = text;
                    tooltip.classList.add('visible');
                }}
            }});

            point.addEventListener('mousemove', (e) => {{
                tooltip.style.left = (e.clientX + 15) + 'px';
                tooltip.style.top = (e.clientY + 15) + 'px';
            }});

            point.addEventListener('mouseleave', () => {{
                tooltip.classList.remove('visible');
            }});
        }});

        // Click a legend entry to hide or show its bucket
        document.querySelectorAll('.legend-item').forEach(item => {{
            item.addEventListener('click', () => {{
                const bucket = item.getAttribute('data-bucket');
                const layer = document.querySelector(`.bucket-layer[data-bucket="${{bucket}}"]`);
                item.classList.toggle('hidden');
                if (layer) layer.classList.toggle('hidden');
            }});
        }});"#
        ))
    }
}

impl Renderer for HtmlScatterRenderer {
    type Output = String;

    fn render(&self, activities: &ActivitySet) -> Result<String, RenderError> {
        self.generate_html(activities)
    }
}

/// Summary box: total activities followed by per-bucket counts
fn render_summary_box(activities: &ActivitySet) -> String {
    let counts = activities.bucket_counts();
    let mut html = String::from("                <div class=\"summary-box\" id=\"summary\">\n");
    html.push_str(&format!(
        "                    <div><b>Total activities:</b> {}</div>\n",
        activities.len()
    ));
    for bucket in Bucket::ALL {
        html.push_str(&format!(
            "                    <div><b>{}:</b> {}</div>\n",
            html_escape(bucket.label()),
            counts[bucket.index()]
        ));
    }
    html.push_str("                </div>");
    html
}

/// Plot area geometry and data extents
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x: Axis,
    y: Axis,
    /// Observed finish variance range (`None` for an empty set)
    finish: Option<ValueRange>,
    /// Observed duration variance range
    duration: Option<ValueRange>,
}

impl PlotArea {
    fn px(&self, value: f64) -> f64 {
        self.left + (value / 2.0 - self.x.min / 2.0) / self.x.half_span() * self.width
    }

    fn py(&self, value: f64) -> f64 {
        self.top + (self.y.max / 2.0 - value / 2.0) / self.y.half_span() * self.height
    }
}

/// Data position of a quadrant annotation.
///
/// Corners follow the baseline-minus-current reading used by P6 exports:
/// "Earlier and shorter" sits top right and "Later and longer" bottom left.
/// This is independent of `Quadrant::from_variances`, which classifies points
/// by the sign of the variance values.
fn annotation_anchor(quadrant: Quadrant, finish: ValueRange, duration: ValueRange) -> (f64, f64) {
    let x = if quadrant.is_earlier() {
        finish.max
    } else {
        finish.min
    };
    let y = if quadrant.is_shorter() {
        duration.max
    } else {
        duration.min
    };
    (x * 0.9, y * 0.9)
}

/// Displayed axis range
#[derive(Clone, Copy, Debug, PartialEq)]
struct Axis {
    min: f64,
    max: f64,
}

impl Axis {
    /// Observed range widened to include zero, padded by 5% per side.
    /// Falls back to [-1, 1] without data. Bounds saturate at the finite
    /// `f64` limits.
    fn around(range: Option<ValueRange>) -> Self {
        let Some(range) = range else {
            return Axis { min: -1.0, max: 1.0 };
        };
        let low = range.min.min(0.0);
        let high = range.max.max(0.0);
        let half_span = high / 2.0 - low / 2.0;
        let pad = if half_span > 0.0 { half_span * 0.1 } else { 1.0 };
        Axis {
            min: (low - pad).max(f64::MIN),
            max: (high + pad).min(f64::MAX),
        }
    }

    /// Half the axis length; never overflows for finite bounds
    fn half_span(&self) -> f64 {
        self.max / 2.0 - self.min / 2.0
    }

    fn ticks(&self) -> Vec<f64> {
        let step = nice_step(self.half_span() / 4.0);
        let mut ticks = Vec::new();
        let mut tick = (self.min / step).ceil() * step;
        while tick <= self.max + step * 1e-9 && ticks.len() < 100 {
            ticks.push(tick);
            tick += step;
        }
        ticks
    }
}

/// Round a raw step up to 1, 2 or 5 times a power of ten
fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn tick_label(value: f64) -> String {
    let rounded = (value * 1e9).round() / 1e9;
    let rounded = if rounded.is_finite() { rounded } else { value };
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format_number(rounded)
    }
}
