//! Minimal SVG rendering for the three audit charts.

use std::f64::consts::PI;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 80.0;
const Y_TICKS: usize = 5;

const BAR_PALETTE: [&str; 5] = ["#440154", "#3b528b", "#21918c", "#5ec962", "#fde725"];
const SERIES_PALETTE: [&str; 2] = ["#4c72b0", "#dd8452"];
const PIE_PALETTE: [&str; 3] = ["#ff9999", "#66b3ff", "#99ff99"];

/// A labelled value.
#[derive(Debug, Clone, PartialEq)]
pub struct Datum {
    /// The category label.
    pub label: String,
    /// The value.
    pub value: f64,
}

impl Datum {
    /// Creates a datum.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A named series of a grouped bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend name.
    pub name: String,
    /// One value per category.
    pub values: Vec<f64>,
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Formats an amount with thousands separators and two decimals.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

struct Canvas {
    body: String,
}

impl Canvas {
    fn new(title: &str) -> Self {
        let mut body = String::new();
        body.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
        ));
        body.push_str(&format!(
            r##"<rect width="100%" height="100%" fill="#ffffff"/><text x="{}" y="32" text-anchor="middle" font-size="18" font-weight="bold">{}</text>"##,
            WIDTH / 2.0,
            escape(title)
        ));
        Self { body }
    }

    fn text(&mut self, x: f64, y: f64, anchor: &str, size: u32, content: &str) {
        self.body.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" text-anchor="{anchor}" font-size="{size}">{}</text>"#,
            escape(content)
        ));
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) {
        self.body.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{width:.1}" height="{height:.1}" fill="{fill}"/>"#
        ));
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
        self.body.push_str(&format!(
            r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{stroke}"/>"#
        ));
    }

    fn finish(mut self) -> String {
        self.body.push_str("</svg>\n");
        self.body
    }
}

fn plot_area() -> (f64, f64, f64, f64) {
    (
        MARGIN_LEFT,
        MARGIN_TOP,
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
    )
}

fn axis_max(max: f64) -> f64 {
    if max <= 0.0 { 1.0 } else { max * 1.1 }
}

/// Draws gridlines, y tick labels and axis titles. Returns the y scale.
fn draw_axes(canvas: &mut Canvas, max: f64, x_label: &str, y_label: &str) -> f64 {
    let (left, top, width, height) = plot_area();
    let top_value = axis_max(max);
    let scale = height / top_value;

    for tick in 0..=Y_TICKS {
        let value = top_value * tick as f64 / Y_TICKS as f64;
        let y = top + height - value * scale;
        canvas.line(left, y, left + width, y, "#e0e0e0");
        canvas.text(left - 8.0, y + 4.0, "end", 11, &format_currency(value));
    }
    canvas.line(left, top + height, left + width, top + height, "#333333");
    canvas.text(left + width / 2.0, HEIGHT - 20.0, "middle", 14, x_label);
    canvas.body.push_str(&format!(
        r#"<text x="18" y="{:.1}" text-anchor="middle" font-size="14" transform="rotate(-90 18 {:.1})">{}</text>"#,
        top + height / 2.0,
        top + height / 2.0,
        escape(y_label)
    ));
    scale
}

/// Renders a bar chart with a value label above each bar.
pub fn bar_chart(title: &str, x_label: &str, y_label: &str, data: &[Datum]) -> String {
    let mut canvas = Canvas::new(title);
    let max = data.iter().map(|d| d.value).fold(0.0, f64::max);
    let scale = draw_axes(&mut canvas, max, x_label, y_label);

    let (left, top, width, height) = plot_area();
    let slot = width / data.len().max(1) as f64;
    let bar_width = slot * 0.6;

    for (i, datum) in data.iter().enumerate() {
        let bar_height = datum.value.max(0.0) * scale;
        let x = left + slot * i as f64 + (slot - bar_width) / 2.0;
        let y = top + height - bar_height;
        canvas.rect(x, y, bar_width, bar_height, BAR_PALETTE[i % BAR_PALETTE.len()]);
        canvas.text(x + bar_width / 2.0, y - 6.0, "middle", 12, &format_currency(datum.value));
        canvas.text(x + bar_width / 2.0, top + height + 20.0, "middle", 12, &datum.label);
    }

    canvas.finish()
}

/// Renders side-by-side bars per category with a legend.
pub fn grouped_bar_chart(
    title: &str,
    x_label: &str,
    y_label: &str,
    categories: &[String],
    series: &[Series],
) -> String {
    let mut canvas = Canvas::new(title);
    let max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0, f64::max);
    let scale = draw_axes(&mut canvas, max, x_label, y_label);

    let (left, top, width, height) = plot_area();
    let slot = width / categories.len().max(1) as f64;
    let group_width = slot * 0.8;
    let bar_width = group_width / series.len().max(1) as f64;

    for (c, category) in categories.iter().enumerate() {
        let group_x = left + slot * c as f64 + (slot - group_width) / 2.0;
        for (s, values) in series.iter().enumerate() {
            let value = values.values.get(c).copied().unwrap_or_default().max(0.0);
            let bar_height = value * scale;
            canvas.rect(
                group_x + bar_width * s as f64,
                top + height - bar_height,
                bar_width,
                bar_height,
                SERIES_PALETTE[s % SERIES_PALETTE.len()],
            );
        }
        canvas.text(group_x + group_width / 2.0, top + height + 20.0, "middle", 12, category);
    }

    for (s, values) in series.iter().enumerate() {
        let y = top + 10.0 + 20.0 * s as f64;
        canvas.rect(left + width - 130.0, y - 10.0, 12.0, 12.0, SERIES_PALETTE[s % SERIES_PALETTE.len()]);
        canvas.text(left + width - 112.0, y, "start", 12, &values.name);
    }

    canvas.finish()
}

/// Renders a pie starting at twelve o'clock with percentage labels and a legend.
pub fn pie_chart(title: &str, data: &[Datum]) -> String {
    let mut canvas = Canvas::new(title);
    let total: f64 = data.iter().map(|d| d.value.max(0.0)).sum();
    let (cx, cy, radius) = (WIDTH / 2.0 - 80.0, HEIGHT / 2.0 + 20.0, 170.0);

    let point = |angle: f64, r: f64| (cx + r * angle.cos(), cy + r * angle.sin());
    let mut angle = -PI / 2.0;

    for (i, datum) in data.iter().enumerate() {
        if total <= 0.0 {
            break;
        }
        let fraction = datum.value.max(0.0) / total;
        if fraction <= 0.0 {
            continue;
        }
        let colour = PIE_PALETTE[i % PIE_PALETTE.len()];
        let sweep = fraction * 2.0 * PI;

        if fraction >= 1.0 {
            canvas.body.push_str(&format!(
                r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{radius:.1}" fill="{colour}"/>"#
            ));
        } else {
            let (x1, y1) = point(angle, radius);
            let (x2, y2) = point(angle + sweep, radius);
            let large_arc = u8::from(sweep > PI);
            canvas.body.push_str(&format!(
                r##"<path d="M {cx:.1} {cy:.1} L {x1:.1} {y1:.1} A {radius:.1} {radius:.1} 0 {large_arc} 1 {x2:.1} {y2:.1} Z" fill="{colour}" stroke="#ffffff"/>"##
            ));
        }

        let (lx, ly) = point(angle + sweep / 2.0, radius * 0.6);
        canvas.text(lx, ly, "middle", 13, &format!("{:.1}%", fraction * 100.0));
        angle += sweep;
    }

    for (i, datum) in data.iter().enumerate() {
        let y = MARGIN_TOP + 20.0 + 22.0 * i as f64;
        canvas.rect(WIDTH - 210.0, y - 11.0, 14.0, 14.0, PIE_PALETTE[i % PIE_PALETTE.len()]);
        canvas.text(WIDTH - 190.0, y, "start", 13, &datum.label);
    }

    canvas.finish()
}
