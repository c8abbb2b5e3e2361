//! Static chart rendering: every chart is one specification rendered to one
//! SVG file of fixed pixel dimensions.

use crate::error::{AnalysisError, Result};
use crate::model::fit_line;
use crate::table::Table;
use plotters::prelude::{
    ChartBuilder, Circle, IntoDrawingArea, IntoSegmentedCoord, LineSeries, PathElement,
    Rectangle, SVGBackend, SegmentValue, BLACK, WHITE,
};
use plotters::series::Histogram;
use plotters::style::{Color, RGBColor, ShapeStyle};
use std::path::{Path, PathBuf};

/// How a scatter chart's overlay line is computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitLine {
    /// Least-squares line fitted to the plotted points.
    LeastSquares,
    /// Fixed-slope reference line through the origin.
    Origin { slope: f64 },
}

/// What to draw.
#[derive(Debug, Clone)]
pub enum ChartKind {
    /// Row count per distinct value of a category column.
    Bar { category: String },
    /// Distribution of a numeric column per category level.
    Box { value: String, category: String },
    /// Numeric x/y scatter with an overlay line.
    Scatter { x: String, y: String, line: FitLine },
}

/// One chart: kind, bindings, style, and output geometry.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: (u8, u8, u8),
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

impl ChartSpec {
    fn fill(&self) -> ShapeStyle {
        let (r, g, b) = self.color;
        RGBColor(r, g, b).filled()
    }

    fn stroke(&self) -> ShapeStyle {
        let (r, g, b) = self.color;
        RGBColor(r, g, b).stroke_width(2)
    }
}

/// Render one chart into `output_dir`, returning the written path.
pub fn render(table: &Table, spec: &ChartSpec, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(&spec.file_name);
    match &spec.kind {
        ChartKind::Bar { category } => render_bar(table, spec, category, &path)?,
        ChartKind::Box { value, category } => render_box(table, spec, value, category, &path)?,
        ChartKind::Scatter { x, y, line } => render_scatter(table, spec, x, y, *line, &path)?,
    }
    tracing::debug!(chart = %spec.file_name, "chart rendered");
    Ok(path)
}

/// Distinct category levels in first-seen order with their member values.
fn split_by_category(
    table: &Table,
    value: Option<&str>,
    category: &str,
) -> Result<Vec<(String, Vec<f64>)>> {
    let column = table.column(category)?;
    let values = match value {
        Some(name) => Some(table.numeric(name)?),
        None => None,
    };
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for row in 0..table.row_count() {
        let key = column.display_value(row);
        let idx = match groups.iter().position(|(k, _)| *k == key) {
            Some(i) => i,
            None => {
                groups.push((key, Vec::new()));
                groups.len() - 1
            }
        };
        groups[idx].1.push(values.map_or(1.0, |v| v[row]));
    }
    Ok(groups)
}

fn chart_error(e: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::Chart(e.to_string())
}

fn render_bar(table: &Table, spec: &ChartSpec, category: &str, path: &Path) -> Result<()> {
    let groups = split_by_category(table, None, category)?;
    let labels: Vec<String> = groups.iter().map(|(k, _)| k.clone()).collect();
    let counts: Vec<usize> = groups.iter().map(|(_, v)| v.len()).collect();
    let y_max = counts.iter().copied().max().unwrap_or(1) as f64 * 1.15;

    let root = SVGBackend::new(path, (spec.width, spec.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(48)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0.0..y_max)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label.clone())
        .y_desc(spec.y_label.clone())
        .disable_x_mesh()
        .x_label_formatter(&|seg: &SegmentValue<usize>| match seg {
            SegmentValue::CenterOf(i) if *i < labels.len() => labels[*i].clone(),
            _ => String::new(),
        })
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(spec.fill())
                .margin(18)
                .data(counts.iter().enumerate().map(|(i, c)| (i, *c as f64))),
        )
        .map_err(chart_error)?;

    root.present().map_err(chart_error)
}

fn render_box(
    table: &Table,
    spec: &ChartSpec,
    value: &str,
    category: &str,
    path: &Path,
) -> Result<()> {
    let groups = split_by_category(table, Some(value), category)?;
    let values = table.numeric(value)?;
    let (y_min, y_max) = padded_range(values);

    let root = SVGBackend::new(path, (spec.width, spec.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(48)
        .build_cartesian_2d((0..groups.len()).into_segmented(), y_min..y_max)
        .map_err(chart_error)?;

    let labels: Vec<String> = groups.iter().map(|(k, _)| k.clone()).collect();
    chart
        .configure_mesh()
        .x_desc(spec.x_label.clone())
        .y_desc(spec.y_label.clone())
        .disable_x_mesh()
        .x_label_formatter(&|seg: &SegmentValue<usize>| match seg {
            SegmentValue::CenterOf(i) if *i < labels.len() => labels[*i].clone(),
            _ => String::new(),
        })
        .draw()
        .map_err(chart_error)?;

    // One box per group: quartile box, median bar, and whiskers.
    for (i, (_, group_values)) in groups.iter().enumerate() {
        let (low, q1, q2, q3, high) = five_numbers(group_values);
        let center = SegmentValue::CenterOf(i);
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(SegmentValue::Exact(i), q1), (SegmentValue::Exact(i + 1), q3)],
                spec.fill(),
            )))
            .map_err(chart_error)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(SegmentValue::Exact(i), q2), (SegmentValue::Exact(i + 1), q2)],
                BLACK.stroke_width(2),
            )))
            .map_err(chart_error)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(center.clone(), q3), (center.clone(), high)],
                BLACK.stroke_width(1),
            )))
            .map_err(chart_error)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(center.clone(), low), (center, q1)],
                BLACK.stroke_width(1),
            )))
            .map_err(chart_error)?;
    }

    root.present().map_err(chart_error)
}

/// Minimum, quartiles, and maximum of one group, by linear interpolation.
fn five_numbers(values: &[f64]) -> (f64, f64, f64, f64, f64) {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let q = |p: f64| -> f64 {
        if sorted.is_empty() {
            return 0.0;
        }
        let pos = p * (sorted.len() - 1) as f64;
        let lower = pos.floor() as usize;
        let upper = pos.ceil() as usize;
        let weight = pos - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    };
    (q(0.0), q(0.25), q(0.5), q(0.75), q(1.0))
}

fn render_scatter(
    table: &Table,
    spec: &ChartSpec,
    x: &str,
    y: &str,
    line: FitLine,
    path: &Path,
) -> Result<()> {
    let xs = table.numeric(x)?;
    let ys = table.numeric(y)?;
    let (x_min, x_max) = padded_range(xs);
    let (y_min, y_max) = padded_range(ys);

    let root = SVGBackend::new(path, (spec.width, spec.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(48)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label.clone())
        .y_desc(spec.y_label.clone())
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(
            xs.iter()
                .zip(ys)
                .map(|(&a, &b)| Circle::new((a, b), 3, spec.fill())),
        )
        .map_err(chart_error)?;

    let (intercept, slope) = match line {
        FitLine::LeastSquares => fit_line(xs, ys),
        FitLine::Origin { slope } => (0.0, slope),
    };
    let line_x0 = if matches!(line, FitLine::Origin { .. }) { x_min.max(0.0) } else { x_min };
    chart
        .draw_series(LineSeries::new(
            vec![
                (line_x0, intercept + slope * line_x0),
                (x_max, intercept + slope * x_max),
            ],
            spec.stroke(),
        ))
        .map_err(chart_error)?;

    root.present().map_err(chart_error)
}

/// Data range with 5% padding each side, safe for constant data.
fn padded_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(1.0);
    (min - span * 0.05, max + span * 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::motor_trend;
    use tempfile::TempDir;

    fn spec(kind: ChartKind, file_name: &str) -> ChartSpec {
        ChartSpec {
            kind,
            title: "test".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            color: (70, 130, 180),
            file_name: file_name.to_string(),
            width: 640,
            height: 480,
        }
    }

    #[test]
    fn test_bar_chart_written() {
        let dir = TempDir::new().unwrap();
        let table = motor_trend();
        let s = spec(ChartKind::Bar { category: "cyl".to_string() }, "bar.svg");
        let path = render(&table, &s, dir.path()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
    }

    #[test]
    fn test_box_chart_written() {
        let dir = TempDir::new().unwrap();
        let table = motor_trend();
        let s = spec(
            ChartKind::Box { value: "mpg".to_string(), category: "cyl".to_string() },
            "box.svg",
        );
        assert!(render(&table, &s, dir.path()).is_ok());
    }

    #[test]
    fn test_scatter_chart_with_fit_written() {
        let dir = TempDir::new().unwrap();
        let table = motor_trend();
        let s = spec(
            ChartKind::Scatter {
                x: "wt".to_string(),
                y: "mpg".to_string(),
                line: FitLine::LeastSquares,
            },
            "scatter.svg",
        );
        assert!(render(&table, &s, dir.path()).is_ok());
    }

    #[test]
    fn test_render_fails_on_missing_column() {
        let dir = TempDir::new().unwrap();
        let table = motor_trend();
        let s = spec(ChartKind::Bar { category: "nope".to_string() }, "bar.svg");
        assert!(render(&table, &s, dir.path()).is_err());
    }

    #[test]
    fn test_render_fails_on_unwritable_path() {
        let table = motor_trend();
        let s = spec(ChartKind::Bar { category: "cyl".to_string() }, "bar.svg");
        let bogus = Path::new("/nonexistent-dir-for-charts");
        assert!(render(&table, &s, bogus).is_err());
    }

    #[test]
    fn test_padded_range_constant_data() {
        let (lo, hi) = padded_range(&[5.0, 5.0]);
        assert!(lo < 5.0 && hi > 5.0);
    }
}
