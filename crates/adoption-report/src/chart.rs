//! Stacked-area PNG charts of monthly adoption by industry.
//!
//! Text (title, axis labels, legend) needs a TrueType font. One is registered
//! on first use from `--chart-font` or a list of common system locations;
//! when none can be loaded the chart is drawn without text.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use adoption_core::error::{AdoptionError, Result};
use adoption_core::models::YearMonth;
use adoption_core::naics;
use adoption_data::aggregator::MonthlyIndustryTable;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use tracing::{debug, warn};

pub const OTHER_LABEL: &str = "Other";

/// Pixel size of saved charts.
pub const DEFAULT_CHART_SIZE: (u32, u32) = (2100, 1200);

/// Heading drawn above the legend entries.
pub const LEGEND_TITLE: &str = "Industry (NAICS)";

const FONT_FAMILY: &str = "sans-serif";

/// Legend placement in pixels from the plot area's upper-left corner.
const LEGEND_TITLE_POS: (i32, i32) = (12, 10);
const LEGEND_ENTRIES_POS: (i32, i32) = (12, 36);

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT_READY: OnceLock<bool> = OnceLock::new();

// ── Series ────────────────────────────────────────────────────────────────────

/// One band of the stacked chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// `"<code>: <short description>"` or `"Other"`.
    pub label: String,
    pub color: RGBColor,
    /// New repositories per month, aligned with the table's months.
    pub values: Vec<u64>,
}

/// Top `top_n` industries by total volume, largest first, followed by an
/// `"Other"` band when any industries remain.
pub fn build_chart_series(table: &MonthlyIndustryTable, top_n: usize) -> Vec<ChartSeries> {
    let totals = table.industry_totals();
    let split = top_n.min(totals.len());
    let (top, rest) = totals.split_at(split);

    let mut series: Vec<ChartSeries> = top
        .iter()
        .filter_map(|(code, _)| {
            Some(ChartSeries {
                label: naics::industry_label(code),
                color: hex_to_rgb(naics::color(code)),
                values: table.monthly_series(code)?,
            })
        })
        .collect();

    if !rest.is_empty() {
        let mut other = vec![0u64; table.months().len()];
        for (code, _) in rest {
            if let Some(values) = table.monthly_series(code) {
                for (sum, v) in other.iter_mut().zip(values) {
                    *sum += v;
                }
            }
        }
        series.push(ChartSeries {
            label: OTHER_LABEL.to_string(),
            color: hex_to_rgb(naics::FALLBACK_COLOR),
            values: other,
        });
    }

    series
}

fn hex_to_rgb(hex: &str) -> RGBColor {
    let (r, g, b) = naics::parse_hex_color(hex).unwrap_or((0x66, 0x66, 0x66));
    RGBColor(r, g, b)
}

/// Upper edge of every band: running sum of the series in drawing order.
fn stack_bounds(series: &[ChartSeries], months: usize) -> Vec<Vec<u64>> {
    let mut acc = vec![0u64; months];
    series
        .iter()
        .map(|s| {
            for (sum, v) in acc.iter_mut().zip(&s.values) {
                *sum += v;
            }
            acc.clone()
        })
        .collect()
}

// ── Fonts ─────────────────────────────────────────────────────────────────────

/// Register a label font once per process. Returns whether text can be drawn.
pub fn ensure_font(explicit: Option<&Path>) -> bool {
    *FONT_READY.get_or_init(|| load_font(explicit))
}

fn load_font(explicit: Option<&Path>) -> bool {
    let candidates = explicit
        .map(Path::to_path_buf)
        .into_iter()
        .chain(FONT_CANDIDATES.iter().map(PathBuf::from));

    for path in candidates {
        let Ok(bytes) = std::fs::read(&path) else {
            continue;
        };
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
            Ok(()) => {
                debug!("Chart font: {}", path.display());
                return true;
            }
            Err(_) => warn!("Ignoring unusable font {}", path.display()),
        }
    }

    warn!("No TrueType font found, charts will be drawn without labels");
    false
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Options for [`render_stacked_area`].
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub size: (u32, u32),
    pub font: Option<PathBuf>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_CHART_SIZE,
            font: None,
        }
    }
}

fn chart_error<E: std::fmt::Display>(e: E) -> AdoptionError {
    AdoptionError::Chart(e.to_string())
}

/// Draw `series` stacked over `months` and save the PNG at `path`.
pub fn render_stacked_area(
    path: &Path,
    title: &str,
    months: &[YearMonth],
    series: &[ChartSeries],
    options: &ChartOptions,
) -> Result<()> {
    if months.is_empty() || series.is_empty() {
        return Err(AdoptionError::EmptyDataset(title.to_string()));
    }
    let with_text = ensure_font(options.font.as_deref());

    // A single month is drawn as a flat band across the whole width.
    let xs: Vec<f64> = if months.len() == 1 {
        vec![0.0, 1.0]
    } else {
        (0..months.len()).map(|i| i as f64).collect()
    };
    let x_max = xs.last().copied().unwrap_or(1.0);
    let widen = |row: &[u64]| -> Vec<f64> {
        if months.len() == 1 {
            vec![row[0] as f64; 2]
        } else {
            row.iter().map(|v| *v as f64).collect()
        }
    };

    let bounds = stack_bounds(series, months.len());
    let peak = bounds
        .last()
        .and_then(|top| top.iter().max().copied())
        .unwrap_or(0)
        .max(1);
    let y_max = peak as f64 * 1.05;

    let root = BitMapBackend::new(path, options.size).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(24);
    if with_text {
        builder
            .caption(title, (FONT_FAMILY, 32))
            .x_label_area_size(70)
            .y_label_area_size(90);
    }
    let mut chart = builder
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)
        .map_err(chart_error)?;

    if with_text {
        let month_label = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            months
                .get(idx as usize)
                .map(ToString::to_string)
                .unwrap_or_default()
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(BLACK.mix(0.05))
            .bold_line_style(BLACK.mix(0.15))
            .x_labels(months.len().clamp(2, 12))
            .x_label_formatter(&month_label)
            .y_label_formatter(&|y: &f64| format!("{:.0}", y))
            .x_desc("Month")
            .y_desc("New Repos")
            .axis_desc_style((FONT_FAMILY, 22))
            .label_style((FONT_FAMILY, 16))
            .draw()
            .map_err(chart_error)?;
    } else {
        for step in 1..=4 {
            let y = y_max * step as f64 / 5.0;
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(0.0, y), (x_max, y)],
                    BLACK.mix(0.15),
                )))
                .map_err(chart_error)?;
        }
    }

    let zeros = vec![0u64; months.len()];
    for (idx, s) in series.iter().enumerate() {
        let lower = if idx == 0 { &zeros } else { &bounds[idx - 1] };
        let upper = widen(&bounds[idx]);
        let lower = widen(lower);

        let mut points: Vec<(f64, f64)> = xs.iter().copied().zip(upper).collect();
        points.extend(xs.iter().copied().zip(lower).rev());

        let color = s.color;
        let anno = chart
            .draw_series(std::iter::once(Polygon::new(points, color.mix(0.8).filled())))
            .map_err(chart_error)?;
        if with_text {
            anno.label(s.label.as_str()).legend(move |(x, y)| {
                Rectangle::new([(x, y - 7), (x + 18, y + 7)], color.mix(0.8).filled())
            });
        }
    }

    if with_text {
        chart
            .plotting_area()
            .strip_coord_spec()
            .draw(&Text::new(
                LEGEND_TITLE,
                LEGEND_TITLE_POS,
                (FONT_FAMILY, 18.0).into_font(),
            ))
            .map_err(chart_error)?;
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::Coordinate(
                LEGEND_ENTRIES_POS.0,
                LEGEND_ENTRIES_POS.1,
            ))
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK.mix(0.3))
            .label_font((FONT_FAMILY, 16))
            .draw()
            .map_err(chart_error)?;
    }

    root.present().map_err(chart_error)?;
    debug!("Saved chart to {}", path.display());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
