//! Nutrition chart tools
//!
//! Macro distribution pie and calorie breakdown bar chart, rendered with
//! plotters into an RGB buffer and encoded as PNG.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::element::Pie;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{NutritionResult, PlanSession};

// ============================================================================
// Color Constants
// ============================================================================

const COLOR_PROTEIN: (u8, u8, u8) = (0xFF, 0x6B, 0x6B);
const COLOR_CARBS: (u8, u8, u8) = (0x4E, 0xCD, 0xC4);
const COLOR_FATS: (u8, u8, u8) = (0xFF, 0xE6, 0x6D);
const COLOR_BMR: (u8, u8, u8) = (0x66, 0x7E, 0xEA);
const COLOR_TDEE: (u8, u8, u8) = (0x76, 0x4B, 0xA2);
const COLOR_TARGET: (u8, u8, u8) = (0xF0, 0x93, 0xFB);

fn rgb(color: (u8, u8, u8)) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

pub const DEFAULT_CHART_WIDTH: u32 = 600;
pub const DEFAULT_CHART_HEIGHT: u32 = 300;

pub const MACRO_CHART_FILE: &str = "macro_distribution.png";
pub const CALORIE_CHART_FILE: &str = "calorie_breakdown.png";

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("No data to chart")]
    NoData,

    #[error("Chart size must be 1-4000 pixels per side, got {0}x{1}")]
    InvalidSize(u32, u32),

    #[error("Drawing failed: {0}")]
    Draw(String),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

// ============================================================================
// Chart Data
// ============================================================================

/// One labelled value in a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: f64,
    #[serde(skip)]
    pub color: (u8, u8, u8),
}

/// Macro energy split in kcal: protein and carbs at 4 kcal/g, fat at 9
pub fn macro_slices(nutrition: &NutritionResult) -> Vec<ChartSlice> {
    vec![
        ChartSlice { label: "Protein", value: (nutrition.protein_g * 4) as f64, color: COLOR_PROTEIN },
        ChartSlice { label: "Carbs", value: (nutrition.carbs_g * 4) as f64, color: COLOR_CARBS },
        ChartSlice { label: "Fats", value: (nutrition.fats_g * 9) as f64, color: COLOR_FATS },
    ]
}

pub fn calorie_bars(nutrition: &NutritionResult) -> Vec<ChartSlice> {
    vec![
        ChartSlice { label: "BMR", value: nutrition.bmr as f64, color: COLOR_BMR },
        ChartSlice { label: "TDEE", value: nutrition.tdee as f64, color: COLOR_TDEE },
        ChartSlice { label: "Target", value: nutrition.target as f64, color: COLOR_TARGET },
    ]
}

/// Largest accepted chart edge in pixels
pub const MAX_CHART_DIMENSION: u32 = 4000;

/// RGB buffer length for a chart, rejecting empty or oversized charts
fn buffer_len(width: u32, height: u32) -> Result<usize, ChartError> {
    if width == 0 || height == 0 || width > MAX_CHART_DIMENSION || height > MAX_CHART_DIMENSION {
        return Err(ChartError::InvalidSize(width, height));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(3))
        .ok_or(ChartError::InvalidSize(width, height))
}

/// A pie needs a positive total and no negative slices
fn check_pie_data(data: &[ChartSlice]) -> Result<(), ChartError> {
    if data.iter().any(|s| s.value < 0.0) || !data.iter().any(|s| s.value > 0.0) {
        return Err(ChartError::NoData);
    }
    Ok(())
}

/// Bars may be negative, but not all zero
fn check_bar_data(data: &[ChartSlice]) -> Result<(), ChartError> {
    if data.iter().all(|s| s.value == 0.0) {
        return Err(ChartError::NoData);
    }
    Ok(())
}

/// Encode a raw RGB buffer as PNG
fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, ChartError> {
    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ChartError::Draw("buffer does not match chart size".to_string()))?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)?;
    Ok(png_bytes)
}

// ============================================================================
// Chart Generation
// ============================================================================

/// Generate the macro distribution pie chart as PNG bytes
pub fn generate_macro_chart(nutrition: &NutritionResult, width: u32, height: u32) -> Result<Vec<u8>, ChartError> {
    let slices = macro_slices(nutrition);
    let len = buffer_len(width, height)?;
    check_pie_data(&slices)?;

    let mut buffer = vec![0u8; len];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let area = root.titled("Macro Distribution", ("sans-serif", 22.0)).map_err(draw_err)?;

        let (w, h) = area.dim_in_pixel();
        let center = ((w / 2) as i32, (h / 2) as i32);
        let radius = (w.min(h) as f64) * 0.38;

        let sizes: Vec<f64> = slices.iter().map(|s| s.value).collect();
        let colors: Vec<RGBColor> = slices.iter().map(|s| rgb(s.color)).collect();
        let labels: Vec<&str> = slices.iter().map(|s| s.label).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.label_style(("sans-serif", 16.0).into_font().color(&BLACK));
        pie.percentages(("sans-serif", radius * 0.12).into_font().color(&BLACK));
        area.draw(&pie).map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    encode_png(buffer, width, height)
}

/// Generate the BMR / TDEE / target bar chart as PNG bytes
pub fn generate_calorie_chart(nutrition: &NutritionResult, width: u32, height: u32) -> Result<Vec<u8>, ChartError> {
    let bars = calorie_bars(nutrition);
    let len = buffer_len(width, height)?;
    check_bar_data(&bars)?;

    let mut buffer = vec![0u8; len];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        // Axis always spans zero; a deficit can push the target below it
        let y_max = bars.iter().map(|b| b.value).fold(0.0, f64::max) * 1.15;
        let y_min = bars.iter().map(|b| b.value).fold(0.0, f64::min) * 1.15;
        let y_span = y_max - y_min;
        let x_max = bars.len() as f64 - 0.5;

        let mut chart = ChartBuilder::on(&root)
            .caption("Calorie Breakdown", ("sans-serif", 22.0))
            .margin(15)
            .x_label_area_size(30)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..x_max, y_min..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len())
            .x_label_formatter(&|x| {
                let idx = x.round();
                if (x - idx).abs() < 1e-6 && idx >= 0.0 && (idx as usize) < bars.len() {
                    bars[idx as usize].label.to_string()
                } else {
                    String::new()
                }
            })
            .y_desc("Calories (kcal)")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(bars.iter().enumerate().map(|(i, bar)| {
                let x = i as f64;
                Rectangle::new([(x - 0.3, 0.0), (x + 0.3, bar.value)], rgb(bar.color).filled())
            }))
            .map_err(draw_err)?;

        // Value labels just outside the end of each bar
        chart
            .draw_series(bars.iter().enumerate().map(|(i, bar)| {
                let y = if bar.value >= 0.0 { bar.value + y_span * 0.07 } else { bar.value };
                Text::new(
                    format!("{}", bar.value as i64),
                    (i as f64 - 0.12, y),
                    ("sans-serif", 14.0).into_font(),
                )
            }))
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    encode_png(buffer, width, height)
}

// ============================================================================
// Tool
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RenderedChart {
    pub title: &'static str,
    pub file_path: Option<String>,
    pub bytes: usize,
    pub data: Vec<ChartSlice>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RenderChartsResponse {
    pub success: bool,
    pub charts: Vec<RenderedChart>,
    pub message: String,
}

fn write_chart(path: &Path, png: &[u8]) -> Result<(), ChartError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, png)?;
    Ok(())
}

/// Render and write one chart; failures are reported, not propagated
fn render_one(
    title: &'static str,
    path: PathBuf,
    data: Vec<ChartSlice>,
    render: impl FnOnce() -> Result<Vec<u8>, ChartError>,
) -> RenderedChart {
    let result = render().and_then(|png| write_chart(&path, &png).map(|_| png.len()));
    match result {
        Ok(bytes) => RenderedChart {
            title,
            file_path: Some(path.display().to_string()),
            bytes,
            data,
            error: None,
        },
        Err(e) => {
            warn!(chart = title, error = %e, "Chart not rendered");
            RenderedChart {
                title,
                file_path: None,
                bytes: 0,
                data,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Render both charts for a session into `output_dir`
///
/// Each chart stands alone. Only when neither can be written is the call an
/// error.
pub fn render_nutrition_charts(
    session: &PlanSession,
    output_dir: &Path,
    width: u32,
    height: u32,
) -> Result<RenderChartsResponse, String> {
    let nutrition = session.nutrition();

    let charts = vec![
        render_one(
            "Macro Distribution",
            output_dir.join(MACRO_CHART_FILE),
            macro_slices(nutrition),
            || generate_macro_chart(nutrition, width, height),
        ),
        render_one(
            "Calorie Breakdown",
            output_dir.join(CALORIE_CHART_FILE),
            calorie_bars(nutrition),
            || generate_calorie_chart(nutrition, width, height),
        ),
    ];

    let failures: Vec<String> = charts
        .iter()
        .filter_map(|c| c.error.as_ref().map(|e| format!("{}: {}", c.title, e)))
        .collect();

    if failures.len() == charts.len() {
        return Err(failures.join("; "));
    }

    info!(dir = %output_dir.display(), failed = failures.len(), "Rendered nutrition charts");

    let message = if failures.is_empty() {
        format!("Charts written to {}", output_dir.display())
    } else {
        format!("Some charts written to {} ({})", output_dir.display(), failures.join("; "))
    };

    Ok(RenderChartsResponse {
        success: failures.is_empty(),
        charts,
        message,
    })
}
