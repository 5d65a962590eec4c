// src/plot.rs
//! Графики ядер SPH в PNG
//!
//! Рисуются ломаные по отсчётам [`crate::sph::sample`] для нескольких радиусов
//! сглаживания, по одной на радиус, плюс оси. Подписи и легенда не рисуются:
//! цвет кривой задаётся в [`PlotSettings::curves`].

use crate::error::Result;
use crate::sph::{Sample, SmoothingKernel, reference_samples, sample};
use image::{ImageBuffer, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Одна кривая графика
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurveStyle {
    /// Радиус сглаживания `h`
    pub smoothing_length: f64,
    pub color: [u8; 3],
}

/// Настройки холста и кривых
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotSettings {
    #[serde(default = "default_plot_width")]
    pub width: u32,

    #[serde(default = "default_plot_height")]
    pub height: u32,

    /// Видимый диапазон по `r`
    #[serde(default = "default_x_range")]
    pub x_range: [f64; 2],

    /// Видимый диапазон значений ядра; всё, что выше, прижимается к краю
    #[serde(default = "default_y_range")]
    pub y_range: [f64; 2],

    #[serde(default = "default_curves")]
    pub curves: Vec<CurveStyle>,

    /// Цвет табличной кривой `K₀`
    #[serde(default = "default_reference_color")]
    pub reference_color: [u8; 3],
}

fn default_plot_width() -> u32 {
    800
}
fn default_plot_height() -> u32 {
    400
}
fn default_x_range() -> [f64; 2] {
    [0.0, 2.0]
}
fn default_y_range() -> [f64; 2] {
    [0.0, 5.0]
}
fn default_curves() -> Vec<CurveStyle> {
    vec![
        CurveStyle {
            smoothing_length: 0.5,
            color: [44, 160, 44], // зелёный
        },
        CurveStyle {
            smoothing_length: 1.0,
            color: [148, 103, 189], // фиолетовый
        },
        CurveStyle {
            smoothing_length: 2.0,
            color: [255, 127, 14], // оранжевый
        },
    ]
}
fn default_reference_color() -> [u8; 3] {
    [31, 119, 180]
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            width: default_plot_width(),
            height: default_plot_height(),
            x_range: default_x_range(),
            y_range: default_y_range(),
            curves: default_curves(),
            reference_color: default_reference_color(),
        }
    }
}

impl PlotSettings {
    /// Координаты точки на холсте; `None` для NaN и вырожденного диапазона
    fn to_canvas(&self, s: Sample) -> Option<(f32, f32)> {
        let [x0, x1] = self.x_range;
        let [y0, y1] = self.y_range;
        let (span_x, span_y) = (x1 - x0, y1 - y0);
        if span_x == 0.0 || span_y == 0.0 || !span_x.is_finite() || !span_y.is_finite() {
            return None;
        }
        if s.r.is_nan() || s.value.is_nan() {
            return None;
        }
        let max_x = f64::from(self.width.saturating_sub(1));
        let max_y = f64::from(self.height.saturating_sub(1));

        let px = (s.r - x0) / span_x * max_x;
        let py = (1.0 - (s.value - y0) / span_y) * max_y;
        Some((px.clamp(0.0, max_x) as f32, py.clamp(0.0, max_y) as f32))
    }
}

fn draw_polyline(
    canvas: &mut RgbImage,
    settings: &PlotSettings,
    samples: &[Sample],
    color: Rgb<u8>,
) {
    for pair in samples.windows(2) {
        let start = settings.to_canvas(pair[0]);
        let end = settings.to_canvas(pair[1]);
        if let (Some(start), Some(end)) = (start, end) {
            draw_line_segment_mut(canvas, start, end, color);
        }
    }
}

/// Белый холст с осями `r = x0` и `W = y0`
fn blank_canvas(settings: &PlotSettings) -> RgbImage {
    let mut canvas: RgbImage =
        ImageBuffer::from_pixel(settings.width, settings.height, Rgb([255, 255, 255]));
    let origin = Sample {
        r: settings.x_range[0],
        value: settings.y_range[0],
    };
    let x_end = Sample {
        r: settings.x_range[1],
        ..origin
    };
    let y_end = Sample {
        value: settings.y_range[1],
        ..origin
    };
    let black = Rgb([0, 0, 0]);
    draw_polyline(&mut canvas, settings, &[origin, x_end], black);
    draw_polyline(&mut canvas, settings, &[origin, y_end], black);
    canvas
}

/// Рисует ядро для каждого радиуса из `settings.curves`
#[must_use]
pub fn render_kernel_plot(kernel: SmoothingKernel, settings: &PlotSettings) -> RgbImage {
    let mut canvas = blank_canvas(settings);
    for curve in &settings.curves {
        let samples = sample(kernel, curve.smoothing_length);
        draw_polyline(&mut canvas, settings, &samples, Rgb(curve.color));
    }
    canvas
}

/// То же, что [`render_kernel_plot`], с наложенной табличной кривой `K₀`
#[must_use]
pub fn render_with_reference(kernel: SmoothingKernel, settings: &PlotSettings) -> RgbImage {
    let mut canvas = render_kernel_plot(kernel, settings);
    draw_polyline(
        &mut canvas,
        settings,
        &reference_samples(),
        Rgb(settings.reference_color),
    );
    canvas
}

pub fn save_kernel_plot(
    kernel: SmoothingKernel,
    settings: &PlotSettings,
    with_reference: bool,
    path: impl AsRef<Path>,
) -> Result<()> {
    let canvas = if with_reference {
        render_with_reference(kernel, settings)
    } else {
        render_kernel_plot(kernel, settings)
    };
    canvas.save(path.as_ref())?;
    tracing::info!("{} plot saved to {}", kernel.name(), path.as_ref().display());
    Ok(())
}
