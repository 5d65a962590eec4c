// src/blur.rs
//! Гауссово размытие файлов изображений
//!
//! Полутоновый режим читает только первый канал, RGB-режим размывает каждый
//! канал отдельно. Результат всегда сохраняется как RGB рядом с исходным
//! файлом, к имени добавляется префикс (`new_` по умолчанию).

use crate::config::BlurSettings;
use crate::convolution::gaussian_blur;
use crate::error::Result;
use crate::grid::Grid;
use image::{DynamicImage, GenericImageView, RgbImage};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurMode {
    /// Только первый канал исходного изображения
    Grayscale,
    /// Все три канала независимо
    Rgb,
}

impl BlurMode {
    #[must_use]
    pub fn to_grid(self, image: &DynamicImage) -> Grid {
        match self {
            BlurMode::Grayscale => Grid::from_luma_image(image),
            BlurMode::Rgb => Grid::from_rgb_image(image),
        }
    }
}

/// Размывает изображение в памяти
pub fn blur_image(image: &DynamicImage, mode: BlurMode, passes: u32) -> Result<RgbImage> {
    let grid = mode.to_grid(image);
    gaussian_blur(&grid, passes).to_rgb_image()
}

/// Путь результата: тот же каталог, к имени файла добавлен `prefix`
#[must_use]
pub fn derived_output_path(input: &Path, prefix: &str) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{prefix}{file_name}"))
}

/// Читает, размывает и сохраняет изображение. Возвращает путь результата.
pub fn blur_file(input: &Path, mode: BlurMode, settings: &BlurSettings) -> Result<PathBuf> {
    let image = image::open(input)?;
    let (width, height) = image.dimensions();
    tracing::info!(
        "blurring {} ({width}x{height}, {:?}, {} passes)",
        input.display(),
        mode,
        settings.passes
    );

    let blurred = blur_image(&image, mode, settings.passes)?;
    let output = derived_output_path(input, &settings.output_prefix);
    blurred.save(&output)?;
    tracing::info!("saved {}", output.display());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn output_path_keeps_directory() {
        assert_eq!(
            derived_output_path(Path::new("photos/cat.png"), "new_"),
            PathBuf::from("photos/new_cat.png")
        );
        assert_eq!(
            derived_output_path(Path::new("cat.png"), "blurred-"),
            PathBuf::from("blurred-cat.png")
        );
    }

    #[test]
    fn zero_passes_keep_pixels() {
        let mut img = RgbImage::new(3, 3);
        img.put_pixel(1, 1, Rgb([200, 100, 50]));
        let dynamic = DynamicImage::ImageRgb8(img.clone());
        assert_eq!(blur_image(&dynamic, BlurMode::Rgb, 0).unwrap(), img);
    }

    #[test]
    fn grayscale_mode_replicates_first_channel() {
        let img = RgbImage::from_pixel(6, 6, Rgb([90, 10, 250]));
        let out = blur_image(&DynamicImage::ImageRgb8(img), BlurMode::Grayscale, 1).unwrap();
        // окно 5×5 вокруг (2, 2) целиком внутри изображения
        assert_eq!(out.get_pixel(2, 2), &Rgb([90, 90, 90]));
        assert!(out.get_pixel(0, 0)[0] < 90);
    }

    #[test]
    fn rgb_mode_blurs_channels_independently() {
        let img = RgbImage::from_pixel(5, 5, Rgb([0, 120, 0]));
        let out = blur_image(&DynamicImage::ImageRgb8(img), BlurMode::Rgb, 1).unwrap();
        let center = out.get_pixel(2, 2);
        assert_eq!(center, &Rgb([0, 120, 0]));
        // угол: 120 * 132 / 273 ≈ 58.02
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 58, 0]));
    }
}
