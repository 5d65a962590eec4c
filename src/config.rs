// src/config.rs
//! Конфигурация инструментов
//!
//! Этот модуль определяет параметры всех точек входа:
//! - Размытие изображений (число проходов, префикс выходного файла)
//! - Растеризация карты высот (проходы сглаживания, диапазон нормализации)
//! - Построение графиков ядер SPH
//!
//! Все структуры поддерживают сериализацию в TOML; любое поле можно опустить,
//! тогда берётся значение по умолчанию.

use crate::error::{Error, Result};
use crate::plot::PlotSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Настройки гауссова размытия изображений
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlurSettings {
    /// Число проходов размытия (0 = изображение сохраняется без изменений)
    #[serde(default = "default_blur_passes")]
    pub passes: u32,

    /// Префикс имени выходного файла: `photo.png` → `new_photo.png`
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,
}

fn default_blur_passes() -> u32 {
    1
}
fn default_output_prefix() -> String {
    "new_".to_string()
}

impl Default for BlurSettings {
    fn default() -> Self {
        Self {
            passes: default_blur_passes(),
            output_prefix: default_output_prefix(),
        }
    }
}

/// Настройки растеризации карты высот из OBJ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeightmapSettings {
    /// Число проходов заполнения пустых ячеек
    #[serde(default = "default_smoothing_passes")]
    pub smoothing_passes: u32,

    /// Значение, в которое переходит максимальная высота после нормализации
    #[serde(default = "default_output_range")]
    pub output_range: f64,

    /// Путь к выходному PNG
    #[serde(default = "default_heightmap_output")]
    pub output: PathBuf,
}

fn default_smoothing_passes() -> u32 {
    5
}
fn default_output_range() -> f64 {
    255.0
}
fn default_heightmap_output() -> PathBuf {
    PathBuf::from("new_image.png")
}

impl Default for HeightmapSettings {
    fn default() -> Self {
        Self {
            smoothing_passes: default_smoothing_passes(),
            output_range: default_output_range(),
            output: default_heightmap_output(),
        }
    }
}

/// Полная конфигурация, загружаемая из TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToolSettings {
    #[serde(default)]
    pub blur: BlurSettings,

    #[serde(default)]
    pub heightmap: HeightmapSettings,

    #[serde(default)]
    pub plot: PlotSettings,
}

impl ToolSettings {
    /// Загружает параметры из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// [blur]
    /// passes = 3
    ///
    /// [heightmap]
    /// smoothing_passes = 8
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
