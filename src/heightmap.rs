// src/heightmap.rs
//! Растеризация вершин меша в полутоновую карту высот
//!
//! Конвейер:
//! 1. Размер сетки `dim = (m + 1) * 2`, где `m` — наибольший модуль
//!    округлённой вниз координаты `x` или `z`.
//! 2. Каждая вершина попадает в ячейку `(dim/2 + ⌊x⌋, dim/2 + ⌊z⌋)`,
//!    выход за границы прижимается к краю.
//! 3. Высоты в ячейке усредняются.
//! 4. Нормализация: максимум переходит в `output_range` (обычно 255).
//! 5. Пустые ячейки заполняются гауссовым ядром за несколько проходов.

use crate::config::HeightmapSettings;
use crate::convolution::fill_gaps;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::mesh::{Point, read_vertices};
use std::path::Path;

/// Квадратная карта высот `dim × dim`, строка — ось `x`, столбец — ось `z`
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    pub dim: usize,
    pub grid: Grid,
}

impl Heightmap {
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.grid.get(row, col, 0)
    }

    /// Сохраняет карту как трёхканальное изображение
    pub fn save_as_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.grid.to_rgb_image()?.save(path)?;
        Ok(())
    }
}

/// Накопители суммы и числа высот по ячейкам
#[derive(Debug, Clone)]
pub struct Accumulator {
    pub sum: Grid,
    pub count: Grid,
}

impl Accumulator {
    /// Средняя высота по ячейке; ячейки без вершин дают 0
    #[must_use]
    pub fn average(&self) -> Grid {
        let data = self
            .sum
            .data
            .iter()
            .zip(&self.count.data)
            .map(|(&sum, &count)| if count == 0.0 { sum } else { sum / count })
            .collect();
        Grid {
            data,
            ..self.sum.clone()
        }
    }
}

/// Наибольшая допустимая сторона карты высот
pub const MAX_DIM: usize = 8_192;

/// Сторона сетки по всем координатам `x` и `z`.
///
/// Координата, для которой сторона превысила бы [`MAX_DIM`], — ошибка.
pub fn infer_dimension(points: &[Point]) -> Result<usize> {
    let extent = points
        .iter()
        .flat_map(|p| [p.x, p.z])
        .map(|v| v.floor().abs())
        .fold(0.0, f64::max);

    // сравнение в f64 до приведения к целому: без насыщения и переполнения
    if extent + 1.0 > (MAX_DIM / 2) as f64 {
        return Err(Error::GridTooLarge {
            extent,
            max_dim: MAX_DIM,
        });
    }
    let m = extent as usize;
    Ok((m + 1) * 2)
}

/// Индекс ячейки для координаты со сдвигом начала в `dim / 2`
#[must_use]
pub fn bucket_index(coord: f64, dim: usize) -> usize {
    let shifted = (dim / 2) as i64 + coord.floor() as i64;
    shifted.clamp(0, dim as i64 - 1) as usize
}

/// Раскладывает вершины по ячейкам
#[must_use]
pub fn accumulate(points: &[Point], dim: usize) -> Accumulator {
    let mut sum = Grid::new(dim, dim, 1);
    let mut count = Grid::new(dim, dim, 1);

    for p in points {
        let row = bucket_index(p.x, dim);
        let col = bucket_index(p.z, dim);
        sum.set(row, col, 0, sum.get(row, col, 0) + p.y);
        count.set(row, col, 0, count.get(row, col, 0) + 1.0);
    }

    Accumulator { sum, count }
}

/// Масштабирует сетку так, чтобы максимум стал равен `range`.
///
/// Максимум отсчитывается от нуля; если он так и остался нулём (пустая сетка
/// или одни неположительные высоты), сетка возвращается без изменений.
#[must_use]
pub fn normalize(grid: &Grid, range: f64) -> Grid {
    let max = grid.max_value().unwrap_or(0.0).max(0.0);
    if max == 0.0 {
        tracing::warn!("heightmap maximum is zero, normalization skipped");
        return grid.clone();
    }
    let scale = range / max;
    Grid {
        data: grid.data.iter().map(|&v| v * scale).collect(),
        ..grid.clone()
    }
}

/// Строит карту высот из уже прочитанных вершин
pub fn rasterize(points: &[Point], settings: &HeightmapSettings) -> Result<Heightmap> {
    let dim = infer_dimension(points)?;
    tracing::info!("rasterizing {} vertices onto {dim}x{dim} grid", points.len());

    let averaged = accumulate(points, dim).average();
    let normalized = normalize(&averaged, settings.output_range);
    let grid = fill_gaps(&normalized, settings.smoothing_passes);

    Ok(Heightmap { dim, grid })
}

/// Читает OBJ-файл и строит по нему карту высот
pub fn mesh_to_heightmap(
    path: impl AsRef<Path>,
    settings: &HeightmapSettings,
) -> Result<Heightmap> {
    let points = read_vertices(path)?;
    rasterize(&points, settings)
}
