// src/convolution.rs
//! Двумерная свёртка с квадратным ядром нечётного размера
//!
//! Исходная сетка неявно дополняется нулями на `delta = size / 2` ячеек с
//! каждой стороны: граничные ячейки получают вклад только от существующих
//! соседей. Отражение или копирование края не применяются.
//!
//! Два варианта:
//! - [`convolve`] — безусловное размытие, каждая ячейка перезаписывается;
//! - [`convolve_fill_zeros`] — заполнение пропусков: перезаписываются только
//!   ячейки, равные ровно `0.0`, окно читается из сетки на начало прохода.
//!
//! Каналы обрабатываются независимо. С фичей `parallel` строки считаются
//! в пуле `rayon`; результат от этого не меняется.

use crate::error::{Error, Result};
use crate::grid::Grid;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

const GAUSSIAN_5X5_WEIGHTS: [f64; 25] = [
    1.0, 4.0, 7.0, 4.0, 1.0, //
    4.0, 16.0, 26.0, 16.0, 4.0, //
    7.0, 26.0, 41.0, 26.0, 7.0, //
    4.0, 16.0, 26.0, 16.0, 4.0, //
    1.0, 4.0, 7.0, 4.0, 1.0,
];

/// Гауссово ядро 5×5 с нормирующим множителем 1/273
pub const GAUSSIAN_5X5: Kernel<'static> = Kernel {
    weights: &GAUSSIAN_5X5_WEIGHTS,
    size: 5,
    factor: 1.0 / 273.0,
};

/// Квадратное ядро свёртки, веса в построчном порядке
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel<'a> {
    weights: &'a [f64],
    size: usize,
    factor: f64,
}

impl<'a> Kernel<'a> {
    /// Создаёт ядро, проверяя нечётность размера и число весов.
    pub fn new(weights: &'a [f64], size: usize, factor: f64) -> Result<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(Error::InvalidKernel(format!(
                "size must be odd and non-zero, got {size}"
            )));
        }
        if weights.len() != size * size {
            return Err(Error::InvalidKernel(format!(
                "expected {} weights for a {size}x{size} kernel, got {}",
                size * size,
                weights.len()
            )));
        }
        Ok(Self {
            weights,
            size,
            factor,
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Радиус окна
    #[must_use]
    pub fn delta(&self) -> usize {
        self.size / 2
    }

    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    #[inline]
    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.weights[row * self.size + col]
    }
}

/// Взвешенная сумма окна с центром в `(row, col)`; ячейки за границей равны нулю.
fn weighted_sum(grid: &Grid, kernel: &Kernel, row: usize, col: usize, channel: usize) -> f64 {
    let delta = kernel.delta() as isize;
    let (height, width) = (grid.height as isize, grid.width as isize);
    let mut sum = 0.0;

    for i in 0..kernel.size {
        let src_row = row as isize + i as isize - delta;
        if src_row < 0 || src_row >= height {
            continue;
        }
        for j in 0..kernel.size {
            let src_col = col as isize + j as isize - delta;
            if src_col < 0 || src_col >= width {
                continue;
            }
            sum += grid.get(src_row as usize, src_col as usize, channel) * kernel.at(i, j);
        }
    }

    kernel.factor * sum
}

/// Строит новую сетку, вычисляя каждую ячейку через `cell(row, col, channel, current)`.
fn map_cells<F>(grid: &Grid, cell: F) -> Grid
where
    F: Fn(usize, usize, usize, f64) -> f64 + Sync,
{
    let mut out = grid.clone();
    let row_len = grid.width * grid.channels;
    if row_len == 0 || grid.height == 0 {
        return out;
    }

    let fill_row = |(row, values): (usize, &mut [f64])| {
        for col in 0..grid.width {
            for channel in 0..grid.channels {
                let idx = col * grid.channels + channel;
                values[idx] = cell(row, col, channel, values[idx]);
            }
        }
    };

    #[cfg(feature = "parallel")]
    out.data.par_chunks_mut(row_len).enumerate().for_each(fill_row);
    #[cfg(not(feature = "parallel"))]
    out.data.chunks_mut(row_len).enumerate().for_each(fill_row);

    out
}

/// Безусловная свёртка: каждая ячейка заменяется взвешенной суммой окна.
#[must_use]
pub fn convolve(grid: &Grid, kernel: &Kernel) -> Grid {
    map_cells(grid, |row, col, channel, _| {
        weighted_sum(grid, kernel, row, col, channel)
    })
}

/// Свёртка с заполнением пропусков: меняются только ячейки, равные нулю.
#[must_use]
pub fn convolve_fill_zeros(grid: &Grid, kernel: &Kernel) -> Grid {
    map_cells(grid, |row, col, channel, current| {
        if current == 0.0 {
            weighted_sum(grid, kernel, row, col, channel)
        } else {
            current
        }
    })
}

/// Гауссово размытие за `passes` проходов. Ноль проходов возвращает копию входа.
#[must_use]
pub fn gaussian_blur(grid: &Grid, passes: u32) -> Grid {
    let mut current = grid.clone();
    for pass in 0..passes {
        tracing::debug!("blur pass {}/{}", pass + 1, passes);
        current = convolve(&current, &GAUSSIAN_5X5);
    }
    current
}

/// Заполнение нулевых ячеек гауссовым ядром за `passes` проходов
#[must_use]
pub fn fill_gaps(grid: &Grid, passes: u32) -> Grid {
    let mut current = grid.clone();
    for pass in 0..passes {
        tracing::debug!("gap fill pass {}/{}", pass + 1, passes);
        current = convolve_fill_zeros(&current, &GAUSSIAN_5X5);
    }
    current
}
