// src/grid.rs
//! Числовая сетка и преобразования изображение ⇄ сетка
//!
//! [`Grid`] — плоский вектор `f64` в построчном порядке с чередующимися
//! каналами: индекс ячейки `(row, col, channel)` равен
//! `(row * width + col) * channels + channel`.
//!
//! Изображения декодируются через `image` в 8-битный RGB; сетка хранит
//! значения без округления, округление и обрезка до `[0, 255]` происходят
//! только при обратном кодировании в [`RgbImage`].

use crate::error::{Error, Result};
use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Число столбцов
    pub width: usize,
    /// Число строк
    pub height: usize,
    /// Число каналов на ячейку (1 для полутонов, 3 для RGB)
    pub channels: usize,
    pub data: Vec<f64>,
}

impl Grid {
    /// Сетка из нулей.
    #[must_use]
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0.0; width * height * channels],
        }
    }

    /// Сетка из готовых данных; длина обязана совпадать с `width × height × channels`.
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<f64>) -> Result<Self> {
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(Error::DimensionMismatch {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Одноканальная сетка из строк. Все строки должны быть одной длины.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let data: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::from_raw(width, height, 1, data)
    }

    #[must_use]
    pub fn filled(width: usize, height: usize, channels: usize, value: f64) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![value; width * height * channels],
        }
    }

    #[inline]
    fn index(&self, row: usize, col: usize, channel: usize) -> usize {
        (row * self.width + col) * self.channels + channel
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> f64 {
        self.data[self.index(row, col, channel)]
    }

    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: f64) {
        let idx = self.index(row, col, channel);
        self.data[idx] = value;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Максимум по всем ячейкам; `None` для пустой сетки
    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    /// Полутоновая сетка: берётся только первый канал изображения
    #[must_use]
    pub fn from_luma_image(image: &DynamicImage) -> Self {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self {
            width: width as usize,
            height: height as usize,
            channels: 1,
            data: rgb.pixels().map(|p| f64::from(p[0])).collect(),
        }
    }

    /// Трёхканальная сетка RGB
    #[must_use]
    pub fn from_rgb_image(image: &DynamicImage) -> Self {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self {
            width: width as usize,
            height: height as usize,
            channels: 3,
            data: rgb.into_raw().into_iter().map(f64::from).collect(),
        }
    }

    /// Кодирует сетку в 8-битный RGB.
    ///
    /// Одноканальная сетка дублируется во все три канала. Значения округляются
    /// и обрезаются до `[0, 255]`; NaN превращается в 0.
    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        let bytes: Vec<u8> = match self.channels {
            1 => self
                .data
                .iter()
                .flat_map(|&v| {
                    let b = to_byte(v);
                    [b, b, b]
                })
                .collect(),
            3 => self.data.iter().map(|&v| to_byte(v)).collect(),
            n => return Err(Error::UnsupportedChannels(n)),
        };
        ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(self.width as u32, self.height as u32, bytes)
            .ok_or(Error::DimensionMismatch {
                width: self.width,
                height: self.height,
                channels: self.channels,
                expected: self.width * self.height * 3,
                actual: self.data.len(),
            })
    }
}

fn to_byte(value: f64) -> u8 {
    // `as` для f64 → u8 насыщает и превращает NaN в 0
    value.round().clamp(0.0, 255.0) as u8
}
