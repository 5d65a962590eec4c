// src/error.rs
//! Ошибки библиотеки
//!
//! Все операции возвращают [`Result`]; восстановления нет, ошибка всегда
//! пробрасывается вызывающему коду.

use std::path::PathBuf;
use thiserror::Error;

/// Результат операций `gaussmap`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Некорректная строка вершины в OBJ-файле (номер строки с единицы)
    #[error("malformed vertex record at line {line}: {message}")]
    MeshParse { line: usize, message: String },

    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    #[error("grid data length {actual} does not match {expected} ({width}x{height}x{channels})")]
    DimensionMismatch {
        width: usize,
        height: usize,
        channels: usize,
        expected: usize,
        actual: usize,
    },

    /// Координаты меша требуют карты больше `max_dim × max_dim`
    #[error("mesh extent {extent} needs a heightmap larger than {max_dim}x{max_dim}")]
    GridTooLarge { extent: f64, max_dim: usize },

    #[error("cannot encode a grid with {0} channels as RGB")]
    UnsupportedChannels(usize),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
