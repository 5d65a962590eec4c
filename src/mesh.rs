// src/mesh.rs
//! Чтение вершин из OBJ-файла
//!
//! Вершиной считается только строка, начинающаяся ровно с `"v "`:
//! `v <x> <y> <z> [<w>]`. Координата `x` — второй токен, `y` — третий,
//! `z` — последний (так необязательная однородная `w` не мешает).
//! Грани, нормали (`vn`), текстурные координаты (`vt`) и комментарии
//! пропускаются.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Вершина меша: `x`, `z` задают положение на сетке, `y` — высоту
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Разбирает все вершины из текста OBJ.
///
/// Некорректная запись вершины (меньше трёх токенов, нечисловой или
/// бесконечный токен) прерывает разбор с номером строки.
pub fn parse_vertices(source: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        if !line.starts_with("v ") {
            continue;
        }
        let line_no = idx + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(Error::MeshParse {
                line: line_no,
                message: format!("expected at least `v <x> <y>`, got {line:?}"),
            });
        }

        let parse = |token: &str| -> Result<f64> {
            let value = token.parse::<f64>().map_err(|e| Error::MeshParse {
                line: line_no,
                message: format!("{token:?}: {e}"),
            })?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(Error::MeshParse {
                    line: line_no,
                    message: format!("{token:?} is not a finite coordinate"),
                })
            }
        };

        points.push(Point {
            x: parse(tokens[1])?,
            y: parse(tokens[2])?,
            z: parse(tokens[tokens.len() - 1])?,
        });
    }

    Ok(points)
}

/// Читает OBJ-файл целиком в память и разбирает вершины
pub fn read_vertices(path: impl AsRef<Path>) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let points = parse_vertices(&source)?;
    tracing::info!("{} vertices read from {}", points.len(), path.display());
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vertices_and_skips_other_records() {
        let obj = "\
# cube
o Cube
v 1.0 2.0 3.0
vn 0.0 1.0 0.0
vt 0.5 0.5

v -1.5 0.25 4.0 1.0
f 1 2 3
";
        let points = parse_vertices(obj).unwrap();
        assert_eq!(
            points,
            vec![Point::new(1.0, 2.0, 3.0), Point::new(-1.5, 0.25, 1.0)]
        );
    }

    #[test]
    fn two_coordinate_record_reuses_last_token_as_z() {
        let points = parse_vertices("v 4 7").unwrap();
        assert_eq!(points, vec![Point::new(4.0, 7.0, 7.0)]);
    }

    #[test]
    fn short_record_is_fatal() {
        let err = parse_vertices("v 1.0 2.0 3.0\nv 1.0\n").unwrap_err();
        assert!(matches!(err, Error::MeshParse { line: 2, .. }));
    }

    #[test]
    fn non_numeric_token_is_fatal() {
        let err = parse_vertices("\n\nv 1.0 abc 3.0").unwrap_err();
        match err {
            Error::MeshParse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("abc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_finite_coordinates_are_fatal() {
        assert!(parse_vertices("v inf 0 0").is_err());
        assert!(parse_vertices("v 0 0 NaN").is_err());
    }

    #[test]
    fn indented_or_tab_separated_markers_are_not_vertices() {
        let points = parse_vertices(" v 1 2 3\nv\t1 2 3\nv 5 6 7").unwrap();
        assert_eq!(points, vec![Point::new(5.0, 6.0, 7.0)]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_vertices("/definitely/not/here.obj").unwrap_err();
        assert!(err.to_string().contains("here.obj"));
    }
}
