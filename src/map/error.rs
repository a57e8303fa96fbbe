use thiserror::Error;

use crate::map::hex::HexPoint;

/// Errors raised by grid access, tile decoding, and generation setup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("point ({}, {}) is outside the {cols}x{rows} grid", point.x, point.y)]
    OutOfBounds { point: HexPoint, cols: u32, rows: u32 },
    #[error("'{value}' is a {found} name, expected a {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        value: String,
    },
    #[error("unknown {category} identifier '{value}'")]
    UnknownIdentifier {
        category: &'static str,
        value: String,
    },
    #[error("invalid map options: {0}")]
    InvalidOptions(String),
    #[error("snapshot holds {actual} tiles but a {cols}x{rows} grid needs {expected}")]
    SnapshotShape {
        cols: u32,
        rows: u32,
        expected: usize,
        actual: usize,
    },
    #[error("field holds {actual} values but a {cols}x{rows} raster needs {expected}")]
    FieldShape {
        cols: u32,
        rows: u32,
        expected: usize,
        actual: usize,
    },
}
