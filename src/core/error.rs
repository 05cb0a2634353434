use thiserror::Error;

use super::sectors::Half;

/// Rejected court configuration. Raised before anything is drawn.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("court dimensions must be positive, got {width}x{height}")]
    EmptyCourt { width: u32, height: u32 },

    #[error("{what} thickness must be at least 1 pixel")]
    ZeroThickness { what: &'static str },

    #[error("{half} grid needs at least one column and one row, got {columns}x{rows}")]
    EmptyGrid { half: Half, columns: u32, rows: u32 },

    #[error("{half} grid {columns}x{rows} is finer than the half court ({width}x{half_height} px)")]
    GridTooDense {
        half: Half,
        columns: u32,
        rows: u32,
        width: u32,
        half_height: u32,
    },

    #[error("attack line offset {offset} px does not fit in a half court of {half_height} px")]
    AttackLineOutOfCourt { offset: u32, half_height: u32 },

    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error("zone ({column}, {row}) is outside the {half} grid ({columns}x{rows})")]
    ZoneOutOfRange {
        half: Half,
        column: u32,
        row: u32,
        columns: u32,
        rows: u32,
    },

    #[error("drawing canvas scale must be between 1 and the court size, got 1/{0}")]
    InvalidCanvasScale(u32),
}
