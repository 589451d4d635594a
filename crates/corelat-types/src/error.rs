// ─────────────────────────────────────────────────────────────────────
// Corelat — Error
// License: MIT
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown assembly type in layout: {name:?}")]
    UnknownAssemblyType { name: String },

    #[error("Layout shape mismatch: declared {expected_w}x{expected_h}, grid is {found_w}x{found_h}")]
    LayoutShape {
        expected_w: usize,
        expected_h: usize,
        found_w: usize,
        found_h: usize,
    },

    #[error("Non-finite {quantity} in {context} on step {step}: modeling bug, not recoverable")]
    NumericalInvalid {
        quantity: &'static str,
        context: String,
        step: usize,
    },

    #[error("Grid index out of bounds: x={x}, y={y}")]
    GridOutOfBounds { x: usize, y: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
