use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for moonviz operations.
pub type Result<T> = std::result::Result<T, MoonvizError>;

/// Errors that can occur in the generator or the visualizer.
///
/// Messages name the offending file and the expected schema so a failed run
/// can be fixed without reading the source.
#[derive(Error, Debug)]
pub enum MoonvizError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("unexpected header in {}: expected '{expected}', found '{found}'", path.display())]
    Schema {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("bad label {value} at row {row} of {}: labels must be -1 or 1", path.display())]
    BadLabel {
        path: PathBuf,
        row: usize,
        value: i32,
    },

    #[error(
        "non-finite coordinates ({x1}, {x2}) at row {row} of {}: coordinates must be finite reals",
        path.display()
    )]
    BadCoordinate {
        path: PathBuf,
        row: usize,
        x1: f64,
        x2: f64,
    },

    #[error(
        "grid samples do not tile a rectangle: {nx} distinct x values and {ny} \
         distinct y values require {expected} samples, found {actual}"
    )]
    IncompleteGrid {
        nx: usize,
        ny: usize,
        expected: usize,
        actual: usize,
    },

    #[error(
        "grid sample {row} is out of canonical order: expected ({expected_x}, {expected_y}), \
         found ({found_x}, {found_y}); samples must be emitted row-major, ascending x then ascending y"
    )]
    GridOrder {
        row: usize,
        expected_x: f64,
        expected_y: f64,
        found_x: f64,
        found_y: f64,
    },

    #[error("grid-sample collection is empty")]
    EmptyGrid,

    #[error("invalid generation parameters: {message}")]
    InvalidParams { message: String },

    #[error("rendering failed: {message}")]
    Render { message: String },
}
