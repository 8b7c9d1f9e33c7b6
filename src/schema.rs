//! Shared schema descriptor for the dataset/visualizer pipeline.
//!
//! Both batch jobs (and the external classifier that scores the grid) agree on
//! file paths and column names through the constants below, instead of each
//! side hard-coding its own copy.

use std::io::Read;
use std::path::Path;

use crate::error::{MoonvizError, Result};

/// Where the generator writes the labeled dataset, and where the visualizer
/// (and the external classifier) read it from.
pub const DATASET_PATH: &str = "moon_dataset.csv";

/// Where the external classifier writes its sampled decision-boundary scores.
pub const GRID_PATH: &str = "decision_boundary_data2.csv";

/// Where the visualizer saves the rendered figure.
pub const PLOT_PATH: &str = "mlp_decision_boundary.png";

/// Column header of the dataset CSV.
pub const DATASET_COLUMNS: [&str; 3] = ["x1", "x2", "y"];

/// Column header of the grid-sample CSV.
pub const GRID_COLUMNS: [&str; 3] = ["x", "y", "z"];

// Generation parameters. Fixed by design; the moon shape is the one synthetic
// dataset this pipeline targets.
pub const N_SAMPLES: usize = 100;
pub const NOISE: f64 = 0.1;
pub const SEED: u64 = 42;

/// Check a CSV header against one of the column schemas above.
/// The error names the offending file, the expected header and the one found.
pub fn check_header<R: Read>(
    path: &Path,
    reader: &mut csv::Reader<R>,
    expected: &[&str],
) -> Result<()> {
    let headers = reader.headers().map_err(|e| MoonvizError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;

    if !headers.iter().eq(expected.iter().copied()) {
        return Err(MoonvizError::Schema {
            path: path.to_path_buf(),
            expected: expected.join(","),
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    Ok(())
}
