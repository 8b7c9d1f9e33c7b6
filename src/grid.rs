use std::fs::File;
use std::path::Path;

use ndarray::Array2;
use serde::Deserialize;

use crate::error::{MoonvizError, Result};
use crate::schema;

/// One evaluation of the external scorer at a grid coordinate.
/// A sign change across z = 0 marks the decision boundary.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScoredGridSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Read the scorer's grid-sample CSV, checking the `x,y,z` header.
pub fn read_grid(path: &Path) -> Result<Vec<ScoredGridSample>> {
    let file = File::open(path).map_err(|e| MoonvizError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    schema::check_header(path, &mut reader, &schema::GRID_COLUMNS)?;

    let mut samples = Vec::new();

    for record in reader.deserialize() {
        let sample: ScoredGridSample = record.map_err(|e| MoonvizError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        samples.push(sample);
    }

    Ok(samples)
}

/// A validated score field on a rectangular grid.
///
/// `z` has shape `(xs.len(), ys.len())`; `z[[i, j]]` is the score the external
/// classifier reported at `(xs[i], ys[j])`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridField {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub z: Array2<f64>,
}

impl GridField {
    /// Reconstruct the 2D field from the flat sample stream.
    ///
    /// The samples must cover the full cross product of their distinct x and
    /// y values, emitted row-major (ascending x blocks, ascending y within a
    /// block). Both properties are checked before any reshaping happens, so a
    /// gap, duplicate or out-of-order sample fails here instead of corrupting
    /// the plot.
    pub fn from_samples(samples: &[ScoredGridSample]) -> Result<GridField> {
        if samples.is_empty() {
            return Err(MoonvizError::EmptyGrid);
        }

        let xs = sorted_distinct(samples.iter().map(|s| s.x));
        let ys = sorted_distinct(samples.iter().map(|s| s.y));
        let expected = xs.len() * ys.len();

        if samples.len() != expected {
            return Err(MoonvizError::IncompleteGrid {
                nx: xs.len(),
                ny: ys.len(),
                expected,
                actual: samples.len(),
            });
        }

        // The count matching is not enough: duplicates can mask gaps, and a
        // shuffled stream would reshape into garbage. Sample i*ny + j must
        // sit exactly at (xs[i], ys[j]).
        for (idx, sample) in samples.iter().enumerate() {
            let (i, j) = (idx / ys.len(), idx % ys.len());

            if sample.x != xs[i] || sample.y != ys[j] {
                return Err(MoonvizError::GridOrder {
                    row: idx,
                    expected_x: xs[i],
                    expected_y: ys[j],
                    found_x: sample.x,
                    found_y: sample.y,
                });
            }
        }

        let z = Array2::from_shape_vec(
            (xs.len(), ys.len()),
            samples.iter().map(|s| s.z).collect(),
        )
        .expect("sample count was validated against the grid shape");

        Ok(GridField { xs, ys, z })
    }

    pub fn x_extent(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    pub fn y_extent(&self) -> (f64, f64) {
        (self.ys[0], self.ys[self.ys.len() - 1])
    }
}

fn sorted_distinct(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.collect();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}
