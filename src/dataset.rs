use std::fs::File;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{MoonvizError, Result};
use crate::schema;

/// One training example: a 2D coordinate with a bipolar class label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    pub x1: f64,
    pub x2: f64,
    pub y: i32,
}

/// Generate two interleaving half-moon point clouds, one per class.
///
/// The outer arc carries underlying label 0 and the inner arc label 1; both
/// are remapped to the bipolar {-1, 1} encoding before the points leave this
/// function. Each coordinate gets independent Gaussian noise of the given
/// magnitude. The seed fully determines the output: same seed, same points.
pub fn make_moons(n_samples: usize, noise: f64, seed: u64) -> Result<Vec<LabeledPoint>> {
    if n_samples == 0 {
        return Err(MoonvizError::InvalidParams {
            message: "n_samples must be positive".to_string(),
        });
    }

    let normal = Normal::new(0.0, noise).map_err(|e| MoonvizError::InvalidParams {
        message: format!("noise magnitude {noise} is not a valid standard deviation ({e})"),
    })?;

    let mut rng = StdRng::seed_from_u64(seed);
    let n_outer = n_samples / 2;
    let n_inner = n_samples - n_outer;
    let mut points = Vec::with_capacity(n_samples);

    // Outer crescent: the upper half of the unit circle
    for k in 0..n_outer {
        let t = arc_angle(k, n_outer);
        points.push(perturbed(t.cos(), t.sin(), 0, &normal, &mut rng));
    }

    // Inner crescent: mirrored and shifted so the two arcs interleave
    for k in 0..n_inner {
        let t = arc_angle(k, n_inner);
        points.push(perturbed(1.0 - t.cos(), 1.0 - t.sin() - 0.5, 1, &normal, &mut rng));
    }

    points.shuffle(&mut rng);

    Ok(points)
}

/// Angle of the k-th of n evenly spaced points along a half circle
fn arc_angle(k: usize, n: usize) -> f64 {
    if n <= 1 {
        0.0
    } else {
        std::f64::consts::PI * k as f64 / (n - 1) as f64
    }
}

fn perturbed(x1: f64, x2: f64, label: i32, noise: &Normal<f64>, rng: &mut StdRng) -> LabeledPoint {
    LabeledPoint {
        x1: x1 + noise.sample(rng),
        x2: x2 + noise.sample(rng),
        // Remap the underlying 0/1 label to {-1, 1}; consumers depend on
        // the bipolar encoding
        y: 2 * label - 1,
    }
}

/// Persist the dataset as CSV with the `x1,x2,y` header.
/// An existing file at the destination is overwritten.
pub fn write_dataset(path: &Path, points: &[LabeledPoint]) -> Result<()> {
    let file = File::create(path).map_err(|e| MoonvizError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = csv::Writer::from_writer(file);

    for point in points {
        writer.serialize(point).map_err(|e| MoonvizError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    writer.flush().map_err(|e| MoonvizError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Read a persisted dataset back, checking the header against the schema
/// and every label against the bipolar encoding.
pub fn read_dataset(path: &Path) -> Result<Vec<LabeledPoint>> {
    let file = File::open(path).map_err(|e| MoonvizError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    schema::check_header(path, &mut reader, &schema::DATASET_COLUMNS)?;

    let mut points = Vec::new();

    for (idx, record) in reader.deserialize().enumerate() {
        let point: LabeledPoint = record.map_err(|e| MoonvizError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

        if point.y != -1 && point.y != 1 {
            return Err(MoonvizError::BadLabel {
                path: path.to_path_buf(),
                // +2 accounts for the header line and 1-based numbering
                row: idx + 2,
                value: point.y,
            });
        }

        if !point.x1.is_finite() || !point.x2.is_finite() {
            return Err(MoonvizError::BadCoordinate {
                path: path.to_path_buf(),
                row: idx + 2,
                x1: point.x1,
                x2: point.x2,
            });
        }

        points.push(point);
    }

    Ok(points)
}
