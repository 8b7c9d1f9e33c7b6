//! End-to-end flow: generate the dataset, persist it, reload it, combine it
//! with a scored grid and render the figure.

use std::fs;

use moonviz::dataset::{make_moons, read_dataset, write_dataset};
use moonviz::grid::{read_grid, GridField, ScoredGridSample};
use moonviz::{plot, schema};

/// Score the rectangle covering the dataset on a canonically ordered grid,
/// the way the external classifier emits its samples
fn score_grid(n: usize, lo: f64, hi: f64, f: impl Fn(f64, f64) -> f64) -> Vec<ScoredGridSample> {
    let step = (hi - lo) / (n - 1) as f64;
    let mut samples = Vec::with_capacity(n * n);

    for i in 0..n {
        let x = lo + step * i as f64;

        for j in 0..n {
            let y = lo + step * j as f64;
            samples.push(ScoredGridSample { x, y, z: f(x, y) });
        }
    }

    samples
}

#[test]
fn generate_persist_reload_and_render() {
    let dir = tempfile::tempdir().unwrap();
    let dataset_path = dir.path().join(schema::DATASET_PATH);
    let plot_path = dir.path().join(schema::PLOT_PATH);

    // Generate and persist
    let points = make_moons(schema::N_SAMPLES, schema::NOISE, schema::SEED).unwrap();
    write_dataset(&dataset_path, &points).unwrap();

    // A second run overwrites the file with byte-identical content
    let first = fs::read(&dataset_path).unwrap();
    let again = make_moons(schema::N_SAMPLES, schema::NOISE, schema::SEED).unwrap();
    write_dataset(&dataset_path, &again).unwrap();
    assert_eq!(first, fs::read(&dataset_path).unwrap());

    // Reload preserves every triple in order
    let restored = read_dataset(&dataset_path).unwrap();
    assert_eq!(points, restored);

    // Score a grid over the data with a stand-in boundary and render
    let samples = score_grid(25, -2.0, 3.0, |_, y| y - 0.25);
    let field = GridField::from_samples(&samples).unwrap();
    plot::render(&restored, &field, &plot_path).unwrap();

    assert!(fs::metadata(&plot_path).unwrap().len() > 0);
}

#[test]
fn grid_csv_matches_the_scorer_contract() {
    let dir = tempfile::tempdir().unwrap();
    let grid_path = dir.path().join(schema::GRID_PATH);

    // Emit the CSV the way the external scorer does
    let samples = score_grid(5, -1.0, 1.0, |x, y| x * y);
    let mut body = String::from("x,y,z\n");
    for s in &samples {
        body.push_str(&format!("{},{},{}\n", s.x, s.y, s.z));
    }
    fs::write(&grid_path, body).unwrap();

    let restored = read_grid(&grid_path).unwrap();
    let field = GridField::from_samples(&restored).unwrap();

    assert_eq!(field.z.dim(), (5, 5));
    assert_eq!(field.z[[0, 0]], 1.0);
    assert_eq!(field.z[[4, 0]], -1.0);
}
