use std::path::Path;
use std::process;

use moonviz::dataset::read_dataset;
use moonviz::grid::{read_grid, GridField};
use moonviz::{plot, schema, Result};

fn run() -> Result<()> {
    let points = read_dataset(Path::new(schema::DATASET_PATH))?;
    let samples = read_grid(Path::new(schema::GRID_PATH))?;
    let field = GridField::from_samples(&samples)?;

    plot::render(&points, &field, Path::new(schema::PLOT_PATH))?;

    println!("Decision boundary plot saved to '{}'", schema::PLOT_PATH);

    // Best effort: show the figure in the platform image viewer
    if let Err(e) = opener::open(schema::PLOT_PATH) {
        eprintln!("visualizer: could not open an image viewer: {e}");
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("visualizer: {e}");
        process::exit(1);
    }
}
