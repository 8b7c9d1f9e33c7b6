use std::path::Path;
use std::process;

use moonviz::dataset::{make_moons, write_dataset};
use moonviz::{schema, Result};

fn run() -> Result<()> {
    let points = make_moons(schema::N_SAMPLES, schema::NOISE, schema::SEED)?;

    write_dataset(Path::new(schema::DATASET_PATH), &points)?;

    println!("Dataset generated and saved to '{}'", schema::DATASET_PATH);

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("dataset_gen: {e}");
        process::exit(1);
    }
}
