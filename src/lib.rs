pub mod dataset;
pub mod error;
pub mod grid;
pub mod plot;
pub mod schema;

pub use error::{MoonvizError, Result};
