//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides the trait definitions the bank table job is built
//! from, plus the [`Pipeline`] driver that sequences them.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::{Checkpoint, Pipeline, RunSummary};
pub use transform::Transformer;
