//! Model implementations for the classification pipeline.

pub mod classification;
