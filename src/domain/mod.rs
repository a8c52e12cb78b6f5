//! Domain types for tomato leaf disease classification.

pub mod labels;

pub use labels::DiseaseClass;
