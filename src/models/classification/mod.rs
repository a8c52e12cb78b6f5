//! Classification models.

mod leaf_cnn;

pub use leaf_cnn::{LeafCnnModel, LeafCnnModelBuilder, LeafCnnPreprocessConfig, LeafPreprocessor};
