//! The core module of the classification pipeline.
//!
//! This module contains the fundamental components of the pipeline:
//! - Error handling
//! - ONNX Runtime session management
//!
//! It also provides re-exports of commonly used types and functions for convenience.

pub mod errors;
pub mod inference;

pub use errors::ClassifierError;
pub use inference::ModelSession;

/// A 4D tensor holding one preprocessed image batch.
///
/// The layout is NHWC (batch, height, width, channels) because the bundled
/// network keeps the channel order of its TensorFlow lineage.
pub type Tensor4D = ndarray::Array4<f32>;

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// It's typically called at the start of an application to enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
