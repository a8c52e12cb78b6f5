//! # KilimoVision
//!
//! A Rust library that classifies tomato leaf photographs against ten
//! disease/health categories using a bundled convolutional network and
//! ONNX Runtime.
//!
//! ## Features
//!
//! - Complete classification pipeline from image to diagnosis
//! - Stretch-resize preprocessing into the network's fixed 224x224 NHWC layout
//! - Confidence gating with sentinel results for untrusted predictions
//! - ONNX Runtime integration for fast on-device inference
//!
//! ## Modules
//!
//! * [`core`] - Error handling and the ONNX session wrapper
//! * [`domain`] - The fixed disease category label set
//! * [`models`] - The leaf classification CNN and its preprocessor
//! * [`pipeline`] - The caller-facing classifier and diagnosis types
//! * [`processors`] - Image normalization and score postprocessing
//! * [`utils`] - Image loading helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kilimo_vision::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = TomatoDiseaseClassifier::builder()
//!     .confidence_threshold(0.7)
//!     .build(Path::new("models/KilimoVision.onnx"))?;
//!
//! let image = image::open("leaf.jpg")?;
//! let diagnosis = classifier.classify(&image);
//! println!("{} ({:.1}%)", diagnosis.label(), diagnosis.confidence() * 100.0);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod models;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use kilimo_vision::prelude::*;
/// ```
pub mod prelude {
    // Caller-facing pipeline (essential)
    pub use crate::pipeline::{
        ClassifierConfig, Diagnosis, TomatoDiseaseClassifier, TomatoDiseaseClassifierBuilder,
    };

    // Category labels
    pub use crate::domain::DiseaseClass;

    // Error handling (essential)
    pub use crate::core::ClassifierError;

    // Image utility (minimal)
    pub use crate::utils::load_image;
}
