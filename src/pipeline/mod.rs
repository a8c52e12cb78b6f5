//! The caller-facing classification pipeline.
//!
//! [`TomatoDiseaseClassifier`] owns the loaded network for its lifetime and
//! exposes one operation: classify an image into a [`Diagnosis`]. Each
//! request runs preprocess, inference, and interpretation in sequence;
//! per-request failures surface as the failure sentinel, never as errors.

mod classifier;
mod result;

pub use classifier::{
    ClassifierConfig, TomatoDiseaseClassifier, TomatoDiseaseClassifierBuilder,
    CONFIDENCE_THRESHOLD, DEFAULT_MODEL_ASSET,
};
pub use result::{interpret, Diagnosis, ANALYSIS_FAILED, NOT_A_PLANT};
