//! The tomato leaf disease classifier.
//!
//! This is the component the UI layer talks to: it loads the packaged
//! network once at construction, then answers `classify` requests one at a
//! time. The pipeline is a blocking, synchronous call graph; callers are
//! expected to dispatch it off any thread that owns interface
//! responsiveness and to serialize concurrent requests on the classifier.

use crate::core::ClassifierError;
use crate::models::classification::{LeafCnnModel, LeafCnnModelBuilder, LeafCnnPreprocessConfig};
use crate::pipeline::result::{interpret, Diagnosis};
use crate::utils::decode_image;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Fixed cutoff above which a prediction is trusted (inclusive).
pub const CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Name of the model artifact packaged with the application.
pub const DEFAULT_MODEL_ASSET: &str = "KilimoVision.onnx";

fn default_confidence_threshold() -> f32 {
    CONFIDENCE_THRESHOLD
}

fn default_input_size() -> u32 {
    224
}

/// Configuration for constructing a [`TomatoDiseaseClassifier`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Path to the packaged model artifact.
    pub model_path: PathBuf,
    /// Confidence cutoff for trusting a prediction.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
    /// Side length of the network's square input, in pixels.
    #[serde(default = "default_input_size")]
    pub input_size: u32,
}

/// Classifies tomato leaf photographs against the fixed category label set.
///
/// The classifier owns its model session exclusively; the session is
/// released when the classifier is dropped. Requests are one-shot: there is
/// no retry inside the pipeline, and a caller wanting another attempt
/// re-invokes `classify` with a (possibly identical) image.
#[derive(Debug)]
pub struct TomatoDiseaseClassifier {
    model: LeafCnnModel,
    confidence_threshold: f32,
}

impl TomatoDiseaseClassifier {
    /// Creates a builder with default configuration.
    pub fn builder() -> TomatoDiseaseClassifierBuilder {
        TomatoDiseaseClassifierBuilder::new()
    }

    /// Constructs a classifier from a configuration.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        if !(0.0..=1.0).contains(&config.confidence_threshold) {
            return Err(ClassifierError::config(format!(
                "confidence threshold must be within [0.0, 1.0], got {}",
                config.confidence_threshold
            )));
        }

        Self::builder()
            .confidence_threshold(config.confidence_threshold)
            .input_size(config.input_size)
            .build(&config.model_path)
    }

    /// Returns the configured confidence threshold.
    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }

    /// Classifies a decoded image.
    ///
    /// Runs preprocess, inference, and interpretation in sequence and never
    /// returns an error: per-request failures surface as
    /// [`Diagnosis::AnalysisFailed`], low-confidence predictions as
    /// [`Diagnosis::Unrecognized`]. The caller renders the sentinel, not a
    /// stack trace.
    pub fn classify(&self, image: &DynamicImage) -> Diagnosis {
        // Alpha is discarded here; the network sees RGB only.
        let rgb = image.to_rgb8();
        resolve(self.run_pipeline(&rgb))
    }

    /// Classifies an image loaded from a file path.
    ///
    /// An unreadable or undecodable file yields the failure sentinel, like
    /// any other decode error.
    pub fn classify_path(&self, path: &Path) -> Diagnosis {
        resolve(crate::utils::load_image(path).and_then(|rgb| self.run_pipeline(&rgb)))
    }

    /// Classifies an image from an encoded byte stream.
    pub fn classify_bytes(&self, bytes: &[u8]) -> Diagnosis {
        resolve(decode_image(bytes).and_then(|rgb| self.run_pipeline(&rgb)))
    }

    fn run_pipeline(&self, rgb: &image::RgbImage) -> Result<Diagnosis, ClassifierError> {
        let scores = self.model.forward(rgb)?;
        debug!("interpreting score vector {scores:?}");
        interpret(&scores, self.confidence_threshold)
    }
}

/// Converts pipeline errors into the failure sentinel at the orchestration
/// boundary.
///
/// Decode failures are logged at warn (bad user input); everything else
/// indicates a model or buffer misconfiguration and is logged at error
/// for diagnosis.
fn resolve(outcome: Result<Diagnosis, ClassifierError>) -> Diagnosis {
    match outcome {
        Ok(diagnosis) => diagnosis,
        Err(e) if e.is_decode_failure() => {
            warn!("classification request failed to decode: {e}");
            Diagnosis::AnalysisFailed
        }
        Err(e) => {
            error!("classification pipeline failed: {e}");
            Diagnosis::AnalysisFailed
        }
    }
}

/// Builder for [`TomatoDiseaseClassifier`].
#[derive(Debug)]
pub struct TomatoDiseaseClassifierBuilder {
    confidence_threshold: f32,
    preprocess_config: LeafCnnPreprocessConfig,
}

impl TomatoDiseaseClassifierBuilder {
    /// Creates a new builder with the reference configuration: 224x224
    /// input, bilinear stretch resize, threshold 0.7.
    pub fn new() -> Self {
        Self {
            confidence_threshold: CONFIDENCE_THRESHOLD,
            preprocess_config: LeafCnnPreprocessConfig::default(),
        }
    }

    /// Sets the confidence cutoff for trusting a prediction.
    pub fn confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Sets the side length of the square input resolution.
    pub fn input_size(mut self, size: u32) -> Self {
        self.preprocess_config.input_shape = (size, size);
        self
    }

    /// Sets the full preprocessing configuration.
    pub fn preprocess_config(mut self, config: LeafCnnPreprocessConfig) -> Self {
        self.preprocess_config = config;
        self
    }

    /// Builds the classifier from a model artifact on disk.
    ///
    /// # Errors
    ///
    /// Load failures are fatal: the classifier is not constructed and the
    /// caller must treat the feature as unavailable rather than retry in a
    /// loop.
    pub fn build(self, model_path: &Path) -> Result<TomatoDiseaseClassifier, ClassifierError> {
        let model = LeafCnnModelBuilder::new()
            .preprocess_config(self.preprocess_config)
            .build(model_path)?;

        Ok(TomatoDiseaseClassifier {
            model,
            confidence_threshold: self.confidence_threshold,
        })
    }

    /// Builds the classifier from an in-memory model artifact.
    pub fn build_from_bytes(
        self,
        model_bytes: &[u8],
    ) -> Result<TomatoDiseaseClassifier, ClassifierError> {
        let model = LeafCnnModelBuilder::new()
            .preprocess_config(self.preprocess_config)
            .build_from_bytes(model_bytes, DEFAULT_MODEL_ASSET)?;

        Ok(TomatoDiseaseClassifier {
            model,
            confidence_threshold: self.confidence_threshold,
        })
    }
}

impl Default for TomatoDiseaseClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = TomatoDiseaseClassifierBuilder::new();
        assert_eq!(builder.confidence_threshold, 0.7);
        assert_eq!(builder.preprocess_config.input_shape, (224, 224));
    }

    #[test]
    fn test_builder_overrides() {
        let builder = TomatoDiseaseClassifierBuilder::new()
            .confidence_threshold(0.5)
            .input_size(192);
        assert_eq!(builder.confidence_threshold, 0.5);
        assert_eq!(builder.preprocess_config.input_shape, (192, 192));
    }

    #[test]
    fn test_build_rejects_missing_artifact() {
        let result = TomatoDiseaseClassifier::builder().build(Path::new("dummy_path.onnx"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_config_rejects_out_of_range_threshold() {
        let config = ClassifierConfig {
            model_path: PathBuf::from("dummy_path.onnx"),
            confidence_threshold: 1.5,
            input_size: 224,
        };
        let result = TomatoDiseaseClassifier::from_config(&config);
        assert!(matches!(result, Err(ClassifierError::ConfigError { .. })));
    }

    #[test]
    fn test_undecodable_bytes_resolve_to_failure_sentinel() {
        let outcome = decode_image(&[0xDE, 0xAD, 0xBE, 0xEF]).map(|_| unreachable!());
        let diagnosis = resolve(outcome);
        assert_eq!(diagnosis, Diagnosis::AnalysisFailed);
        assert_eq!(diagnosis.label(), crate::pipeline::ANALYSIS_FAILED);
        assert_eq!(diagnosis.confidence(), 0.0);
    }

    #[test]
    fn test_pipeline_error_resolves_to_failure_sentinel() {
        let diagnosis = resolve(Err(ClassifierError::invalid_input("score arity mismatch")));
        assert_eq!(diagnosis, Diagnosis::AnalysisFailed);
    }

    #[test]
    fn test_successful_diagnosis_passes_through() {
        let diagnosis = resolve(Ok(Diagnosis::Unrecognized { confidence: 0.4 }));
        assert_eq!(diagnosis, Diagnosis::Unrecognized { confidence: 0.4 });
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: ClassifierConfig =
            serde_json::from_str(r#"{ "model_path": "models/KilimoVision.onnx" }"#).unwrap();
        assert_eq!(config.confidence_threshold, CONFIDENCE_THRESHOLD);
        assert_eq!(config.input_size, 224);
        assert_eq!(config.model_path, PathBuf::from("models/KilimoVision.onnx"));
    }
}
