//! ONNX Runtime session management for the bundled classification network.
//!
//! A [`ModelSession`] is the model handle of the pipeline: it owns the
//! loaded inference engine, knows the model's input and output tensor names,
//! and runs one forward pass at a time. The underlying session sits behind a
//! mutex so callers sharing a handle across threads serialize on it; the
//! pipeline itself never runs more than one inference per handle at once.
//! Native engine memory is released when the session is dropped.

use crate::core::{Tensor4D, errors::ClassifierError};
use ort::logging::LogLevel;
use ort::session::Session;
use ort::value::{TensorRef, ValueType};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

pub struct ModelSession {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    model_name: String,
}

impl std::fmt::Debug for ModelSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSession")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl ModelSession {
    /// Loads a model from a file on disk.
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path to the serialized ONNX model artifact
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::ModelLoad` if the artifact cannot be read
    /// or parsed by ONNX Runtime. No classification may proceed without a
    /// valid session.
    pub fn from_file(model_path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = model_path.as_ref();
        debug!("loading model artifact from {}", path.display());
        let session = Session::builder()?
            .with_log_level(LogLevel::Error)?
            .commit_from_file(path)
            .map_err(|e| {
                ClassifierError::model_load(
                    path.display().to_string(),
                    "failed to create ONNX session",
                    e,
                )
            })?;
        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown_model")
            .to_string();

        Self::from_session(session, model_name)
    }

    /// Loads a model from an in-memory byte blob.
    ///
    /// This mirrors how the packaged artifact is mapped out of application
    /// assets on the original platform.
    pub fn from_bytes(model_bytes: &[u8], model_name: &str) -> Result<Self, ClassifierError> {
        debug!(
            "loading model '{}' from memory ({:.2} MB)",
            model_name,
            model_bytes.len() as f64 / (1024.0 * 1024.0)
        );
        let session = Session::builder()?
            .with_log_level(LogLevel::Error)?
            .commit_from_memory(model_bytes)
            .map_err(|e| {
                ClassifierError::model_load(model_name, "failed to create ONNX session", e)
            })?;

        Self::from_session(session, model_name.to_string())
    }

    fn from_session(session: Session, model_name: String) -> Result<Self, ClassifierError> {
        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| {
                ClassifierError::model_load(
                    &model_name,
                    "model declares no inputs",
                    SimpleError::new("invalid model"),
                )
            })?;
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| {
                ClassifierError::model_load(
                    &model_name,
                    "model declares no outputs",
                    SimpleError::new("invalid model"),
                )
            })?;

        Ok(ModelSession {
            session: Mutex::new(session),
            input_name,
            output_name,
            model_name,
        })
    }

    /// Returns the model name associated with this session.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Attempts to retrieve the primary input tensor shape declared by the model.
    ///
    /// Returns a vector of dimensions if available. Dynamic dimensions (e.g., -1) are returned as-is.
    pub fn primary_input_shape(&self) -> Option<Vec<i64>> {
        let session_guard = self.session.lock().ok()?;
        let input = session_guard.inputs.first()?;
        match &input.input_type {
            ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
            _ => None,
        }
    }

    /// Validates that the model's declared input shape is compatible with
    /// the expected fixed shape. Dynamic dimensions are accepted.
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::ConfigError` on a mismatch: the model
    /// artifact and the preprocessor disagree on tensor layout, which is a
    /// construction-time bug rather than a per-request condition.
    pub fn validate_input_shape(&self, expected: &[usize]) -> Result<(), ClassifierError> {
        let Some(declared) = self.primary_input_shape() else {
            // Shape metadata is optional in the ONNX graph; trust the runner
            // to reject mismatched tensors at call time.
            return Ok(());
        };

        if declared.len() != expected.len() {
            return Err(ClassifierError::config(format!(
                "model '{}' declares a {}D input, expected {}D ({:?})",
                self.model_name,
                declared.len(),
                expected.len(),
                expected
            )));
        }

        for (axis, (&got, &want)) in declared.iter().zip(expected).enumerate() {
            if got > 0 && got as usize != want {
                return Err(ClassifierError::config(format!(
                    "model '{}' input axis {} is {}, expected {} (declared {:?}, expected {:?})",
                    self.model_name, axis, got, want, declared, expected
                )));
            }
        }

        Ok(())
    }

    /// Runs a single forward pass and returns the dense per-class score vector.
    ///
    /// # Arguments
    ///
    /// * `x` - Preprocessed input tensor, batch size 1
    /// * `num_classes` - Expected length of the output vector
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::Inference` if the forward pass fails, and
    /// `ClassifierError::InvalidInput` if the output tensor does not match
    /// the expected `(1, num_classes)` shape. Shape disagreement indicates a
    /// model/buffer misconfiguration, not bad user input.
    pub fn infer_scores(
        &self,
        x: &Tensor4D,
        num_classes: usize,
    ) -> Result<Vec<f32>, ClassifierError> {
        let input_shape = x.shape().to_vec();

        let input_tensor = TensorRef::from_array_view(x.view()).map_err(|e| {
            ClassifierError::inference(
                format!("failed to convert input tensor with shape {input_shape:?}"),
                e,
            )
        })?;
        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session_guard = self.session.lock().map_err(|_| {
            ClassifierError::inference(
                format!("failed to acquire session lock for model '{}'", self.model_name),
                SimpleError::new("session lock acquisition failed"),
            )
        })?;

        let outputs = session_guard.run(inputs).map_err(|e| {
            ClassifierError::inference(
                format!(
                    "forward pass failed for model '{}' with input '{}' -> output '{}'",
                    self.model_name, self.input_name, self.output_name
                ),
                e,
            )
        })?;

        let (output_shape, output_data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                ClassifierError::inference(
                    format!("failed to extract output tensor '{}' as f32", self.output_name),
                    e,
                )
            })?;

        if output_shape.len() != 2 {
            return Err(ClassifierError::invalid_input(format!(
                "model '{}' produced a {}D output with shape {:?}, expected 2D (batch, classes)",
                self.model_name,
                output_shape.len(),
                output_shape
            )));
        }

        let batch_size = output_shape[0] as usize;
        let classes = output_shape[1] as usize;
        if batch_size != input_shape[0] || classes != num_classes {
            return Err(ClassifierError::invalid_input(format!(
                "output shape mismatch for model '{}': got ({}, {}), expected ({}, {})",
                self.model_name, batch_size, classes, input_shape[0], num_classes
            )));
        }

        if output_data.len() != batch_size * classes {
            return Err(ClassifierError::invalid_input(format!(
                "output data size mismatch: expected {}, got {}",
                batch_size * classes,
                output_data.len()
            )));
        }

        Ok(output_data.to_vec())
    }
}

/// A minimal error wrapper for failure sites without an underlying source.
#[derive(Debug)]
pub(crate) struct SimpleError {
    message: &'static str,
}

impl SimpleError {
    pub(crate) fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl std::fmt::Display for SimpleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SimpleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_rejects_missing_artifact() {
        let result = ModelSession::from_file("dummy_path.onnx");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_bytes_rejects_malformed_artifact() {
        let result = ModelSession::from_bytes(&[0u8; 16], "garbage");
        assert!(result.is_err());
    }
}
