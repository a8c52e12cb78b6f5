//! Error types for the classification pipeline.
//!
//! This module defines the error types that can occur while loading the
//! model, preprocessing an image, or running inference, together with
//! utility constructors that attach context to the underlying cause.

use thiserror::Error;

/// Enum representing the errors that can occur in the classification pipeline.
///
/// Load failures are fatal to the component: no classification can proceed
/// without a valid model session. Decode and inference failures are
/// per-request conditions that the pipeline orchestration converts into the
/// failure sentinel instead of propagating to the caller.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Error occurred while decoding an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error occurred while loading the model artifact.
    #[error("model load '{model}': {context}")]
    ModelLoad {
        /// The model path or name being loaded.
        model: String,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error occurred during the forward pass.
    #[error("inference: {context}")]
    Inference {
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl ClassifierError {
    /// Creates a ClassifierError for a failed model load.
    pub fn model_load(
        model: impl Into<String>,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ModelLoad {
            model: model.into(),
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a ClassifierError for inference operations.
    pub fn inference(
        context: impl Into<String>,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a ClassifierError for invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a ClassifierError for configuration errors.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Whether this error is a per-request decode failure caused by the
    /// supplied image, as opposed to a pipeline configuration bug.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::ImageLoad(_))
    }
}

impl From<image::ImageError> for ClassifierError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failure_discrimination() {
        let decode = ClassifierError::ImageLoad(image::ImageError::IoError(
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated"),
        ));
        assert!(decode.is_decode_failure());

        let config = ClassifierError::config("bad threshold");
        assert!(!config.is_decode_failure());

        let shape = ndarray::Array4::<f32>::from_shape_vec((1, 2, 2, 3), vec![0.0; 7])
            .map_err(ClassifierError::Tensor)
            .unwrap_err();
        assert!(!shape.is_decode_failure());
    }
}
