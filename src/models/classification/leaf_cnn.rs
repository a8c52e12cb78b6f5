//! Leaf Classification CNN
//!
//! This module provides a pure implementation of the bundled convolutional
//! network for tomato leaf disease classification: preprocessing into the
//! network's fixed input layout, the forward pass, and the raw score vector
//! it produces.

use crate::core::inference::ModelSession;
use crate::core::{ClassifierError, Tensor4D};
use crate::domain::DiseaseClass;
use crate::processors::{ChannelOrder, NormalizeImage};
use image::{RgbImage, imageops::FilterType};
use std::path::Path;
use tracing::debug;

/// Configuration for leaf network preprocessing.
#[derive(Debug, Clone)]
pub struct LeafCnnPreprocessConfig {
    /// Input shape (height, width)
    pub input_shape: (u32, u32),
    /// Resizing filter to use
    pub resize_filter: FilterType,
    /// Scaling factor applied before normalization (defaults to 1.0 / 255.0)
    pub normalize_scale: f32,
    /// Mean values for normalization (RGB order)
    pub normalize_mean: [f32; 3],
    /// Standard deviation values for normalization (RGB order)
    pub normalize_std: [f32; 3],
    /// Channel ordering for the normalized tensor
    pub channel_order: ChannelOrder,
}

impl Default for LeafCnnPreprocessConfig {
    fn default() -> Self {
        // Triangle is bilinear; the network was trained on direct
        // bilinear stretch-resize without letterboxing or cropping.
        Self {
            input_shape: (224, 224),
            resize_filter: FilterType::Triangle,
            normalize_scale: 1.0 / 255.0,
            normalize_mean: [0.0, 0.0, 0.0],
            normalize_std: [1.0, 1.0, 1.0],
            channel_order: ChannelOrder::HWC,
        }
    }
}

/// Preprocessor turning a decoded image into the network's input tensor.
///
/// The source image is stretch-resized to the fixed input resolution
/// (non-aspect-preserving) and normalized channel by channel. One tensor is
/// created per request and discarded after inference.
#[derive(Debug)]
pub struct LeafPreprocessor {
    /// Input shape (height, width)
    input_shape: (u32, u32),
    /// Resizing filter
    resize_filter: FilterType,
    /// Image normalizer
    normalizer: NormalizeImage,
}

impl LeafPreprocessor {
    /// Creates a preprocessor from a preprocessing configuration.
    pub fn new(config: &LeafCnnPreprocessConfig) -> Result<Self, ClassifierError> {
        let normalizer = NormalizeImage::new(
            Some(config.normalize_scale),
            Some(config.normalize_mean),
            Some(config.normalize_std),
            Some(config.channel_order.clone()),
        )?;

        Ok(Self {
            input_shape: config.input_shape,
            resize_filter: config.resize_filter,
            normalizer,
        })
    }

    /// Returns the configured input shape (height, width).
    pub fn input_shape(&self) -> (u32, u32) {
        self.input_shape
    }

    /// Preprocesses an image into the network's input tensor.
    ///
    /// # Arguments
    ///
    /// * `image` - Decoded RGB image of arbitrary source dimensions
    ///
    /// # Returns
    ///
    /// A tensor of shape `(1, H, W, 3)` with every value in `[0.0, 1.0]`
    /// for the default scale/mean/std.
    pub fn process(&self, image: &RgbImage) -> Result<Tensor4D, ClassifierError> {
        let (height, width) = self.input_shape;
        let resized = image::imageops::resize(image, width, height, self.resize_filter);
        self.normalizer.normalize_to(&resized)
    }
}

/// The bundled leaf classification network.
///
/// Owns the loaded inference session for its lifetime; dropping the model
/// releases the native engine resources.
#[derive(Debug)]
pub struct LeafCnnModel {
    /// ONNX Runtime inference session
    inference: ModelSession,
    /// Image preprocessor
    preprocessor: LeafPreprocessor,
    /// Expected length of the output score vector
    num_classes: usize,
}

impl LeafCnnModel {
    /// Creates a new model from a session and preprocessor.
    pub fn new(inference: ModelSession, preprocessor: LeafPreprocessor) -> Self {
        Self {
            inference,
            preprocessor,
            num_classes: DiseaseClass::COUNT,
        }
    }

    /// Preprocesses an image for classification.
    pub fn preprocess(&self, image: &RgbImage) -> Result<Tensor4D, ClassifierError> {
        self.preprocessor.process(image)
    }

    /// Runs inference on the preprocessed tensor.
    ///
    /// # Returns
    ///
    /// The dense per-class score vector, one entry per [`DiseaseClass::ALL`]
    /// category in training order. Scores are raw network outputs compared
    /// only against each other and the confidence threshold.
    pub fn infer(&self, tensor: &Tensor4D) -> Result<Vec<f32>, ClassifierError> {
        self.inference.infer_scores(tensor, self.num_classes)
    }

    /// Performs the complete forward pass: preprocess then infer.
    pub fn forward(&self, image: &RgbImage) -> Result<Vec<f32>, ClassifierError> {
        let (src_width, src_height) = image.dimensions();
        debug!(
            "preprocessing {}x{} image to {:?}",
            src_width,
            src_height,
            self.preprocessor.input_shape()
        );
        let tensor = self.preprocess(image)?;

        debug!("running forward pass for '{}'", self.inference.model_name());
        self.infer(&tensor)
    }
}

/// Builder for the leaf classification network.
#[derive(Debug, Default)]
pub struct LeafCnnModelBuilder {
    /// Preprocessing configuration
    preprocess_config: LeafCnnPreprocessConfig,
}

impl LeafCnnModelBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            preprocess_config: LeafCnnPreprocessConfig::default(),
        }
    }

    /// Sets the preprocessing configuration.
    pub fn preprocess_config(mut self, config: LeafCnnPreprocessConfig) -> Self {
        self.preprocess_config = config;
        self
    }

    /// Sets the input image shape (height, width).
    pub fn input_shape(mut self, shape: (u32, u32)) -> Self {
        self.preprocess_config.input_shape = shape;
        self
    }

    /// Sets the resizing filter.
    pub fn resize_filter(mut self, filter: FilterType) -> Self {
        self.preprocess_config.resize_filter = filter;
        self
    }

    /// Builds the model from an ONNX artifact on disk.
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::ModelLoad` if the artifact cannot be loaded
    /// and `ClassifierError::ConfigError` if its declared input shape does
    /// not match the configured preprocessing layout.
    pub fn build(self, model_path: &Path) -> Result<LeafCnnModel, ClassifierError> {
        let inference = ModelSession::from_file(model_path)?;
        self.finish(inference)
    }

    /// Builds the model from an in-memory ONNX artifact.
    pub fn build_from_bytes(
        self,
        model_bytes: &[u8],
        model_name: &str,
    ) -> Result<LeafCnnModel, ClassifierError> {
        let inference = ModelSession::from_bytes(model_bytes, model_name)?;
        self.finish(inference)
    }

    fn finish(self, inference: ModelSession) -> Result<LeafCnnModel, ClassifierError> {
        let (height, width) = self.preprocess_config.input_shape;
        let expected = match self.preprocess_config.channel_order {
            ChannelOrder::HWC => [1, height as usize, width as usize, 3],
            ChannelOrder::CHW => [1, 3, height as usize, width as usize],
        };
        inference.validate_input_shape(&expected)?;

        let preprocessor = LeafPreprocessor::new(&self.preprocess_config)?;
        Ok(LeafCnnModel::new(inference, preprocessor))
    }
}
