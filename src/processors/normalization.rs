//! Image normalization utilities for classification.
//!
//! This module converts decoded RGB images into the normalized float tensor
//! the network expects. For the bundled leaf network every 8-bit channel is
//! divided by 255.0 (zero mean, unit std) and written in HWC order, matching
//! the preprocessing the network was trained with.

use crate::core::{ClassifierError, Tensor4D};
use crate::processors::types::ChannelOrder;
use image::RgbImage;

/// Normalizes images for model input.
///
/// This struct encapsulates the parameters needed to normalize images,
/// including scaling factors, mean values, standard deviations, and channel
/// ordering.
#[derive(Debug)]
pub struct NormalizeImage {
    /// Scaling factors for each channel (alpha = scale / std)
    pub alpha: [f32; 3],
    /// Offset values for each channel (beta = -mean / std)
    pub beta: [f32; 3],
    /// Channel ordering (CHW or HWC)
    pub order: ChannelOrder,
}

impl NormalizeImage {
    /// Creates a new NormalizeImage instance with the specified parameters.
    ///
    /// # Arguments
    ///
    /// * `scale` - Optional scaling factor (defaults to 1.0/255.0)
    /// * `mean` - Optional mean values for each channel (defaults to [0.0, 0.0, 0.0])
    /// * `std` - Optional standard deviation values for each channel (defaults to [1.0, 1.0, 1.0])
    /// * `order` - Optional channel ordering (defaults to HWC)
    ///
    /// # Errors
    ///
    /// Returns an error if scale is not positive or any standard deviation
    /// value is not positive.
    pub fn new(
        scale: Option<f32>,
        mean: Option<[f32; 3]>,
        std: Option<[f32; 3]>,
        order: Option<ChannelOrder>,
    ) -> Result<Self, ClassifierError> {
        let scale = scale.unwrap_or(1.0 / 255.0);
        let mean = mean.unwrap_or([0.0, 0.0, 0.0]);
        let std = std.unwrap_or([1.0, 1.0, 1.0]);
        let order = order.unwrap_or(ChannelOrder::HWC);

        if scale <= 0.0 {
            return Err(ClassifierError::ConfigError {
                message: "Scale must be greater than 0".to_string(),
            });
        }

        for (i, &s) in std.iter().enumerate() {
            if s <= 0.0 {
                return Err(ClassifierError::ConfigError {
                    message: format!(
                        "Standard deviation at index {i} must be greater than 0, got {s}"
                    ),
                });
            }
        }

        let mut alpha = [0.0f32; 3];
        let mut beta = [0.0f32; 3];
        for c in 0..3 {
            alpha[c] = scale / std[c];
            beta[c] = -mean[c] / std[c];
        }

        Ok(Self { alpha, beta, order })
    }

    /// Normalization for the bundled leaf network: divide each 8-bit channel
    /// by 255.0 and keep HWC order.
    pub fn for_leaf_network() -> Result<Self, ClassifierError> {
        Self::new(None, None, None, Some(ChannelOrder::HWC))
    }

    /// Normalizes a single image into a 4D tensor with a batch dimension of 1.
    ///
    /// Pixels are read in row-major order with a top-left origin; each pixel
    /// contributes its R, G, B channel values in that order (alpha has
    /// already been discarded by the RGB conversion).
    ///
    /// # Errors
    ///
    /// Returns an error if the tensor cannot be created from the normalized
    /// values.
    pub fn normalize_to(&self, img: &RgbImage) -> Result<Tensor4D, ClassifierError> {
        let (width, height) = img.dimensions();
        let channels = 3usize;

        match self.order {
            ChannelOrder::HWC => {
                let mut result = vec![0.0f32; (height * width) as usize * channels];

                for y in 0..height {
                    for x in 0..width {
                        let pixel = img.get_pixel(x, y);
                        for c in 0..channels {
                            let channel_value = pixel[c] as f32;
                            let dst_idx =
                                (y * width + x) as usize * channels + c;
                            result[dst_idx] = channel_value * self.alpha[c] + self.beta[c];
                        }
                    }
                }

                ndarray::Array4::from_shape_vec(
                    (1, height as usize, width as usize, channels),
                    result,
                )
                .map_err(ClassifierError::Tensor)
            }
            ChannelOrder::CHW => {
                let mut result = vec![0.0f32; channels * (height * width) as usize];

                for c in 0..channels {
                    for y in 0..height {
                        for x in 0..width {
                            let pixel = img.get_pixel(x, y);
                            let channel_value = pixel[c] as f32;
                            let dst_idx =
                                c * (height * width) as usize + (y * width + x) as usize;
                            result[dst_idx] = channel_value * self.alpha[c] + self.beta[c];
                        }
                    }
                }

                ndarray::Array4::from_shape_vec(
                    (1, channels, height as usize, width as usize),
                    result,
                )
                .map_err(ClassifierError::Tensor)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_image_normalizes_to_ones() {
        let img = RgbImage::from_pixel(4, 4, image::Rgb([255, 255, 255]));
        let normalizer = NormalizeImage::for_leaf_network().unwrap();

        let tensor = normalizer.normalize_to(&img).unwrap();
        assert_eq!(tensor.shape(), &[1, 4, 4, 3]);
        assert!(tensor.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_values_stay_in_unit_range() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgb([0, 128, 255]));
        img.put_pixel(1, 1, image::Rgb([17, 42, 199]));
        let normalizer = NormalizeImage::for_leaf_network().unwrap();

        let tensor = normalizer.normalize_to(&img).unwrap();
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_hwc_channel_order() {
        let mut img = RgbImage::new(1, 1);
        img.put_pixel(0, 0, image::Rgb([255, 0, 51]));
        let normalizer = NormalizeImage::for_leaf_network().unwrap();

        let tensor = normalizer.normalize_to(&img).unwrap();
        assert_eq!(tensor[[0, 0, 0, 0]], 1.0);
        assert_eq!(tensor[[0, 0, 0, 1]], 0.0);
        assert_eq!(tensor[[0, 0, 0, 2]], 51.0 / 255.0);
    }

    #[test]
    fn test_chw_layout_shape() {
        let img = RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]));
        let normalizer =
            NormalizeImage::new(None, None, None, Some(ChannelOrder::CHW)).unwrap();

        let tensor = normalizer.normalize_to(&img).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 2, 3]);
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        assert!(NormalizeImage::new(Some(0.0), None, None, None).is_err());
    }

    #[test]
    fn test_rejects_non_positive_std() {
        assert!(NormalizeImage::new(None, None, Some([1.0, 0.0, 1.0]), None).is_err());
    }
}
