//! Utility functions for the classification pipeline.

pub mod image;

pub use image::{decode_image, dynamic_to_rgb, load_image};
