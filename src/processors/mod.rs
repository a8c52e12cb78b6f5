//! Image processing utilities for the classification pipeline.
//!
//! # Modules
//!
//! * `normalization` - Pixel normalization into the network's tensor layout
//! * `postprocess` - Score vector postprocessing
//! * `types` - Type definitions used across the processors module

mod normalization;
mod postprocess;
pub mod types;

pub use normalization::*;
pub use postprocess::*;
pub use types::*;
