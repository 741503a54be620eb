//! # Text Segmentation

pub mod text_segmentor;

pub use text_segmentor::*;
