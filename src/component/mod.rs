//! 功能元件模組
//!
//! 每個子模組實現一個獨立的功能，包含互動介面與核心流程

pub mod image_converter;
pub mod video_compressor;

pub use image_converter::ImageConverter;
pub use video_compressor::VideoCompressor;
