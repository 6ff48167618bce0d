//! 圖片批次轉檔元件
//!
//! 遞迴處理資料夾中的圖片：轉檔、壓縮、壓縮並轉檔或移除中繼資料，
//! 輸出資料夾保留原本的子資料夾結構

mod error;
mod image_loader;
mod image_writer;
mod main;
mod operation;
mod operation_selector;
mod pipeline;
mod quality_mapper;

pub use error::{ImageJobError, QualityError};
pub use image_loader::{load_image, normalize_color_mode};
pub use image_writer::{
    DEFAULT_JPEG_QUALITY, DEFAULT_WEBP_QUALITY, png_compression_type, save_image,
};
pub use main::ImageConverter;
pub use operation::{
    FORMAT_MENU, FormatChoice, Operation, OperationKind, OutputFormat, QualityLevel,
    parse_format_selection,
};
pub use operation_selector::{OutputAction, PlannedOutput, plan_outputs};
pub use pipeline::{ConversionPipeline, ImageBatchConfig, ImageRunSummary};
pub use quality_mapper::{EncoderParams, map_quality, png_compression_level};
