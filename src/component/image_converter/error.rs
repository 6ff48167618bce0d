use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualityError {
    #[error("品質必須是整數: {0}")]
    NotANumber(String),

    #[error("品質必須介於 0 到 100: {0}")]
    OutOfRange(i64),
}

#[derive(Debug, Error)]
pub enum ImageJobError {
    #[error("無法讀取圖片 {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[cfg(feature = "heic")]
    #[error("無法解碼 HEIC {}: {message}", path.display())]
    Heic { path: PathBuf, message: String },

    #[error("無法寫入 {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("無法編碼 {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("無法編碼 WebP {}: {message}", path.display())]
    WebP { path: PathBuf, message: String },

    #[error("不支援的輸出格式: {0}")]
    UnsupportedFormat(String),
}
