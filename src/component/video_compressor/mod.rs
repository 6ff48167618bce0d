//! 影片批次壓縮元件
//!
//! 以 ffmpeg（H.264、preset slow、CRF 23、音訊直接複製）重新編碼資料夾中的影片，
//! 並保留原始檔與壓縮檔中較小的一個

mod encoder;
mod ffmpeg_command;
mod main;
mod pipeline;
mod size_arbiter;

pub use encoder::{EncodeError, EncodeParams, EncodeStats, VideoEncoder};
pub use ffmpeg_command::{FfmpegCommand, FfmpegEncoder};
pub use main::VideoCompressor;
pub use pipeline::{
    CompressionPipeline, FileOutcome, VideoBatchConfig, VideoRunSummary, final_output_path,
    format_elapsed, temp_output_path,
};
pub use size_arbiter::{ArbiterDecision, arbitrate, copy_preserving_times};
