use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// 固定的重新編碼參數
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeParams {
    pub video_codec: String,
    pub preset: String,
    pub crf: u8,
    /// 音訊串流原樣複製
    pub copy_audio: bool,
}

impl Default for EncodeParams {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            preset: "slow".to_string(),
            crf: 23,
            copy_audio: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeStats {
    pub elapsed: Duration,
    pub output_size: u64,
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("無法啟動編碼器 {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("編碼器結束代碼 {code:?}:\n{stderr}")]
    Failed { code: Option<i32>, stderr: String },

    #[error("編碼器未產生輸出檔案: {}", .0.display())]
    MissingOutput(PathBuf),
}

/// 外部編碼能力，讓壓縮流程可以在測試中替換掉真正的 ffmpeg
pub trait VideoEncoder {
    fn encode(&self, source: &Path, destination: &Path, params: &EncodeParams)
    -> Result<EncodeStats, EncodeError>;
}

impl<T: VideoEncoder + ?Sized> VideoEncoder for &T {
    fn encode(
        &self,
        source: &Path,
        destination: &Path,
        params: &EncodeParams,
    ) -> Result<EncodeStats, EncodeError> {
        (**self).encode(source, destination, params)
    }
}
