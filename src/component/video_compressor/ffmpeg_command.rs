use super::encoder::{EncodeError, EncodeParams, EncodeStats, VideoEncoder};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

pub struct FfmpegCommand<'a> {
    program: &'a Path,
    source_path: &'a Path,
    destination_path: &'a Path,
    params: &'a EncodeParams,
}

impl<'a> FfmpegCommand<'a> {
    #[must_use]
    pub const fn new(
        program: &'a Path,
        source_path: &'a Path,
        destination_path: &'a Path,
        params: &'a EncodeParams,
    ) -> Self {
        Self {
            program,
            source_path,
            destination_path,
            params,
        }
    }

    #[must_use]
    pub fn build_args(&self) -> Vec<String> {
        let mut args: Vec<String> = ["-hide_banner", "-nostdin", "-y", "-i"]
            .iter()
            .map(ToString::to_string)
            .collect();
        args.push(self.source_path.display().to_string());
        args.extend([
            "-c:v".to_string(),
            self.params.video_codec.clone(),
            "-preset".to_string(),
            self.params.preset.clone(),
            "-crf".to_string(),
            self.params.crf.to_string(),
        ]);
        if self.params.copy_audio {
            args.extend(["-c:a".to_string(), "copy".to_string()]);
        }
        args.push(self.destination_path.display().to_string());
        args
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new(self.program);
        cmd.args(self.build_args());
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::piped());
        cmd
    }
}

/// 以外部 ffmpeg 執行檔進行編碼
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: PathBuf,
}

impl FfmpegEncoder {
    #[must_use]
    pub const fn new(program: PathBuf) -> Self {
        Self { program }
    }

    /// 從 PATH 中尋找 ffmpeg，找不到時回傳安裝說明
    pub fn locate() -> Result<Self> {
        let program = which::which("ffmpeg").context(
            "找不到 ffmpeg，請先安裝並加入 PATH（例如 `brew install ffmpeg`、`apt install ffmpeg` 或 `winget install ffmpeg`）",
        )?;
        info!("使用 ffmpeg: {}", program.display());
        Ok(Self::new(program))
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl VideoEncoder for FfmpegEncoder {
    fn encode(
        &self,
        source: &Path,
        destination: &Path,
        params: &EncodeParams,
    ) -> Result<EncodeStats, EncodeError> {
        let ffmpeg = FfmpegCommand::new(&self.program, source, destination, params);
        debug!("ffmpeg {}", ffmpeg.build_args().join(" "));

        let started = Instant::now();
        let output = ffmpeg
            .build_command()
            .output()
            .map_err(|source| EncodeError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(EncodeError::Failed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let output_size = std::fs::metadata(destination)
            .map_err(|_| EncodeError::MissingOutput(destination.to_path_buf()))?
            .len();

        Ok(EncodeStats {
            elapsed: started.elapsed(),
            output_size,
        })
    }
}
