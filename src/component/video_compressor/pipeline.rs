use super::encoder::{EncodeParams, VideoEncoder};
use super::size_arbiter::{ArbiterDecision, arbitrate};
use crate::config::FileTypeTable;
use crate::tools::{MediaFile, scan_media_files, validate_directory_exists, validate_output_outside_input};
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use rust_i18n::t;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 影片壓縮流程所需的全部設定，由互動層組出
#[derive(Debug, Clone)]
pub struct VideoBatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub params: EncodeParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Arbitrated {
        destination: PathBuf,
        decision: ArbiterDecision,
        /// 編碼器花費的時間
        elapsed: Duration,
    },
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoRunSummary {
    pub compressed: usize,
    pub kept_original: usize,
    pub failed: usize,
}

impl VideoRunSummary {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.compressed + self.kept_original + self.failed
    }

    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Arbitrated {
                decision: ArbiterDecision::KeptCompressed { .. },
                ..
            } => self.compressed += 1,
            FileOutcome::Arbitrated {
                decision: ArbiterDecision::KeptOriginal { .. },
                ..
            } => self.kept_original += 1,
            FileOutcome::Failed => self.failed += 1,
        }
    }
}

/// `<stem>_tmp.<ext>`，副檔名保留原始大小寫
#[must_use]
pub fn temp_output_path(output_dir: &Path, file: &MediaFile) -> PathBuf {
    let stem = file.file_stem();
    match file.path.extension() {
        Some(ext) => output_dir.join(format!("{stem}_tmp.{}", ext.to_string_lossy())),
        None => output_dir.join(format!("{stem}_tmp")),
    }
}

#[must_use]
pub fn final_output_path(output_dir: &Path, file: &MediaFile) -> PathBuf {
    let file_name = file.path.file_name().unwrap_or_default();
    output_dir.join(file_name)
}

pub struct CompressionPipeline<E: VideoEncoder> {
    encoder: E,
    file_type_table: FileTypeTable,
}

impl<E: VideoEncoder> CompressionPipeline<E> {
    pub const fn new(encoder: E, file_type_table: FileTypeTable) -> Self {
        Self {
            encoder,
            file_type_table,
        }
    }

    pub fn run(&self, config: &VideoBatchConfig) -> Result<VideoRunSummary> {
        validate_directory_exists(&config.input_dir)?;
        validate_output_outside_input(&config.input_dir, &config.output_dir)?;

        let files = scan_media_files(&config.input_dir, |path| {
            self.file_type_table.is_video_file(path)
        })?;
        info!("開始壓縮影片，共 {} 個檔案", files.len());

        let mut summary = VideoRunSummary::default();
        for file in &files {
            let outcome = self.process_file(file, config);
            summary.record(&outcome);
        }

        info!(
            "影片壓縮完成 - 壓縮: {}, 保留原檔: {}, 失敗: {}",
            summary.compressed, summary.kept_original, summary.failed
        );
        Ok(summary)
    }

    /// 處理單一檔案；任何錯誤都只影響此檔案
    pub fn process_file(&self, file: &MediaFile, config: &VideoBatchConfig) -> FileOutcome {
        let file_name = file.path.file_name().unwrap_or_default().to_string_lossy();
        let temp_path = temp_output_path(&config.output_dir, file);
        let final_path = final_output_path(&config.output_dir, file);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(t!("video.compressing", file = file_name).to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));

        let encoded = self
            .encoder
            .encode(&file.path, &temp_path, &config.params);
        spinner.finish_and_clear();

        let stats = match encoded {
            Ok(stats) => stats,
            Err(e) => {
                error!("編碼失敗 {}: {e}", file.path.display());
                println!(
                    "{} {}\n{}",
                    style("⚠").yellow(),
                    t!("video.encode_failed", file = file_name),
                    style(e.to_string()).dim()
                );
                remove_stray_temp(&temp_path);
                return FileOutcome::Failed;
            }
        };

        debug!(
            "編碼完成 {}: {} bytes, {}",
            file.path.display(),
            stats.output_size,
            format_elapsed(stats.elapsed)
        );

        match arbitrate(&file.path, &temp_path, &final_path) {
            Ok(decision) => {
                Self::print_decision(&file_name, &decision, stats.elapsed);
                FileOutcome::Arbitrated {
                    destination: final_path,
                    decision,
                    elapsed: stats.elapsed,
                }
            }
            Err(e) => {
                error!("無法處理壓縮結果 {}: {e:#}", file.path.display());
                println!(
                    "{} {}",
                    style("⚠").yellow(),
                    t!("video.finalize_failed", file = file_name, error = format!("{e:#}"))
                );
                remove_stray_temp(&temp_path);
                FileOutcome::Failed
            }
        }
    }

    fn print_decision(file_name: &str, decision: &ArbiterDecision, elapsed: Duration) {
        let elapsed = format_elapsed(elapsed);
        match decision {
            ArbiterDecision::KeptCompressed {
                original_size,
                compressed_size,
            } => println!(
                "{} {}",
                style("✔").green(),
                t!(
                    "video.kept_compressed",
                    file = file_name,
                    compressed = compressed_size,
                    original = original_size,
                    elapsed = elapsed
                )
            ),
            ArbiterDecision::KeptOriginal {
                original_size,
                compressed_size,
            } => println!(
                "{} {}",
                style("⚠").yellow(),
                t!(
                    "video.kept_original",
                    file = file_name,
                    compressed = compressed_size,
                    original = original_size,
                    elapsed = elapsed
                )
            ),
        }
    }
}

/// 以秒顯示，保留一位小數
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.1}s", elapsed.as_secs_f64())
}

fn remove_stray_temp(temp_path: &Path) {
    if !temp_path.exists() {
        return;
    }
    match fs::remove_file(temp_path) {
        Ok(()) => info!("已刪除殘留的暫存檔: {}", temp_path.display()),
        Err(e) => warn!("無法刪除暫存檔 {}: {e}", temp_path.display()),
    }
}
