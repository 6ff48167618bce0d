use super::encoder::EncodeParams;
use super::ffmpeg_command::FfmpegEncoder;
use super::pipeline::{CompressionPipeline, VideoBatchConfig, VideoRunSummary};
use crate::config::Config;
use crate::tools::{VIDEO_OUTPUT_PREFIX, create_output_directory, validate_directory_exists};
use anyhow::Result;
use console::style;
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use log::info;
use rust_i18n::t;
use std::path::PathBuf;

/// 影片批次壓縮（互動介面）
pub struct VideoCompressor {
    config: Config,
}

impl VideoCompressor {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style(t!("video.title")).cyan().bold());

        // 缺少 ffmpeg 時直接結束
        let encoder = FfmpegEncoder::locate()?;
        println!(
            "{}",
            style(t!("video.using_ffmpeg", path = encoder.program().display())).dim()
        );

        let Some(input_dir) = self.prompt_input_path()? else {
            println!("{}", style(t!("common.no_folder")).yellow());
            return Ok(());
        };
        validate_directory_exists(&input_dir)?;

        let output_dir = create_output_directory(&input_dir, VIDEO_OUTPUT_PREFIX)?;
        println!(
            "{}",
            style(t!("common.output_dir", path = output_dir.display())).dim()
        );

        let batch = VideoBatchConfig {
            input_dir,
            output_dir,
            params: EncodeParams::default(),
        };
        let pipeline = CompressionPipeline::new(encoder, self.config.file_type_table.clone());
        let summary = pipeline.run(&batch)?;

        self.print_summary(&summary, &batch);
        Ok(())
    }

    fn prompt_input_path(&self) -> Result<Option<PathBuf>> {
        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("video.prompt_folder"))
            .allow_empty(true)
            .interact_text()?;
        let path = path.trim();
        if path.is_empty() {
            return Ok(None);
        }
        Ok(Some(PathBuf::from(path)))
    }

    fn print_summary(&self, summary: &VideoRunSummary, batch: &VideoBatchConfig) {
        println!();
        println!("{}", style(t!("video.summary_title")).cyan().bold());
        println!("  {}", t!("video.summary_total", count = summary.total()));
        println!(
            "  {}",
            t!("video.summary_compressed", count = style(summary.compressed).green())
        );
        println!(
            "  {}",
            t!("video.summary_kept", count = style(summary.kept_original).yellow())
        );
        if summary.failed > 0 {
            println!(
                "  {}",
                t!("video.summary_failed", count = style(summary.failed).red())
            );
        }
        println!(
            "\n{}",
            style(t!("video.finished", path = batch.output_dir.display())).green()
        );

        info!(
            "影片壓縮結束 - 輸出資料夾: {}",
            batch.output_dir.display()
        );
    }
}
