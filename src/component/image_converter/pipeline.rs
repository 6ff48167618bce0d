use super::image_loader::load_image;
use super::image_writer::save_image;
use super::operation::Operation;
use super::operation_selector::{OutputAction, PlannedOutput, plan_outputs};
use crate::config::FileTypeTable;
use crate::tools::{
    ensure_directory_exists, lowercase_extension, validate_directory_exists,
    validate_output_outside_input,
};
use anyhow::{Context, Result};
use console::style;
use log::{error, info, warn};
use rust_i18n::t;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 圖片批次流程所需的全部設定，由互動層組出
#[derive(Debug, Clone)]
pub struct ImageBatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub operation: Operation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageRunSummary {
    /// 實際寫出的檔案數
    pub processed: usize,
    pub unreadable: usize,
    pub write_failures: usize,
}

pub struct ConversionPipeline {
    file_type_table: FileTypeTable,
}

impl ConversionPipeline {
    #[must_use]
    pub const fn new(file_type_table: FileTypeTable) -> Self {
        Self { file_type_table }
    }

    /// 遞迴處理輸入資料夾，並在輸出資料夾中建立相同的子資料夾結構
    pub fn run(&self, config: &ImageBatchConfig) -> Result<ImageRunSummary> {
        validate_directory_exists(&config.input_dir)?;
        validate_output_outside_input(&config.input_dir, &config.output_dir)?;
        ensure_directory_exists(&config.output_dir)?;

        info!(
            "開始處理圖片 ({:?}): {} -> {}",
            config.operation.kind(),
            config.input_dir.display(),
            config.output_dir.display()
        );

        let mut summary = ImageRunSummary::default();

        for entry in WalkDir::new(&config.input_dir)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("無法讀取項目: {e}");
                    continue;
                }
            };

            let relative = entry
                .path()
                .strip_prefix(&config.input_dir)
                .context("走訪結果不在輸入資料夾內")?;

            if entry.file_type().is_dir() {
                // 即使之後沒有任何可處理的檔案也要建立
                let target_dir = config.output_dir.join(relative);
                std::fs::create_dir_all(&target_dir)
                    .with_context(|| format!("無法建立資料夾: {}", target_dir.display()))?;
                continue;
            }

            // 指向檔案的符號連結也要處理
            if !entry.path().is_file() || !self.file_type_table.is_image_file(entry.path()) {
                continue;
            }

            let target_dir = relative
                .parent()
                .map_or_else(|| config.output_dir.clone(), |p| config.output_dir.join(p));
            Self::process_image(entry.path(), &target_dir, &config.operation, &mut summary);
        }

        info!(
            "圖片處理完成 - 輸出: {}, 無法讀取: {}, 寫入失敗: {}",
            summary.processed, summary.unreadable, summary.write_failures
        );
        Ok(summary)
    }

    fn process_image(
        source: &Path,
        target_dir: &Path,
        operation: &Operation,
        summary: &mut ImageRunSummary,
    ) {
        let image = match load_image(source) {
            Ok(image) => image,
            Err(e) => {
                warn!("{e}");
                println!(
                    "{} {}",
                    style("⚠").yellow(),
                    t!("image.skipping", path = source.display(), error = e)
                );
                summary.unreadable += 1;
                return;
            }
        };

        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source_extension = lowercase_extension(source);

        for planned in plan_outputs(operation, &source_extension) {
            let destination = target_dir.join(format!("{stem}.{}", planned.extension));
            match save_image(&image, &planned.format, &planned.params, &destination) {
                Ok(()) => {
                    summary.processed += 1;
                    info!(
                        "{:?}: {} -> {}",
                        planned.action,
                        source.display(),
                        destination.display()
                    );
                    println!("{} {}", style("✔").green(), progress_line(&planned, source, &destination));
                }
                Err(e) => {
                    error!("{e}");
                    println!(
                        "{} {}",
                        style("✘").red(),
                        t!("image.write_failed", path = destination.display(), error = e)
                    );
                    summary.write_failures += 1;
                }
            }
        }
    }
}

fn progress_line(planned: &PlannedOutput, source: &Path, destination: &Path) -> String {
    let source = source.display();
    let path = destination.display();
    let quality = planned
        .quality
        .map(|q| q.to_string())
        .unwrap_or_default();
    match planned.action {
        OutputAction::Converted => t!("image.converted", source = source, path = path).to_string(),
        OutputAction::Compressed => {
            t!("image.compressed", source = source, path = path, quality = quality).to_string()
        }
        OutputAction::CompressedAndConverted => t!(
            "image.compressed_converted",
            source = source,
            path = path,
            quality = quality
        )
        .to_string(),
        OutputAction::MetadataRemoved => {
            t!("image.metadata_removed", source = source, path = path).to_string()
        }
    }
}
