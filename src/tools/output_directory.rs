use super::path_validator::validate_output_outside_input;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

pub const VIDEO_OUTPUT_PREFIX: &str = "compress";
pub const IMAGE_OUTPUT_PREFIX: &str = "converted";

#[must_use]
pub fn output_directory_name(prefix: &str, timestamp: &DateTime<Local>) -> String {
    format!("{prefix}_{}", timestamp.format("%Y%m%d_%H%M%S"))
}

/// 計算與輸入資料夾同層的輸出資料夾路徑，例如 `/media/compress_20240101_120000`
pub fn sibling_output_directory(
    input_dir: &Path,
    prefix: &str,
    timestamp: &DateTime<Local>,
) -> Result<PathBuf> {
    let absolute = input_dir
        .canonicalize()
        .with_context(|| format!("無法解析路徑: {}", input_dir.display()))?;
    let parent = absolute
        .parent()
        .with_context(|| format!("輸入資料夾沒有上層目錄: {}", absolute.display()))?;

    let output_dir = parent.join(output_directory_name(prefix, timestamp));
    validate_output_outside_input(&absolute, &output_dir)?;
    Ok(output_dir)
}

/// 建立本次執行專用的輸出資料夾
pub fn create_output_directory(input_dir: &Path, prefix: &str) -> Result<PathBuf> {
    let output_dir = sibling_output_directory(input_dir, prefix, &Local::now())?;
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("無法建立輸出資料夾: {}", output_dir.display()))?;
    log::info!("建立輸出資料夾: {}", output_dir.display());
    Ok(output_dir)
}
