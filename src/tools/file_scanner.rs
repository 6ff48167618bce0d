use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 單次處理中的媒體檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub path: PathBuf,
    /// 小寫、不含前導點
    pub extension: String,
    pub size: u64,
}

impl MediaFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("無法讀取檔案資訊: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            extension: lowercase_extension(path),
            size: metadata.len(),
        })
    }

    #[must_use]
    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[must_use]
pub fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// 只掃描目錄第一層（不遞迴），依檔名排序
pub fn scan_media_files<F>(directory: &Path, is_supported: F) -> Result<Vec<MediaFile>>
where
    F: Fn(&Path) -> bool,
{
    let mut files = Vec::new();

    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("無法讀取資料夾內容: {}", directory.display()))?;
        // 指向檔案的符號連結也算
        if !entry.path().is_file() || !is_supported(entry.path()) {
            continue;
        }
        files.push(MediaFile::from_path(entry.path())?);
    }

    Ok(files)
}
