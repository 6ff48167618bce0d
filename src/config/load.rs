use crate::config::types::{Config, FileTypeTable, Language};
use anyhow::{Context, Result};

/// 編譯時嵌入的檔案類型設定（不需要外部檔案）
const FILE_TYPE_TABLE_JSON: &str = include_str!("../data/file_type_table.json");

impl Config {
    pub fn new() -> Result<Self> {
        Ok(Self {
            file_type_table: Self::load_embedded_file_type_table()?,
            language: Language::detect(),
        })
    }

    /// 從編譯時嵌入的 JSON 載入檔案類型表
    fn load_embedded_file_type_table() -> Result<FileTypeTable> {
        serde_json::from_str(FILE_TYPE_TABLE_JSON).context("無法解析嵌入的檔案類型設定")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_embedded_table_covers_supported_extensions() {
        let config = Config::new().unwrap();
        let table = &config.file_type_table;

        for ext in ["mp4", "mov", "avi", "mkv", "flv", "wmv"] {
            assert!(table.is_video_file(Path::new(&format!("a.{ext}"))), "{ext}");
        }
        for ext in ["jpg", "jpeg", "png", "webp", "bmp", "gif", "tiff", "heic"] {
            assert!(table.is_image_file(Path::new(&format!("a.{ext}"))), "{ext}");
        }
        assert!(!table.is_image_file(Path::new("a.tif")));
        assert!(!table.is_video_file(Path::new("a.webm")));
    }
}
