use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTypeTable {
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
    #[serde(rename = "IMAGE_FILE")]
    pub image_file: Vec<String>,
}

impl FileTypeTable {
    #[must_use]
    pub fn video_extensions_set(&self) -> HashSet<String> {
        Self::normalize(&self.video_file)
    }

    #[must_use]
    pub fn image_extensions_set(&self) -> HashSet<String> {
        Self::normalize(&self.image_file)
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        Self::matches(&self.video_extensions_set(), path)
    }

    #[must_use]
    pub fn is_image_file(&self, path: &Path) -> bool {
        Self::matches(&self.image_extensions_set(), path)
    }

    /// 表中的副檔名帶有前導點，統一轉為小寫比對
    fn normalize(extensions: &[String]) -> HashSet<String> {
        extensions.iter().map(|ext| ext.to_lowercase()).collect()
    }

    fn matches(extensions: &HashSet<String>, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&format!(".{}", ext.to_lowercase())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    EnUs,
    ZhTw,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
        }
    }

    /// 依 `LC_ALL` / `LANG` 判斷介面語言，無法判斷時使用英文
    #[must_use]
    pub fn detect() -> Self {
        ["LC_ALL", "LANG"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.is_empty())
            .map_or(Self::EnUs, |value| Self::from_locale_tag(&value))
    }

    #[must_use]
    pub fn from_locale_tag(tag: &str) -> Self {
        let tag = tag.to_lowercase().replace('_', "-");
        if tag.starts_with("zh") {
            Self::ZhTw
        } else {
            Self::EnUs
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnUs => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub file_type_table: FileTypeTable,
    pub language: Language,
}
