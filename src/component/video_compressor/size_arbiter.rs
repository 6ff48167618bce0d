use anyhow::{Context, Result};
use filetime::FileTime;
use log::info;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArbiterDecision {
    KeptCompressed {
        original_size: u64,
        compressed_size: u64,
    },
    KeptOriginal {
        original_size: u64,
        compressed_size: u64,
    },
}

impl ArbiterDecision {
    #[must_use]
    pub const fn final_size(&self) -> u64 {
        match self {
            Self::KeptCompressed {
                compressed_size, ..
            } => *compressed_size,
            Self::KeptOriginal { original_size, .. } => *original_size,
        }
    }
}

/// 比較壓縮結果與原始檔，保留較小者於 `final_path`
///
/// 壓縮後沒有變小（大小相同也算）時刪除暫存檔並複製原始檔；
/// 否則將暫存檔改名為最終檔名。完成後 `temp_path` 一定不存在。
pub fn arbitrate(original: &Path, temp_path: &Path, final_path: &Path) -> Result<ArbiterDecision> {
    let original_size = fs::metadata(original)
        .with_context(|| format!("無法讀取原始檔案大小: {}", original.display()))?
        .len();
    let compressed_size = fs::metadata(temp_path)
        .with_context(|| format!("無法讀取壓縮檔案大小: {}", temp_path.display()))?
        .len();

    if compressed_size >= original_size {
        fs::remove_file(temp_path)
            .with_context(|| format!("無法刪除暫存檔: {}", temp_path.display()))?;
        copy_preserving_times(original, final_path)?;
        info!(
            "壓縮後較大 ({compressed_size} >= {original_size} bytes)，保留原始檔: {}",
            final_path.display()
        );
        Ok(ArbiterDecision::KeptOriginal {
            original_size,
            compressed_size,
        })
    } else {
        fs::rename(temp_path, final_path).with_context(|| {
            format!(
                "無法移動壓縮檔案: {} -> {}",
                temp_path.display(),
                final_path.display()
            )
        })?;
        info!(
            "壓縮完成 ({original_size} -> {compressed_size} bytes): {}",
            final_path.display()
        );
        Ok(ArbiterDecision::KeptCompressed {
            original_size,
            compressed_size,
        })
    }
}

/// 複製檔案內容與權限，並保留存取／修改時間
pub fn copy_preserving_times(source: &Path, destination: &Path) -> Result<()> {
    fs::copy(source, destination).with_context(|| {
        format!(
            "無法複製檔案: {} -> {}",
            source.display(),
            destination.display()
        )
    })?;

    let metadata = fs::metadata(source)?;
    filetime::set_file_times(
        destination,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )
    .with_context(|| format!("無法設定檔案時間: {}", destination.display()))?;

    Ok(())
}
