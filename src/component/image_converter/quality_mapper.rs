use super::operation::QualityLevel;

/// 依輸出格式換算後的編碼參數
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderParams {
    /// 使用編碼器預設值
    Default,
    Lossy {
        quality: u8,
    },
    Lossless {
        /// 0（最快）到 9（最小）
        compression_level: u8,
        optimize: bool,
    },
}

/// 將 0–100 品質換算成指定副檔名的編碼參數
///
/// 有損格式（jpg/jpeg/webp）直接使用品質值；png 反轉並縮放為壓縮等級
/// `round((100 - q) / 100 * 9)`，同時開啟最佳化。未設定品質或其他副檔名則使用預設值。
#[must_use]
pub fn map_quality(extension: &str, quality: Option<QualityLevel>) -> EncoderParams {
    let Some(quality) = quality else {
        return EncoderParams::Default;
    };

    match extension {
        "jpg" | "jpeg" | "webp" => EncoderParams::Lossy {
            quality: quality.value(),
        },
        "png" => EncoderParams::Lossless {
            compression_level: png_compression_level(quality),
            optimize: true,
        },
        _ => EncoderParams::Default,
    }
}

/// 四捨六入五成雙，例如 q=50 得到 4
#[must_use]
pub fn png_compression_level(quality: QualityLevel) -> u8 {
    let inverted = f64::from(QualityLevel::MAX - quality.value());
    (inverted / 100.0 * 9.0).round_ties_even() as u8
}
