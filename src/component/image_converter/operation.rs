use super::error::QualityError;
use std::fmt;
use std::str::FromStr;

/// 輸出格式；`Unsupported` 保存無法寫出的格式名稱（例如 `HEIC`）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
    Bmp,
    Gif,
    Tiff,
    Unsupported(String),
}

impl OutputFormat {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "JPEG" => Self::Jpeg,
            "PNG" => Self::Png,
            "WEBP" => Self::WebP,
            "BMP" => Self::Bmp,
            "GIF" => Self::Gif,
            "TIFF" => Self::Tiff,
            other => Self::Unsupported(other.to_string()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::WebP => "WEBP",
            Self::Bmp => "BMP",
            Self::Gif => "GIF",
            Self::Tiff => "TIFF",
            Self::Unsupported(name) => name,
        }
    }

    /// 壓縮模式可保留原副檔名的相片格式
    #[must_use]
    pub fn from_photo_extension(extension: &str) -> Option<Self> {
        match extension {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatChoice {
    pub format: OutputFormat,
    pub extension: &'static str,
}

/// 轉檔選單：(選項編號, 格式, 副檔名)
pub const FORMAT_MENU: [(&str, &str, &str); 3] =
    [("1", "JPEG", "jpg"), ("2", "PNG", "png"), ("3", "WEBP", "webp")];

/// 解析以逗號分隔的選單輸入，忽略無法辨識的項目與重複項目
#[must_use]
pub fn parse_format_selection(input: &str) -> Vec<FormatChoice> {
    let mut chosen: Vec<FormatChoice> = Vec::new();
    for token in input.split(',').map(str::trim) {
        let Some((_, name, extension)) = FORMAT_MENU.iter().find(|(key, _, _)| *key == token)
        else {
            continue;
        };
        let choice = FormatChoice {
            format: OutputFormat::from_name(name),
            extension: *extension,
        };
        if !chosen.contains(&choice) {
            chosen.push(choice);
        }
    }
    chosen
}

/// 0–100 的品質值，100 為最佳畫質
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QualityLevel(u8);

impl QualityLevel {
    pub const MAX: u8 = 100;

    pub const fn new(value: u8) -> Result<Self, QualityError> {
        if value > Self::MAX {
            return Err(QualityError::OutOfRange(value as i64));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl FromStr for QualityLevel {
    type Err = QualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| QualityError::NotANumber(trimmed.to_string()))?;
        let value = u8::try_from(value).map_err(|_| QualityError::OutOfRange(value))?;
        Self::new(value)
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 選單上的四種操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Convert,
    Compress,
    CompressAndConvert,
    StripMetadata,
}

impl OperationKind {
    pub const ALL: [Self; 4] = [
        Self::Convert,
        Self::Compress,
        Self::CompressAndConvert,
        Self::StripMetadata,
    ];

    #[must_use]
    pub const fn needs_formats(self) -> bool {
        matches!(self, Self::Convert | Self::CompressAndConvert)
    }

    #[must_use]
    pub const fn needs_quality(self) -> bool {
        matches!(self, Self::Compress | Self::CompressAndConvert)
    }
}

/// 本次執行的操作與其參數
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Convert {
        formats: Vec<FormatChoice>,
    },
    Compress {
        quality: QualityLevel,
    },
    CompressAndConvert {
        formats: Vec<FormatChoice>,
        quality: QualityLevel,
    },
    StripMetadata,
}

impl Operation {
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::Convert { .. } => OperationKind::Convert,
            Self::Compress { .. } => OperationKind::Compress,
            Self::CompressAndConvert { .. } => OperationKind::CompressAndConvert,
            Self::StripMetadata => OperationKind::StripMetadata,
        }
    }

    #[must_use]
    pub const fn quality(&self) -> Option<QualityLevel> {
        match self {
            Self::Compress { quality } | Self::CompressAndConvert { quality, .. } => Some(*quality),
            Self::Convert { .. } | Self::StripMetadata => None,
        }
    }
}
