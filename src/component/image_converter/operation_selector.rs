use super::operation::{FormatChoice, Operation, OutputFormat, QualityLevel};
use super::quality_mapper::{EncoderParams, map_quality};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputAction {
    Converted,
    Compressed,
    CompressedAndConverted,
    MetadataRemoved,
}

/// 單一來源檔案要產生的一個輸出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    pub action: OutputAction,
    pub format: OutputFormat,
    pub extension: String,
    pub params: EncoderParams,
    /// 只在壓縮類操作時顯示
    pub quality: Option<QualityLevel>,
}

/// 依操作與來源副檔名（小寫、無點）決定要寫出的檔案
#[must_use]
pub fn plan_outputs(operation: &Operation, source_extension: &str) -> Vec<PlannedOutput> {
    match operation {
        Operation::Convert { formats } => formats
            .iter()
            .map(|choice| per_format(choice, OutputAction::Converted, None))
            .collect(),
        Operation::Compress { quality } => {
            let (format, extension) = match OutputFormat::from_photo_extension(source_extension) {
                Some(format) => (format, source_extension.to_string()),
                None => (OutputFormat::Jpeg, "jpg".to_string()),
            };
            vec![PlannedOutput {
                action: OutputAction::Compressed,
                format,
                params: map_quality(&extension, Some(*quality)),
                extension,
                quality: Some(*quality),
            }]
        }
        Operation::CompressAndConvert { formats, quality } => formats
            .iter()
            .map(|choice| per_format(choice, OutputAction::CompressedAndConverted, Some(*quality)))
            .collect(),
        Operation::StripMetadata => {
            // 未知副檔名沿用大寫副檔名作為格式名稱，而非像壓縮模式一樣改存 JPEG
            let format = OutputFormat::from_photo_extension(source_extension)
                .unwrap_or_else(|| OutputFormat::from_name(&source_extension.to_uppercase()));
            vec![PlannedOutput {
                action: OutputAction::MetadataRemoved,
                format,
                extension: source_extension.to_string(),
                params: EncoderParams::Default,
                quality: None,
            }]
        }
    }
}

fn per_format(
    choice: &FormatChoice,
    action: OutputAction,
    quality: Option<QualityLevel>,
) -> PlannedOutput {
    PlannedOutput {
        action,
        format: choice.format.clone(),
        extension: choice.extension.to_string(),
        params: map_quality(choice.extension, quality),
        quality,
    }
}

#[cfg(test)]
mod tests {
    use super::super::operation::parse_format_selection;
    use super::*;

    fn q(value: u8) -> QualityLevel {
        QualityLevel::new(value).unwrap()
    }

    #[test]
    fn test_convert_uses_defaults_for_each_format() {
        let operation = Operation::Convert {
            formats: parse_format_selection("1,2"),
        };

        let outputs = plan_outputs(&operation, "bmp");

        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].extension, "jpg");
        assert_eq!(outputs[0].format, OutputFormat::Jpeg);
        assert_eq!(outputs[1].extension, "png");
        assert!(outputs.iter().all(|o| o.params == EncoderParams::Default));
        assert!(outputs.iter().all(|o| o.quality.is_none()));
    }

    #[test]
    fn test_compress_keeps_photo_extension() {
        let outputs = plan_outputs(&Operation::Compress { quality: q(100) }, "png");

        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].format, OutputFormat::Png);
        assert_eq!(outputs[0].extension, "png");
        assert_eq!(
            outputs[0].params,
            EncoderParams::Lossless {
                compression_level: 0,
                optimize: true
            }
        );
    }

    #[test]
    fn test_compress_forces_jpg_for_other_formats() {
        for ext in ["bmp", "gif", "tiff", "heic"] {
            let outputs = plan_outputs(&Operation::Compress { quality: q(60) }, ext);
            assert_eq!(outputs[0].format, OutputFormat::Jpeg);
            assert_eq!(outputs[0].extension, "jpg");
            assert_eq!(outputs[0].params, EncoderParams::Lossy { quality: 60 });
        }
    }

    #[test]
    fn test_compress_and_convert_maps_quality_per_format() {
        let operation = Operation::CompressAndConvert {
            formats: parse_format_selection("2,3"),
            quality: q(0),
        };

        let outputs = plan_outputs(&operation, "jpg");

        assert_eq!(
            outputs[0].params,
            EncoderParams::Lossless {
                compression_level: 9,
                optimize: true
            }
        );
        assert_eq!(outputs[1].params, EncoderParams::Lossy { quality: 0 });
        assert!(
            outputs
                .iter()
                .all(|o| o.action == OutputAction::CompressedAndConverted)
        );
    }

    #[test]
    fn test_strip_metadata_keeps_original_format() {
        let jpeg = plan_outputs(&Operation::StripMetadata, "jpeg");
        assert_eq!(jpeg[0].format, OutputFormat::Jpeg);
        assert_eq!(jpeg[0].extension, "jpeg");

        let tiff = plan_outputs(&Operation::StripMetadata, "tiff");
        assert_eq!(tiff[0].format, OutputFormat::Tiff);

        let heic = plan_outputs(&Operation::StripMetadata, "heic");
        assert_eq!(heic[0].format, OutputFormat::Unsupported("HEIC".to_string()));
        assert_eq!(heic[0].params, EncoderParams::Default);
    }
}
