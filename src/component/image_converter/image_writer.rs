use super::error::ImageJobError;
use super::operation::OutputFormat;
use super::quality_mapper::EncoderParams;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageFormat};
use log::warn;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 未指定品質時 JPEG 使用的品質
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// 未指定品質時 WebP 使用的品質
pub const DEFAULT_WEBP_QUALITY: u8 = 80;

/// 將圖片以指定格式與參數寫出
///
/// 來源的 EXIF、文字區塊等中繼資料不會被轉寄給編碼器，寫出的檔案只含像素資料。
/// 寫入失敗時會刪除不完整的輸出檔。
pub fn save_image(
    image: &DynamicImage,
    format: &OutputFormat,
    params: &EncoderParams,
    path: &Path,
) -> Result<(), ImageJobError> {
    if let OutputFormat::Unsupported(name) = format {
        return Err(ImageJobError::UnsupportedFormat(name.clone()));
    }

    let result = write_file(image, format, params, path);
    if result.is_err() && path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            warn!("無法刪除不完整的輸出檔 {}: {e}", path.display());
        }
    }
    result
}

fn write_file(
    image: &DynamicImage,
    format: &OutputFormat,
    params: &EncoderParams,
    path: &Path,
) -> Result<(), ImageJobError> {
    let io_error = |source| ImageJobError::Io {
        path: path.to_path_buf(),
        source,
    };
    let encode_error = |source| ImageJobError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Jpeg => {
            let quality = match params {
                EncoderParams::Lossy { quality } => *quality,
                _ => DEFAULT_JPEG_QUALITY,
            };
            // JPEG 不支援透明通道
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
            rgb.write_with_encoder(encoder).map_err(encode_error)?;
        }
        OutputFormat::Png => {
            let encoder = match params {
                EncoderParams::Lossless {
                    compression_level,
                    optimize,
                } => {
                    let filter = if *optimize {
                        FilterType::Adaptive
                    } else {
                        FilterType::NoFilter
                    };
                    PngEncoder::new_with_quality(
                        &mut writer,
                        png_compression_type(*compression_level),
                        filter,
                    )
                }
                _ => PngEncoder::new(&mut writer),
            };
            image.write_with_encoder(encoder).map_err(encode_error)?;
        }
        OutputFormat::WebP => {
            let quality = match params {
                EncoderParams::Lossy { quality } => *quality,
                _ => DEFAULT_WEBP_QUALITY,
            };
            write_webp(image, quality, &mut writer, path)?;
        }
        OutputFormat::Bmp => image
            .write_to(&mut writer, ImageFormat::Bmp)
            .map_err(encode_error)?,
        OutputFormat::Gif => image
            .write_to(&mut writer, ImageFormat::Gif)
            .map_err(encode_error)?,
        OutputFormat::Tiff => image
            .write_to(&mut writer, ImageFormat::Tiff)
            .map_err(encode_error)?,
        OutputFormat::Unsupported(name) => {
            return Err(ImageJobError::UnsupportedFormat(name.clone()));
        }
    }

    writer.flush().map_err(io_error)?;
    Ok(())
}

/// 以有損模式寫出 WebP，透明通道保留
fn write_webp(
    image: &DynamicImage,
    quality: u8,
    writer: &mut impl Write,
    path: &Path,
) -> Result<(), ImageJobError> {
    let rgb_or_rgba = match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => None,
        other if other.color().has_alpha() => Some(DynamicImage::ImageRgba8(other.to_rgba8())),
        other => Some(DynamicImage::ImageRgb8(other.to_rgb8())),
    };
    let source = rgb_or_rgba.as_ref().unwrap_or(image);

    let encoder = webp::Encoder::from_image(source).map_err(|message| ImageJobError::WebP {
        path: path.to_path_buf(),
        message: message.to_string(),
    })?;
    let memory = encoder.encode(f32::from(quality.min(100)));
    writer.write_all(&memory).map_err(|source| ImageJobError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// 0 為不壓縮，1–9 直接作為 deflate 等級
#[must_use]
pub const fn png_compression_type(level: u8) -> CompressionType {
    match level {
        0 => CompressionType::Uncompressed,
        1..=9 => CompressionType::Level(level),
        _ => CompressionType::Level(9),
    }
}
