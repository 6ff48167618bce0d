use super::error::ImageJobError;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// 讀取圖片並統一色彩模式
pub fn load_image(path: &Path) -> Result<DynamicImage, ImageJobError> {
    #[cfg(feature = "heic")]
    if crate::tools::lowercase_extension(path) == "heic" {
        return heic::decode(path).map(normalize_color_mode);
    }

    let decode_error = |source| ImageJobError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let bytes = std::fs::read(path).map_err(|e| decode_error(ImageError::IoError(e)))?;
    let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
        .with_guessed_format()
        .map_err(|e| decode_error(ImageError::IoError(e)))?;
    let indexed = is_indexed_source(reader.format(), &bytes);
    let image = reader.decode().map_err(decode_error)?;

    if indexed {
        // 解碼器已展開調色盤，這裡只需去掉透明通道
        return Ok(DynamicImage::ImageRgb8(image.to_rgb8()));
    }
    Ok(normalize_color_mode(image))
}

/// GIF 一律使用調色盤；PNG 由 IHDR 的色彩型態判斷
fn is_indexed_source(format: Option<ImageFormat>, bytes: &[u8]) -> bool {
    match format {
        Some(ImageFormat::Gif) => true,
        Some(ImageFormat::Png) => png::Decoder::new(Cursor::new(bytes))
            .read_info()
            .is_ok_and(|reader| reader.info().color_type == png::ColorType::Indexed),
        _ => false,
    }
}

/// 8-bit RGB / RGBA 保持原樣；高位元 RGBA 轉為 RGBA8；其餘（灰階、含透明灰階、高位元 RGB）一律轉為 RGB8
///
/// 調色盤來源在 [`load_image`] 中另外處理
#[must_use]
pub fn normalize_color_mode(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image,
        DynamicImage::ImageRgba16(_) | DynamicImage::ImageRgba32F(_) => {
            DynamicImage::ImageRgba8(image.to_rgba8())
        }
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

#[cfg(feature = "heic")]
mod heic {
    use super::ImageJobError;
    use image::{DynamicImage, RgbImage};
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};
    use std::path::Path;

    pub fn decode(path: &Path) -> Result<DynamicImage, ImageJobError> {
        let heic_error = |message: String| ImageJobError::Heic {
            path: path.to_path_buf(),
            message,
        };

        let lib_heif = LibHeif::new();
        let ctx = HeifContext::read_from_file(path.to_string_lossy().as_ref())
            .map_err(|e| heic_error(e.to_string()))?;
        let handle = ctx
            .primary_image_handle()
            .map_err(|e| heic_error(e.to_string()))?;
        let decoded = lib_heif
            .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
            .map_err(|e| heic_error(e.to_string()))?;

        let planes = decoded.planes();
        let plane = planes
            .interleaved
            .ok_or_else(|| heic_error("找不到 RGB 平面".to_string()))?;

        // 每列可能帶有對齊用的填充位元組
        let width = plane.width as usize;
        let row_len = width * 3;
        let mut pixels = Vec::with_capacity(row_len * plane.height as usize);
        for row in plane.data.chunks(plane.stride).take(plane.height as usize) {
            pixels.extend_from_slice(&row[..row_len]);
        }

        RgbImage::from_raw(plane.width, plane.height, pixels)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| heic_error("無法建立 RGB 影像".to_string()))
    }
}
