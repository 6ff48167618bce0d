//! 整合測試 - 以暫存資料夾驗證兩條批次流程的檔案層級行為

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use media_batch_tools::component::image_converter::{
    ConversionPipeline, ImageBatchConfig, Operation, QualityLevel, parse_format_selection,
};
use media_batch_tools::component::video_compressor::{
    CompressionPipeline, EncodeError, EncodeParams, EncodeStats, VideoBatchConfig, VideoEncoder,
};
use media_batch_tools::config::Config;
use tempfile::TempDir;

fn sample_image() -> RgbImage {
    RgbImage::from_fn(16, 12, |x, y| Rgb([(x * 15) as u8, (y * 20) as u8, 90]))
}

fn image_dirs() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input");
    let output = temp_dir.path().join("converted_20240101_000000");
    fs::create_dir(&input).unwrap();
    (temp_dir, input, output)
}

fn run_images(input: &Path, output: &Path, operation: Operation) -> usize {
    let pipeline = ConversionPipeline::new(Config::new().unwrap().file_type_table);
    let config = ImageBatchConfig {
        input_dir: input.to_path_buf(),
        output_dir: output.to_path_buf(),
        operation,
    };
    pipeline.run(&config).unwrap().processed
}

fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    names.sort();
    names
}

fn png_chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut chunk = Vec::new();
    chunk.extend_from_slice(&(data.len() as u32).to_be_bytes());
    let mut body = kind.to_vec();
    body.extend_from_slice(data);
    chunk.extend_from_slice(&body);
    chunk.extend_from_slice(&crc32fast::hash(&body).to_be_bytes());
    chunk
}

/// 最小的 little-endian TIFF 標頭（沒有任何 IFD 項目）
const EXIF_PAYLOAD: &[u8] = b"II*\x00\x08\x00\x00\x00\x00\x00\x00\x00\x00\x00";

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// 測試 1: 轉檔為 JPEG 與 PNG
#[test]
fn test_convert_produces_one_file_per_format() {
    let (_tmp, input, output) = image_dirs();
    sample_image().save(input.join("photo.webp")).unwrap();

    let processed = run_images(
        &input,
        &output,
        Operation::Convert {
            formats: parse_format_selection("1,2"),
        },
    );

    assert_eq!(processed, 2);
    assert_eq!(list_files(&output), vec!["photo.jpg", "photo.png"]);
    for name in ["photo.jpg", "photo.png"] {
        let decoded = image::open(output.join(name)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 12));
    }
}

/// 測試 2: 不支援的檔案不產生輸出也不計數
#[test]
fn test_unsupported_files_are_skipped_silently() {
    let (_tmp, input, output) = image_dirs();
    fs::write(input.join("readme.txt"), b"text").unwrap();
    fs::write(input.join("clip.mp4"), b"video").unwrap();
    sample_image()
        .save_with_format(input.join("photo.tif"), ImageFormat::Tiff)
        .unwrap();

    let processed = run_images(&input, &output, Operation::StripMetadata);

    assert_eq!(processed, 0);
    assert!(list_files(&output).is_empty());
}

/// 測試 3: 子資料夾結構在輸出中被完整建立
#[test]
fn test_directory_structure_is_mirrored() {
    let (_tmp, input, output) = image_dirs();
    fs::create_dir_all(input.join("sub")).unwrap();
    fs::create_dir_all(input.join("empty").join("deeper")).unwrap();
    fs::write(input.join("sub").join("a.png"), b"not really a png").unwrap();

    let pipeline = ConversionPipeline::new(Config::new().unwrap().file_type_table);
    let summary = pipeline
        .run(&ImageBatchConfig {
            input_dir: input.clone(),
            output_dir: output.clone(),
            operation: Operation::Compress {
                quality: QualityLevel::new(80).unwrap(),
            },
        })
        .unwrap();

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.unreadable, 1);
    assert!(output.join("sub").is_dir());
    assert!(output.join("empty").join("deeper").is_dir());
    assert!(list_files(&output).is_empty());
}

/// 測試 4: 移除 PNG 的 EXIF 與文字區塊，像素不變
#[test]
fn test_strip_metadata_png_keeps_pixels() {
    let (_tmp, input, output) = image_dirs();

    let mut encoded = Vec::new();
    DynamicImage::ImageRgb8(sample_image())
        .write_to(&mut std::io::Cursor::new(&mut encoded), ImageFormat::Png)
        .unwrap();
    // 8 bytes 簽章 + 25 bytes IHDR 之後插入中繼資料區塊
    let mut with_metadata = encoded[..33].to_vec();
    with_metadata.extend(png_chunk(b"tEXt", b"Comment\x00secret camera notes"));
    with_metadata.extend(png_chunk(b"eXIf", EXIF_PAYLOAD));
    with_metadata.extend_from_slice(&encoded[33..]);
    fs::write(input.join("tagged.png"), &with_metadata).unwrap();

    let processed = run_images(&input, &output, Operation::StripMetadata);

    assert_eq!(processed, 1);
    let bytes = fs::read(output.join("tagged.png")).unwrap();
    assert!(!contains(&bytes, b"tEXt"));
    assert!(!contains(&bytes, b"eXIf"));
    assert!(!contains(&bytes, b"secret camera notes"));

    let original = image::open(input.join("tagged.png")).unwrap().to_rgb8();
    let stripped = image::open(output.join("tagged.png")).unwrap().to_rgb8();
    assert_eq!(original, stripped);
}

/// 測試 5: 移除 JPEG 的 EXIF 區段
#[test]
fn test_strip_metadata_jpeg_drops_exif() {
    let (_tmp, input, output) = image_dirs();

    let mut encoded = Vec::new();
    DynamicImage::ImageRgb8(sample_image())
        .write_to(&mut std::io::Cursor::new(&mut encoded), ImageFormat::Jpeg)
        .unwrap();
    let mut segment = b"Exif\x00\x00".to_vec();
    segment.extend_from_slice(EXIF_PAYLOAD);
    let length = (segment.len() + 2) as u16;

    // SOI 之後插入 APP1
    let mut with_exif = encoded[..2].to_vec();
    with_exif.extend_from_slice(&[0xFF, 0xE1]);
    with_exif.extend_from_slice(&length.to_be_bytes());
    with_exif.extend_from_slice(&segment);
    with_exif.extend_from_slice(&encoded[2..]);
    fs::write(input.join("camera.JPG"), &with_exif).unwrap();

    let processed = run_images(&input, &output, Operation::StripMetadata);

    assert_eq!(processed, 1);
    let bytes = fs::read(output.join("camera.jpg")).unwrap();
    assert!(!contains(&bytes, b"Exif\x00\x00"));
    assert!(image::open(output.join("camera.jpg")).is_ok());
}

/// 測試 6: 壓縮並轉檔時每個格式各自套用品質
#[test]
fn test_compress_and_convert_outputs() {
    let (_tmp, input, output) = image_dirs();
    fs::create_dir(input.join("album")).unwrap();
    sample_image().save(input.join("album").join("pic.bmp")).unwrap();

    let processed = run_images(
        &input,
        &output,
        Operation::CompressAndConvert {
            formats: parse_format_selection("1,3"),
            quality: QualityLevel::new(40).unwrap(),
        },
    );

    assert_eq!(processed, 2);
    assert_eq!(
        list_files(&output),
        vec!["album/pic.jpg", "album/pic.webp"]
    );
}

/// 測試 7: GIF 轉為 PNG 時不帶透明通道
#[test]
fn test_gif_converts_to_plain_rgb_png() {
    let (_tmp, input, output) = image_dirs();
    sample_image().save(input.join("anim.gif")).unwrap();

    let processed = run_images(
        &input,
        &output,
        Operation::Convert {
            formats: parse_format_selection("2"),
        },
    );

    assert_eq!(processed, 1);
    let decoded = image::open(output.join("anim.png")).unwrap();
    assert_eq!(decoded.color(), image::ColorType::Rgb8);
}

/// 測試 8: WebP 輸出大小隨品質改變
#[test]
fn test_webp_quality_follows_user_choice() {
    let noisy = RgbImage::from_fn(48, 48, |x, y| {
        let v = x.wrapping_mul(2_654_435_761).wrapping_add(y.wrapping_mul(40_503));
        Rgb([(v >> 3) as u8, (v >> 11) as u8, (v >> 19) as u8])
    });

    let mut sizes = Vec::new();
    for quality in [95, 10] {
        let (_tmp, input, output) = image_dirs();
        noisy.save(input.join("shot.png")).unwrap();

        let processed = run_images(
            &input,
            &output,
            Operation::CompressAndConvert {
                formats: parse_format_selection("3"),
                quality: QualityLevel::new(quality).unwrap(),
            },
        );

        assert_eq!(processed, 1);
        sizes.push(fs::metadata(output.join("shot.webp")).unwrap().len());
    }

    assert!(sizes[1] < sizes[0], "q10={} q95={}", sizes[1], sizes[0]);
}

/// 寫出指定大小輸出的假編碼器
struct SizedEncoder(u64);

impl VideoEncoder for SizedEncoder {
    fn encode(
        &self,
        _source: &Path,
        destination: &Path,
        _params: &EncodeParams,
    ) -> Result<EncodeStats, EncodeError> {
        fs::write(destination, vec![1u8; self.0 as usize]).unwrap();
        Ok(EncodeStats {
            elapsed: Duration::ZERO,
            output_size: self.0,
        })
    }
}

/// 測試 9: 最終檔案大小為 min(原始, 壓縮)，且沒有殘留暫存檔
#[test]
fn test_size_arbitration_over_several_pairs() {
    for (original, compressed) in [(100u64, 99u64), (100, 100), (100, 101), (1, 0), (0, 5)] {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("videos");
        let output = temp_dir.path().join("compress_20240101_000000");
        fs::create_dir(&input).unwrap();
        fs::create_dir(&output).unwrap();
        fs::write(input.join("movie.mov"), vec![9u8; original as usize]).unwrap();

        let pipeline =
            CompressionPipeline::new(SizedEncoder(compressed), Config::new().unwrap().file_type_table);
        pipeline
            .run(&VideoBatchConfig {
                input_dir: input,
                output_dir: output.clone(),
                params: EncodeParams::default(),
            })
            .unwrap();

        let expected = if compressed >= original { original } else { compressed };
        assert_eq!(list_files(&output), vec!["movie.mov"], "O={original} C={compressed}");
        assert_eq!(
            fs::metadata(output.join("movie.mov")).unwrap().len(),
            expected,
            "O={original} C={compressed}"
        );
    }
}
