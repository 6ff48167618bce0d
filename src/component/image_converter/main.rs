use super::operation::{
    FORMAT_MENU, FormatChoice, Operation, OperationKind, QualityLevel, parse_format_selection,
};
use super::pipeline::{ConversionPipeline, ImageBatchConfig, ImageRunSummary};
use crate::config::Config;
use crate::tools::{IMAGE_OUTPUT_PREFIX, create_output_directory, validate_directory_exists};
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use log::info;
use rust_i18n::t;
use std::path::PathBuf;

/// 圖片批次轉檔（互動介面）
pub struct ImageConverter {
    config: Config,
}

impl ImageConverter {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style(t!("image.title")).cyan().bold());

        let Some(input_dir) = self.prompt_input_path()? else {
            println!("{}", style(t!("common.no_folder")).yellow());
            return Ok(());
        };
        validate_directory_exists(&input_dir)?;

        let Some(kind) = self.prompt_operation()? else {
            println!("{}", style(t!("image.invalid_operation")).yellow());
            return Ok(());
        };

        let operation = match kind {
            OperationKind::Convert => {
                let Some(formats) = self.prompt_formats()? else {
                    return Ok(());
                };
                Operation::Convert { formats }
            }
            OperationKind::Compress => Operation::Compress {
                quality: self.prompt_quality()?,
            },
            OperationKind::CompressAndConvert => {
                let Some(formats) = self.prompt_formats()? else {
                    return Ok(());
                };
                Operation::CompressAndConvert {
                    formats,
                    quality: self.prompt_quality()?,
                }
            }
            OperationKind::StripMetadata => Operation::StripMetadata,
        };

        let output_dir = create_output_directory(&input_dir, IMAGE_OUTPUT_PREFIX)?;
        println!(
            "{}",
            style(t!("common.output_dir", path = output_dir.display())).dim()
        );

        let batch = ImageBatchConfig {
            input_dir,
            output_dir,
            operation,
        };
        let pipeline = ConversionPipeline::new(self.config.file_type_table.clone());
        let summary = pipeline.run(&batch)?;

        self.print_summary(&summary, &batch);
        Ok(())
    }

    fn prompt_input_path(&self) -> Result<Option<PathBuf>> {
        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("image.prompt_folder"))
            .allow_empty(true)
            .interact_text()?;
        let path = path.trim();
        if path.is_empty() {
            return Ok(None);
        }
        Ok(Some(PathBuf::from(path)))
    }

    fn prompt_operation(&self) -> Result<Option<OperationKind>> {
        let items = vec![
            t!("image.op_convert"),
            t!("image.op_compress"),
            t!("image.op_both"),
            t!("image.op_metadata"),
        ];

        println!("{}", style(t!("common.esc_hint")).dim());
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("image.prompt_operation"))
            .items(&items)
            .default(0)
            .interact_opt()?;

        Ok(selection.and_then(|index| OperationKind::ALL.get(index).copied()))
    }

    /// 沒有選到任何有效格式時回傳 `None`
    fn prompt_formats(&self) -> Result<Option<Vec<FormatChoice>>> {
        println!("\n{}", t!("image.prompt_formats_title"));
        for (key, name, _) in FORMAT_MENU {
            println!("  {key}. {name}");
        }

        let picks: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("image.prompt_formats"))
            .allow_empty(true)
            .interact_text()?;

        let formats = parse_format_selection(&picks);
        if formats.is_empty() {
            println!("{}", style(t!("image.no_format")).yellow());
            return Ok(None);
        }
        Ok(Some(formats))
    }

    /// 重複詢問直到輸入 0–100 的整數
    fn prompt_quality(&self) -> Result<QualityLevel> {
        let value: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("image.prompt_quality"))
            .validate_with(|input: &String| -> Result<(), String> {
                input
                    .parse::<QualityLevel>()
                    .map(|_| ())
                    .map_err(|_| t!("image.quality_hint").to_string())
            })
            .interact_text()?;

        Ok(value.parse()?)
    }

    fn print_summary(&self, summary: &ImageRunSummary, batch: &ImageBatchConfig) {
        println!();
        println!(
            "{}",
            style(t!(
                "image.finished",
                count = summary.processed,
                path = batch.output_dir.display()
            ))
            .green()
        );
        if summary.unreadable > 0 {
            println!(
                "  {}",
                t!("image.summary_unreadable", count = style(summary.unreadable).yellow())
            );
        }
        if summary.write_failures > 0 {
            println!(
                "  {}",
                t!("image.summary_write_failed", count = style(summary.write_failures).red())
            );
        }

        info!(
            "圖片處理結束 - 輸出: {}, 輸出資料夾: {}",
            summary.processed,
            batch.output_dir.display()
        );
    }
}
