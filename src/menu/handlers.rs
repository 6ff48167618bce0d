use crate::component::{ImageConverter, VideoCompressor};
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use log::warn;
use rust_i18n::t;

pub fn run_video_compressor(term: &Term, config: &Config) -> Result<()> {
    let compressor = VideoCompressor::new(config.clone());

    if let Err(e) = compressor.run() {
        warn!("影片壓縮中止: {e:#}");
        eprintln!("{} {:#}", style(t!("main_menu.error_prefix")).red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_image_converter(term: &Term, config: &Config) -> Result<()> {
    let converter = ImageConverter::new(config.clone());

    if let Err(e) = converter.run() {
        warn!("圖片處理中止: {e:#}");
        eprintln!("{} {:#}", style(t!("main_menu.error_prefix")).red().bold(), e);
    }

    pause(term)?;
    Ok(())
}
