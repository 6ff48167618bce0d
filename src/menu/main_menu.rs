use crate::config::types::{Config, Language};
use crate::menu::handlers::{run_image_converter, run_video_compressor};
use anyhow::Result;
use console::{Term, style};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use rust_i18n::t;

pub fn show_main_menu(term: &Term, config: &mut Config) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_video"),
        t!("main_menu.opt_image"),
        t!("main_menu.opt_language"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_video_compressor(term, config)?;
            Ok(true)
        }
        Some(1) => {
            run_image_converter(term, config)?;
            Ok(true)
        }
        Some(2) => {
            show_language_menu(term, config)?;
            Ok(true)
        }
        Some(3) | None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}

/// 語言設定選單，只影響本次執行
fn show_language_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("language.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let languages = [Language::EnUs, Language::ZhTw];
    let items: Vec<String> = languages.iter().map(ToString::to_string).collect();

    let default_index = languages
        .iter()
        .position(|&l| l == config.language)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("language.prompt"))
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - return without changes
    let Some(selection) = selection else {
        return Ok(());
    };

    let selected = languages[selection];
    if selected != config.language {
        config.language = selected;
        rust_i18n::set_locale(selected.as_str());
        println!("\n{} {}", style(t!("language.changed")).green(), selected);
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}
