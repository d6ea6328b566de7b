//! The `academy theme` command.

use std::path::PathBuf;

use anyhow::Result;

use academy_core::config::{find_config, load_config_from, save_theme, Theme, LOCAL_CONFIG_FILE};

use super::Context;

pub fn execute(ctx: &Context, value: Option<String>) -> Result<()> {
    let config = load_config_from(ctx.config_path.as_deref())?;

    let Some(value) = value else {
        println!("{}", config.theme);
        return Ok(());
    };

    let theme = match value.as_str() {
        "toggle" => config.theme.toggled(),
        other => other.parse::<Theme>().map_err(anyhow::Error::msg)?,
    };

    let path = find_config(ctx.config_path.as_deref())?
        .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
    save_theme(theme, &path)?;
    tracing::info!("saved theme to {}", path.display());
    println!("{theme}");

    Ok(())
}
