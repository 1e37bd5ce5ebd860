//! Config subcommands handler

use anyhow::{Context, Result};

use reaction_export::Config;

/// Show the effective configuration as TOML.
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    println!("{}", toml_str);
    Ok(())
}

/// Print where the configuration file lives (whether or not it exists).
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Open configuration file in the default editor.
///
/// Uses $EDITOR environment variable (defaults to 'vi').
pub fn handle_edit() -> Result<()> {
    let config_path = Config::config_path()?;

    if !config_path.exists() {
        Config::default().save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    eprintln!("Opening {} with {}", config_path.display(), editor);

    let status = std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to open editor: {}", editor))?;
    if !status.success() {
        anyhow::bail!("Editor '{}' exited with {}", editor, status);
    }

    // Catch mistakes now rather than on the next export
    Config::load().context("Edited configuration is invalid")?;
    Ok(())
}
