use anyhow::{bail, Result};

use newscurator_core::AppConfig;

/// Print the config file location
pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

/// Write a default config file, refusing to overwrite an existing one
pub fn init(force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        bail!(
            "Config already exists at {}\nUse --force to overwrite it.",
            path.display()
        );
    }

    AppConfig::default().save()?;
    println!("Wrote default config to {}", path.display());
    println!("\nSet your API keys there, or export them:");
    println!("  export NEWS_API_KEY=...");
    println!("  export OPENAI_API_KEY=...");

    Ok(())
}
