use crate::config::Config;
use anyhow::{bail, Context, Result};
use log::info;
use std::path::Path;

pub fn run(config: &Config, init: bool, force: bool) -> Result<()> {
    let path = Config::path().context("Could not determine a configuration directory")?;

    if init {
        write_defaults(&path, force)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Write the built-in defaults to `path`, refusing to clobber an existing file unless forced.
fn write_defaults(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Config::default().save_to(path)?;
    info!("wrote default config to {}", path.display());
    Ok(())
}
