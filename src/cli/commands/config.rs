//! Config file commands.

use std::path::Path;

use anyhow::Context;

use crate::config::{self, Config};

/// Write a default config file to the OS config directory
pub fn cmd_init_config(force: bool) -> anyhow::Result<()> {
    let path = config::config_path().context("Could not determine config directory")?;
    if write_default(&path, force)? {
        println!("Wrote default config to {}", path.display());
    } else {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    Ok(())
}

/// Returns false when the file exists and `force` is not set.
fn write_default(path: &Path, force: bool) -> anyhow::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    config::save_to(&Config::default(), path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_default_respects_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        assert!(write_default(&path, false).unwrap());
        std::fs::write(&path, "[player]\nautoplay = false\n").unwrap();

        assert!(!write_default(&path, false).unwrap());
        assert!(!config::load_from(&path).player.autoplay);

        assert!(write_default(&path, true).unwrap());
        assert!(config::load_from(&path).player.autoplay);
    }
}
