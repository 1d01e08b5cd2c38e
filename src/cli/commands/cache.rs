//! Artwork cache commands.

use anyhow::Context;

use crate::artwork::DiskCache;
use crate::config::Config;

/// Remove every cached artwork file
pub fn cmd_clear_cache(config: &Config) -> anyhow::Result<()> {
    let Some(cache) = config.artwork.disk_cache() else {
        println!("Artwork disk cache is disabled");
        return Ok(());
    };
    let removed = clear(&cache)?;
    println!("Removed {} files from {}", removed, cache.dir().display());
    Ok(())
}

fn clear(cache: &DiskCache) -> anyhow::Result<usize> {
    let before = count_files(cache);
    cache
        .clear()
        .with_context(|| format!("clearing {}", cache.dir().display()))?;
    Ok(before)
}

fn count_files(cache: &DiskCache) -> usize {
    std::fs::read_dir(cache.dir())
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
                .count()
        })
        .unwrap_or(0)
}
