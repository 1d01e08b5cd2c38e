//! Catalog inspection commands.

use std::path::Path;

use crate::catalog::Catalog;
use crate::model::{Song, SongType};

/// List songs, optionally filtered to one category
pub fn cmd_list(catalog_path: Option<&Path>, category: Option<SongType>) -> anyhow::Result<()> {
    let catalog = Catalog::resolve(catalog_path)?;

    let songs: Vec<&Song> = match category {
        Some(song_type) => catalog.songs_of(song_type).collect(),
        None => catalog.songs().iter().collect(),
    };

    for song in &songs {
        println!("{}", song_line(song));
    }
    println!("{} songs", songs.len());
    Ok(())
}

/// Show every category with its song count
pub fn cmd_categories(catalog_path: Option<&Path>) -> anyhow::Result<()> {
    let catalog = Catalog::resolve(catalog_path)?;
    for line in category_lines(&catalog) {
        println!("{}", line);
    }
    Ok(())
}

fn song_line(song: &Song) -> String {
    format!(
        "{:<12} {} - {} [{}]",
        song.id,
        song.title,
        song.display_name,
        song.song_type.key()
    )
}

fn category_lines(catalog: &Catalog) -> Vec<String> {
    SongType::ALL
        .iter()
        .map(|t| format!("{:<12} {:>3}  {}", t.key(), catalog.count_of(*t), t.title()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_catalog, mock_song};

    #[test]
    fn test_song_line() {
        let line = song_line(&mock_song("abc"));
        assert!(line.starts_with("abc"));
        assert!(line.contains("Song abc - Test Artist"));
        assert!(line.ends_with("[pop]"));
    }

    #[test]
    fn test_category_lines_cover_all_types() {
        let lines = category_lines(&mock_catalog());
        assert_eq!(lines.len(), SongType::ALL.len());
        let jazz = lines.iter().find(|l| l.starts_with("jazz")).unwrap();
        assert!(jazz.contains("  2  "));
    }

    #[test]
    fn test_list_missing_catalog_fails() {
        assert!(cmd_list(Some(Path::new("/nonexistent/c.json")), None).is_err());
    }
}
