use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::LeagueId;
use crate::errors::cache_context;

/// File-based cache of computed league views.
///
/// Entries are only valid for the data they were computed from: anything
/// that changes a league's players, cards, scores or events must call
/// [`ResultCache::invalidate_league`].
#[derive(Debug, Clone)]
pub struct ResultCache {
    cache_dir: PathBuf,
}

impl ResultCache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;
        Ok(Self { cache_dir })
    }

    pub fn save_league<T: Serialize>(&self, league_id: LeagueId, data: &T) -> Result<()> {
        let key = league_key(league_id);
        let path = self.build_path(&key);
        self.write_json(&path, data)
            .with_context(|| cache_context("write", &key))?;
        debug!("Cached {}", path.display());
        Ok(())
    }

    pub fn load_league<T: for<'de> Deserialize<'de>>(&self, league_id: LeagueId) -> Result<Option<T>> {
        let key = league_key(league_id);
        self.read_json_opt(&self.build_path(&key))
            .with_context(|| cache_context("read", &key))
    }

    pub fn invalidate_league(&self, league_id: LeagueId) -> Result<()> {
        let key = league_key(league_id);
        let path = self.build_path(&key);
        if path.exists() {
            fs::remove_file(&path).with_context(|| cache_context("invalidate", &key))?;
            info!("Invalidated cached views of league {}", league_id);
        }
        Ok(())
    }

    /// Clear all cached data
    pub fn clear(&self) -> Result<()> {
        fs::remove_dir_all(&self.cache_dir).context("Failed to clear cache")?;
        fs::create_dir_all(&self.cache_dir).context("Failed to recreate cache directory")?;

        info!("Cleared cache directory");
        Ok(())
    }

    // --- Helper Methods ---

    fn build_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(path, json).context("Failed to write cache file")?;
        Ok(())
    }

    fn read_json_opt<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path)?;
        let data = serde_json::from_str(&json).with_context(|| {
            let preview: String = json.chars().take(200).collect();
            format!("Failed to parse JSON from {:?}. First 200 chars: {}", path, preview)
        })?;
        Ok(Some(data))
    }
}

fn league_key(league_id: LeagueId) -> String {
    format!("league_{}", league_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct View {
        value: String,
    }

    #[test]
    fn test_save_load_invalidate() {
        let dir = std::env::temp_dir().join("disc_golf_league_test_cache");
        let cache = ResultCache::new(&dir).unwrap();
        let view = View {
            value: "standings".to_string(),
        };

        cache.save_league(3, &view).unwrap();
        assert_eq!(cache.load_league::<View>(3).unwrap(), Some(view));
        assert_eq!(cache.load_league::<View>(4).unwrap(), None);

        cache.invalidate_league(3).unwrap();
        assert_eq!(cache.load_league::<View>(3).unwrap(), None);

        // invalidating a missing entry is not an error
        cache.invalidate_league(3).unwrap();
        cache.clear().unwrap();
    }

    #[test]
    fn test_corrupt_entry_with_multibyte_text_is_an_error() {
        let dir = std::env::temp_dir().join("disc_golf_league_test_corrupt_cache");
        let cache = ResultCache::new(&dir).unwrap();

        // 'Ł' straddles the 200th byte of the error preview
        let corrupt = format!("{}Łukasz", "x".repeat(199));
        fs::write(cache.build_path(&league_key(1)), corrupt).unwrap();

        let error = cache.load_league::<View>(1).unwrap_err();
        assert!(format!("{:#}", error).contains("Failed to parse JSON"));
        cache.clear().unwrap();
    }
}
