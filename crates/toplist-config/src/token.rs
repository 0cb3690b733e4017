use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

/// Single-slot persistence for the Trakt access token. The file holds the
/// bare token as plain text and is overwritten wholesale on refresh; there
/// is no expiry metadata, validity is decided by probing the API.
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Read the persisted token, if any. An absent file, an unreadable
    /// file and an empty file all mean "no token".
    pub fn load(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let token = content.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        debug!("Persisted access token to {}", self.path.display());
        Ok(())
    }

    /// Truncate the slot. Called when the persisted token fails validation
    /// so a later run starts the device flow immediately.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::write(&self.path, "")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_returns_none_for_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("token.txt"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("token.txt"));
        store.save("abc123").unwrap();
        assert_eq!(store.load(), Some("abc123".to_string()));
    }

    #[test]
    fn save_overwrites_previous_token() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("token.txt"));
        store.save("old").unwrap();
        store.save("new").unwrap();
        assert_eq!(store.load(), Some("new".to_string()));
    }

    #[test]
    fn clear_empties_the_slot() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("token.txt"));
        store.save("abc123").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn whitespace_only_file_counts_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.txt");
        std::fs::write(&path, "\n  \n").unwrap();
        let store = TokenStore::new(path);
        assert_eq!(store.load(), None);
    }
}
