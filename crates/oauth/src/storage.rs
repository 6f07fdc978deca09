use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{Result, config_dir::emberflow_dir, types::SessionToken};

/// File-based session-token storage at `~/.emberflow/token.json`.
///
/// The file is written at most once per run, and only after an approved poll
/// carried a non-empty token. The whole object is serialized in memory
/// first, so no partial token file ever lands on disk.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new() -> Self {
        Self {
            path: emberflow_dir().join("token.json"),
        }
    }

    /// Create a token store at a specific path (useful for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved token, if any. Read or parse failures are treated as
    /// "not signed in" rather than errors.
    pub fn load(&self) -> Option<SessionToken> {
        let path = self.path.display().to_string();
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path, "token file not found");
                return None;
            },
            Err(e) => {
                warn!(path = %path, error = %e, "token file read failed");
                return None;
            },
        };

        match serde_json::from_str::<SessionToken>(&data) {
            Ok(token) => {
                debug!(path = %path, "session token loaded");
                Some(token)
            },
            Err(e) => {
                warn!(path = %path, error = %e, "token file parse failed");
                None
            },
        }
    }

    pub fn save(&self, token: &SessionToken) -> Result<()> {
        let path = self.path.display().to_string();

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(token)?;
        std::fs::write(&self.path, &data)?;

        // Set file permissions to 0600 on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        info!(path = %path, "session token saved");
        Ok(())
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::with_path(dir.path().join("token.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn load_corrupt_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "not json").unwrap();
        let store = TokenStore::with_path(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn save_creates_parent_dirs_and_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".emberflow").join("token.json");
        let store = TokenStore::with_path(path.clone());

        store
            .save(&SessionToken {
                token: "sess_abc".into(),
            })
            .unwrap();

        let loaded = store.load().expect("should load saved token");
        assert_eq!(loaded.token, "sess_abc");

        // Exactly `{ "token": ... }`, pretty-printed with 2-space indent.
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "{\n  \"token\": \"sess_abc\"\n}");
    }

    #[test]
    fn save_overwrites_previous_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::with_path(dir.path().join("token.json"));

        store
            .save(&SessionToken {
                token: "first".into(),
            })
            .unwrap();
        store
            .save(&SessionToken {
                token: "second".into(),
            })
            .unwrap();

        assert_eq!(store.load().unwrap().token, "second");
    }

    #[cfg(unix)]
    #[test]
    fn save_restricts_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        let store = TokenStore::with_path(path.clone());
        store
            .save(&SessionToken {
                token: "sess_abc".into(),
            })
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
