use std::path::PathBuf;

/// Returns the Emberflow user directory (`~/.emberflow`).
pub fn emberflow_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".emberflow"))
        .unwrap_or_else(|| PathBuf::from(".emberflow"))
}
