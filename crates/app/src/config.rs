//! Application configuration from the environment.

use std::path::PathBuf;

use anyhow::Context;

use adminboard_auth::DEFAULT_SNAPSHOT_KEY;

pub const SNAPSHOT_PATH_VAR: &str = "ADMINBOARD_SNAPSHOT_PATH";
pub const SNAPSHOT_KEY_VAR: &str = "ADMINBOARD_SNAPSHOT_KEY";
pub const DIRECTORY_PATH_VAR: &str = "ADMINBOARD_DIRECTORY_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// File holding the durable session snapshot.
    pub snapshot_path: PathBuf,
    /// Key the snapshot is stored under inside that file.
    pub snapshot_key: String,
    /// JSON account listing to load instead of the built-in mock directory.
    pub directory_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let snapshot_path = match non_empty(SNAPSHOT_PATH_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_snapshot_path(),
        };

        let snapshot_key = non_empty(SNAPSHOT_KEY_VAR).unwrap_or_else(|| DEFAULT_SNAPSHOT_KEY.to_string());
        if snapshot_key.chars().any(char::is_control) {
            anyhow::bail!("{SNAPSHOT_KEY_VAR} must not contain control characters");
        }

        let directory_path = non_empty(DIRECTORY_PATH_VAR).map(PathBuf::from);
        if let Some(path) = &directory_path {
            anyhow::ensure!(
                path.is_file(),
                "{DIRECTORY_PATH_VAR} points at {}, which is not a file",
                path.display()
            );
        }

        Ok(Self {
            snapshot_path,
            snapshot_key,
            directory_path,
        })
    }

    /// Read the configured directory listing, if any.
    pub fn read_directory(&self) -> anyhow::Result<Option<String>> {
        let Some(path) = &self.directory_path else {
            return Ok(None);
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read account listing at {}", path.display()))?;
        Ok(Some(raw))
    }
}

fn default_snapshot_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("adminboard").join("auth.json"),
        None => {
            tracing::warn!("no platform data directory; storing session snapshot in ./auth.json");
            PathBuf::from("auth.json")
        }
    }
}
