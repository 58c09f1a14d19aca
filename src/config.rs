use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::error::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Root directory to scan recursively for wallpapers.
    pub wallpaper_root: PathBuf,
    /// Maximum number of entries held by the cache before FIFO eviction.
    pub cache_capacity: usize,
    /// Pause between two rotation steps.
    #[serde(with = "humantime_serde")]
    pub rotation_interval: Duration,
    /// Pause between two full re-scans of the root.
    #[serde(with = "humantime_serde")]
    pub refresh_interval: Duration,
    /// Where the manifest artifact is written.
    pub manifest_path: PathBuf,
    /// Where the state artifact is written.
    pub state_path: PathBuf,
    /// Allowed extensions (without dot, compared case-insensitively).
    pub extensions: Vec<String>,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(mut self) -> Result<Self> {
        ensure!(
            self.cache_capacity > 0,
            "cache-capacity must be greater than zero"
        );
        ensure!(
            !self.rotation_interval.is_zero(),
            "rotation-interval must be positive"
        );
        ensure!(
            !self.refresh_interval.is_zero(),
            "refresh-interval must be positive"
        );
        ensure!(
            !self.extensions.is_empty(),
            "extensions must list at least one file extension"
        );
        for ext in &mut self.extensions {
            *ext = ext.trim_start_matches('.').to_ascii_lowercase();
        }
        self.wallpaper_root = normalize_path(&self.wallpaper_root)
            .context("failed to resolve wallpaper-root")?;
        Ok(self)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            wallpaper_root: PathBuf::from("./wallpapers"),
            cache_capacity: 128,
            rotation_interval: Duration::from_millis(2500),
            refresh_interval: Duration::from_secs(30),
            manifest_path: PathBuf::from("wallpapers.json"),
            state_path: PathBuf::from("runtime.json"),
            extensions: ["jpg", "jpeg", "png", "webp"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Expand a leading `~` from `$HOME` and make the path absolute.
///
/// The path does not need to exist; a missing root simply scans empty.
pub fn normalize_path(path: &Path) -> Result<PathBuf, Error> {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => {
            let home = std::env::var_os("HOME").ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "cannot expand {}: HOME is not set",
                    path.display()
                ))
            })?;
            PathBuf::from(home).join(rest)
        }
        Err(_) => path.to_path_buf(),
    };
    Ok(std::path::absolute(expanded)?)
}
