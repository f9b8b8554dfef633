//! # Configuration
//!
//! Showcase configuration is loaded with [`confique`] from layered sources.
//!
//! ## Resolution order
//!
//! Highest priority first:
//! 1. **Command line flags**: `--data-dir`, `--page-size` (applied by the binary).
//! 2. **Environment variables**: `SHOWCASE_DATA_DIR`, `SHOWCASE_PAGE_SIZE`.
//! 3. **Data directory config**: `<data dir>/showcase.toml`.
//! 4. **User config**: `showcase.toml` in the OS config directory (via `directories`).
//! 5. **Compiled defaults**.
//!
//! ## Available settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data directory | Where the JSON collections live |
//! | `page_size` | `3` | Records per listing page |

use crate::error::Result;
use crate::paginate::DEFAULT_PAGE_SIZE;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "showcase.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseConfig {
    /// Directory holding the record collections.
    #[config(env = "SHOWCASE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Records per listing page.
    #[config(env = "SHOWCASE_PAGE_SIZE", default = 3)]
    pub page_size: usize,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "showcase", "showcase")
}

/// The OS data directory, falling back to `./.showcase`.
pub fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".showcase"))
}

impl ShowcaseConfig {
    /// Loads configuration from the environment and config files.
    ///
    /// `data_dir_hint` is the data directory given on the command line, if any;
    /// its `showcase.toml` takes part in the lookup.
    pub fn load(data_dir_hint: Option<&Path>) -> Result<Self> {
        let mut builder = ShowcaseConfig::builder().env();

        if let Some(dir) = data_dir_hint {
            builder = builder.file(dir.join(CONFIG_FILENAME));
        } else if let Some(dir) = std::env::var_os("SHOWCASE_DATA_DIR") {
            builder = builder.file(PathBuf::from(dir).join(CONFIG_FILENAME));
        } else {
            builder = builder.file(default_data_dir().join(CONFIG_FILENAME));
        }
        if let Some(dirs) = project_dirs() {
            builder = builder.file(dirs.config_dir().join(CONFIG_FILENAME));
        }

        Ok(builder.load()?)
    }

    /// The data directory, defaulting to the OS data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    /// Page size, never zero.
    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShowcaseConfig::default();
        assert_eq!(config.page_size, 3);
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_page_size_is_never_zero() {
        let config = ShowcaseConfig {
            page_size: 0,
            ..Default::default()
        };
        assert_eq!(config.page_size(), 1);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = ShowcaseConfig {
            data_dir: Some(PathBuf::from("/tmp/showcase-data")),
            ..Default::default()
        };
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/showcase-data"));
    }

    #[test]
    fn test_deserializes_from_toml_shape() {
        let json = r#"{"data_dir": "/srv/showcase", "page_size": 6}"#;
        let config: ShowcaseConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.page_size, 6);
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/showcase")));
    }
}
