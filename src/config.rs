use cdocs::docs::DEFAULT_NS;
use cdocs::report::DEFAULT_WRAP_WIDTH;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const CONFIG_FILE: &str = "cdocs.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_snapshot")]
    pub snapshot: PathBuf,
    #[serde(default = "default_ns")]
    pub default_ns: String,
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
    #[serde(default = "default_highlight")]
    pub highlight: bool,
}

fn default_snapshot() -> PathBuf {
    PathBuf::from("./clojuredocs-snapshot.json")
}

fn default_ns() -> String {
    DEFAULT_NS.to_string()
}

fn default_wrap_width() -> usize {
    DEFAULT_WRAP_WIDTH
}

fn default_highlight() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot: default_snapshot(),
            default_ns: default_ns(),
            wrap_width: default_wrap_width(),
            highlight: default_highlight(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Read `path`, falling back to defaults if it is missing or invalid.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match fs::read_to_string(config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => {
                        return config;
                    }
                    Err(e) => {
                        warn!(
                            path = %config_path.display(),
                            error = %e,
                            "failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    warn!(
                        path = %config_path.display(),
                        error = %e,
                        "failed to read config, using defaults"
                    );
                }
            }
        }

        Config::default()
    }
}
