use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use bookmarks::DEFAULT_BOOKMARKS_KEY;
use feed::DEFAULT_BASE_URL;

const DEFAULT_CONFIG_FILE: &str = "jobs";
const ENV_PREFIX: &str = "JOBS";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub feed: FeedSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSettings {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub dir: PathBuf,
    pub bookmarks_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Settings {
    /// Defaults, then `jobs.toml` (or `path`), then `JOBS_*` variables
    /// such as `JOBS_FEED__BASE_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        Self::from_sources(file, env_source())
    }

    fn from_sources<F>(file: F, env: Environment) -> Result<Self, ConfigError>
    where
        F: config::Source + Send + Sync + 'static,
    {
        Config::builder()
            .set_default("feed.base_url", DEFAULT_BASE_URL)?
            .set_default("storage.dir", "data")?
            .set_default("storage.bookmarks_key", DEFAULT_BOOKMARKS_KEY)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
