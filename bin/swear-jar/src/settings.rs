//! Runtime settings: built-in defaults overridden by `SWEAR_JAR_*` environment
//! variables (a `.env` file is loaded into the environment first).

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, Map};
use secrecy::SecretString;
use serde::Deserialize;

pub const ENV_PREFIX: &str = "SWEAR_JAR";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Holds `lists.json` and `evaluations.log`.
    pub data_dir: PathBuf,
    /// Served at `/` when set (index.html, script.js, ...).
    pub static_dir: Option<PathBuf>,
    pub gemini_api_key: Option<SecretString>,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 3000)?
            .set_default("data_dir", "./data")?
            .set_default("gemini_model", "gemini-1.5-flash-latest")?
            .set_default("gemini_base_url", "https://generativelanguage.googleapis.com")?
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}
