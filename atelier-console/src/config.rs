//! Console configuration.
//!
//! Layers, lowest precedence first: built-in defaults, the TOML config file,
//! environment variables (a `.env` file in the working directory is read
//! first) and finally command-line flags.

use crate::api_client::{DEFAULT_TIMEOUT, normalize_base_url};
use atelier_core::context::Language;
use atelier_core::query::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("config file {path} does not exist")]
    MissingConfig { path: PathBuf },
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

/// Resolved settings the console runs with.
#[derive(Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub server_url: String,
    pub token: Option<String>,
    pub language: Language,
    pub page_size: u32,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ConsoleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleConfig")
            .field("server_url", &self.server_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("language", &self.language)
            .field("page_size", &self.page_size)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            token: None,
            language: Language::English,
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// `config.toml` contents. Every key is optional.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub token: Option<String>,
    pub language: Option<String>,
    pub page_size: Option<u32>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub server_url: Option<String>,
    pub token: Option<String>,
    pub language: Option<String>,
    pub page_size: Option<String>,
    pub config_path: Option<PathBuf>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            server_url: non_blank(std::env::var("ATELIER_SERVER_URL").ok()),
            token: non_blank(std::env::var("ATELIER_TOKEN").ok()),
            language: non_blank(std::env::var("ATELIER_LANG").ok()),
            page_size: non_blank(std::env::var("ATELIER_PAGE_SIZE").ok()),
            config_path: non_blank(std::env::var("ATELIER_CONFIG").ok())
                .map(PathBuf::from),
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub server_url: Option<String>,
    pub token: Option<String>,
    pub language: Option<Language>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `<config_dir>/atelier/config.toml`, e.g. `~/.config/atelier/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("atelier").join("config.toml"))
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn load(&self, cli: &CliOverrides) -> Result<ConsoleConfig, ConfigLoadError> {
        let env_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true),
            None => dotenvy::dotenv().map(|_| true),
        }
        .or_else(|err| match err {
            dotenvy::Error::Io(_) => Ok(false),
            other => Err(other),
        })?;
        debug!(env_loaded, "environment gathered");

        let env = EnvConfig::gather();
        let file = self.load_file_config(&env)?;
        compose(file.unwrap_or_default(), env, cli)
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<Option<FileConfig>, ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigLoadError::MissingConfig { path });
                }
                read_file_config(&path).map(Some)
            }
            None => match default_config_path() {
                Some(path) if path.exists() => read_file_config(&path).map(Some),
                _ => Ok(None),
            },
        }
    }
}

pub fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let config = toml::from_str(&contents).map_err(|source| {
        ConfigLoadError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

fn parse_language(key: &'static str, raw: &str) -> Result<Language, ConfigLoadError> {
    raw.parse()
        .map_err(|message| ConfigLoadError::InvalidValue { key, message })
}

fn check_page_size(key: &'static str, size: u32) -> Result<u32, ConfigLoadError> {
    if (1..=MAX_PAGE_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(ConfigLoadError::InvalidValue {
            key,
            message: format!("must be between 1 and {MAX_PAGE_SIZE}"),
        })
    }
}

/// Merge the layers. Later layers win key by key.
pub fn compose(
    file: FileConfig,
    env: EnvConfig,
    cli: &CliOverrides,
) -> Result<ConsoleConfig, ConfigLoadError> {
    let mut config = ConsoleConfig::default();

    if let Some(url) = non_blank(file.server_url) {
        config.server_url = url;
    }
    config.token = non_blank(file.token);
    if let Some(language) = file.language.as_deref() {
        config.language = parse_language("language", language)?;
    }
    if let Some(size) = file.page_size {
        config.page_size = check_page_size("page_size", size)?;
    }
    if let Some(secs) = file.request_timeout_secs {
        if secs == 0 {
            return Err(ConfigLoadError::InvalidValue {
                key: "request_timeout_secs",
                message: "must be at least 1".to_string(),
            });
        }
        config.request_timeout = Duration::from_secs(secs);
    }

    if let Some(url) = env.server_url {
        config.server_url = url;
    }
    if let Some(token) = env.token {
        config.token = Some(token);
    }
    if let Some(language) = env.language.as_deref() {
        config.language = parse_language("ATELIER_LANG", language)?;
    }
    if let Some(raw) = env.page_size.as_deref() {
        let size = raw.trim().parse().map_err(|_| ConfigLoadError::InvalidValue {
            key: "ATELIER_PAGE_SIZE",
            message: format!("'{raw}' is not a number"),
        })?;
        config.page_size = check_page_size("ATELIER_PAGE_SIZE", size)?;
    }

    if let Some(url) = non_blank(cli.server_url.clone()) {
        config.server_url = url;
    }
    if let Some(token) = non_blank(cli.token.clone()) {
        config.token = Some(token);
    }
    if let Some(language) = cli.language {
        config.language = language;
    }
    if let Some(size) = cli.page_size {
        config.page_size = check_page_size("--page-size", size)?;
    }

    config.server_url = normalize_base_url(&config.server_url);
    Ok(config)
}
