use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &["kimia.toml", "config/kimia.toml"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where the listing API lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ApiConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl ApiConfig {
    fn default_base_url() -> String {
        "http://localhost:8000".to_string()
    }

    const fn default_request_timeout() -> u64 {
        30
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File holding the admin bearer token between runs
    #[serde(default = "StorageConfig::default_token_path")]
    pub token_path: PathBuf,
}

impl StorageConfig {
    fn default_token_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("kimia-realty").join("token"))
            .unwrap_or_else(|| PathBuf::from(".kimia-token"))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_path: Self::default_token_path(),
        }
    }
}

/// Load configuration from defaults, an optional file, and `KIMIA__*`
/// environment overrides, in increasing priority.
///
/// `explicit` wins over `KIMIA_CONFIG`, which wins over the default search
/// locations in the working directory.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let timeout = i64::try_from(defaults.api.request_timeout_seconds).unwrap_or(i64::MAX);
    let mut builder = config::Config::builder()
        .set_default("api.base_url", defaults.api.base_url.clone())
        .context("invalid default for api.base_url")?
        .set_default("api.request_timeout_seconds", timeout)
        .context("invalid default for api.request_timeout_seconds")?
        .set_default(
            "storage.token_path",
            defaults.storage.token_path.display().to_string(),
        )
        .context("invalid default for storage.token_path")?;

    let file = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var("KIMIA_CONFIG").ok().map(PathBuf::from))
        .or_else(|| {
            let cwd = std::env::current_dir().ok()?;
            DEFAULT_CONFIG_FILES
                .iter()
                .map(|candidate| cwd.join(candidate))
                .find(|path| path.exists())
        });

    match file {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
        }
        None => debug!("no configuration file found, relying on defaults and environment"),
    }

    builder = builder.add_source(config::Environment::with_prefix("KIMIA").separator("__"));

    let cfg = builder.build().context("unable to build configuration")?;
    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(base_url = %config.api.base_url, "configuration loaded");
    Ok(config)
}
