/// Admin panel configuration
use crate::error::{CliError, Result};
use admin_client::{ClientConfig, DEFAULT_IDENTITY_URL};
use admin_core::PageSize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "admin.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    #[serde(default = "default_backend")]
    pub backend: BackendSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_metrics")]
    pub metrics: MetricsSettings,

    #[serde(default = "default_view")]
    pub view: ViewSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendSettings {
    #[serde(default = "default_backend_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default = "default_identity_url")]
    pub identity_url: String,

    #[serde(default)]
    pub api_key: Option<String>,

    /// Sign in with these before talking to the backend
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsSettings {
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl AdminConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `admin.toml` is read when
    /// present. `ADMIN_`-prefixed variables override the file, with `__`
    /// between section and key (`ADMIN_BACKEND__URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("ADMIN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        check_url("backend.url", &self.backend.url)?;
        check_url("auth.identity_url", &self.auth.identity_url)?;

        if self.backend.timeout_secs == 0 {
            return Err(CliError::Config(
                "backend.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.metrics.refresh_interval_secs == 0 {
            return Err(CliError::Config(
                "metrics.refresh_interval_secs must be greater than zero".to_string(),
            ));
        }

        self.page_size()?;

        if self.auth.email.is_some() != self.auth.password.is_some() {
            return Err(CliError::Config(
                "auth.email and auth.password must be set together".to_string(),
            ));
        }

        Ok(())
    }

    pub fn page_size(&self) -> Result<PageSize> {
        PageSize::try_from(self.view.page_size)
            .map_err(|e| CliError::Config(format!("view.page_size: {e}")))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.metrics.refresh_interval_secs)
    }

    /// Configured sign-in credentials, if both are present
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.auth.email, &self.auth.password) {
            (Some(email), Some(password)) => Some((email.as_str(), password.as_str())),
            _ => None,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.backend.url.clone())
            .with_identity(self.auth.identity_url.clone(), self.auth.api_key.clone())
            .with_timeout(Duration::from_secs(self.backend.timeout_secs))
    }
}

fn check_url(key: &str, url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(CliError::Config(format!(
            "{key} must start with http:// or https:// (got '{url}')"
        )))
    }
}

// Default values
fn default_backend() -> BackendSettings {
    BackendSettings {
        url: default_backend_url(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_backend_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        identity_url: default_identity_url(),
        api_key: None,
        email: None,
        password: None,
    }
}

fn default_identity_url() -> String {
    DEFAULT_IDENTITY_URL.to_string()
}

fn default_metrics() -> MetricsSettings {
    MetricsSettings {
        refresh_interval_secs: default_refresh_interval_secs(),
    }
}

fn default_refresh_interval_secs() -> u64 {
    30
}

fn default_view() -> ViewSettings {
    ViewSettings {
        page_size: default_page_size(),
    }
}

fn default_page_size() -> usize {
    5
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            auth: default_auth(),
            metrics: default_metrics(),
            view: default_view(),
        }
    }
}
