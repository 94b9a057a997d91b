use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "flatseller.toml",
    "config/flatseller.toml",
    "../flatseller.toml",
    "../config/flatseller.toml",
];

const ENV_PREFIX: &str = "FLATSELLER";
const CONFIG_PATH_VAR: &str = "FLATSELLER_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub env: DeployEnv,
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Reject settings the server cannot start with.
    ///
    /// ```
    /// use flatseller_config::AppConfig;
    ///
    /// let mut config = AppConfig::default();
    /// assert!(config.validate().is_err());
    ///
    /// config.auth.token_secret = "a-long-enough-signing-secret".to_string();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.auth.token_secret.trim().is_empty() {
            bail!("auth.token_secret is required");
        }
        if self.auth.token_ttl_seconds == 0 {
            bail!("auth.token_ttl_seconds must be greater than zero");
        }
        if self.http.request_timeout_seconds == 0 {
            bail!("http.request_timeout_seconds must be greater than zero");
        }
        if self.database.max_connections == 0 {
            bail!("database.max_connections must be greater than zero");
        }
        Ok(())
    }
}

/// Deployment environment, selects the logging profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployEnv {
    #[default]
    Local,
    Dev,
    Prod,
}

impl DeployEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeployEnv::Local => "local",
            DeployEnv::Dev => "dev",
            DeployEnv::Prod => "prod",
        }
    }
}

impl fmt::Display for DeployEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
    #[serde(default = "HttpConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl HttpConfig {
    const fn default_request_timeout() -> u64 {
        4
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://flatseller.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub token_secret: String,
    #[serde(default = "AuthConfig::default_token_ttl")]
    pub token_ttl_seconds: u64,
    #[serde(default)]
    pub password_hashing: PasswordHashingConfig,
}

impl AuthConfig {
    const fn default_token_ttl() -> u64 {
        3_600
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_seconds)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            token_ttl_seconds: Self::default_token_ttl(),
            password_hashing: PasswordHashingConfig::default(),
        }
    }
}

// Keeps the signing secret out of startup logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"<redacted>")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("password_hashing", &self.password_hashing)
            .finish()
    }
}

/// Argon2id cost parameters. The defaults are the argon2 crate defaults.
///
/// ```
/// use flatseller_config::PasswordHashingConfig;
///
/// let cost = PasswordHashingConfig::default();
/// assert_eq!(cost.memory_kib, 19_456);
/// assert_eq!(cost.iterations, 2);
/// assert_eq!(cost.parallelism, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordHashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use flatseller_config::load;
///
/// std::env::remove_var("FLATSELLER_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("env", defaults.env.as_str())?
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default(
            "http.request_timeout_seconds",
            clamp_to_i64(defaults.http.request_timeout_seconds),
        )?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default(
            "auth.token_ttl_seconds",
            clamp_to_i64(defaults.auth.token_ttl_seconds),
        )?
        .set_default(
            "auth.password_hashing.memory_kib",
            i64::from(defaults.auth.password_hashing.memory_kib),
        )?
        .set_default(
            "auth.password_hashing.iterations",
            i64::from(defaults.auth.password_hashing.iterations),
        )?
        .set_default(
            "auth.password_hashing.parallelism",
            i64::from(defaults.auth.password_hashing.parallelism),
        )?;

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via {CONFIG_PATH_VAR}");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    // chrono durations are i64-backed
    if config.auth.token_ttl_seconds > i64::MAX as u64 {
        config.auth.token_ttl_seconds = i64::MAX as u64;
    }

    debug!(?config, "loaded backend configuration");
    Ok(config)
}

fn clamp_to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
