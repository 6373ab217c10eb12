use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

use common::env::{env_or, env_parse};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub mysafe: MysafeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Settings for the remote identity/device platform and the OTP sender.
#[derive(Debug, Clone, Deserialize)]
pub struct MysafeConfig {
    #[serde(default)]
    pub vcs_base_url: String,
    #[serde(default)]
    pub vhome_base_url: String,
    #[serde(default = "default_client_id")]
    pub client_id: String,
    #[serde(default = "default_organization")]
    pub organization: String,
    #[serde(default = "default_application")]
    pub application: String,
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

impl Default for MysafeConfig {
    fn default() -> Self {
        Self {
            vcs_base_url: String::new(),
            vhome_base_url: String::new(),
            client_id: default_client_id(),
            organization: default_organization(),
            application: default_application(),
            country_code: default_country_code(),
            request_timeout_secs: default_request_timeout(),
            content_type: default_content_type(),
        }
    }
}

fn default_client_id() -> String { "ee6720f1b7ab3bb1a9f6".into() }
fn default_organization() -> String { "safe_platform_og".into() }
fn default_application() -> String { "safe_platform".into() }
fn default_country_code() -> String { "VN".into() }
fn default_request_timeout() -> u64 { 15 }
fn default_content_type() -> String { "application/json".into() }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Defaults only when the file does not exist; unreadable or malformed files are errors.
pub fn load_or_default(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).map_err(|e| anyhow!("invalid config file {}: {}", path, e)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(anyhow!("cannot read config file {}: {}", path, e)),
    }
}

impl AppConfig {
    /// Load `config.toml` when present, otherwise start from defaults; env vars
    /// fill whatever the file left empty.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_or_default(&config_path())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.mysafe.normalize_from_env();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = env_parse::<u16>("SERVER_PORT") {
            self.port = port;
        }
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if let Some(w) = env_parse::<usize>("TOKIO_WORKER_THREADS") {
            self.worker_threads = Some(w);
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must be a postgres:// or sqlite: url"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl MysafeConfig {
    pub fn normalize_from_env(&mut self) {
        if self.vcs_base_url.trim().is_empty() {
            self.vcs_base_url = env_or("MYSAFE_VCS_URL", "http://localhost:8000");
        }
        if self.vhome_base_url.trim().is_empty() {
            self.vhome_base_url = env_or("MYSAFE_VHOME_URL", "http://localhost:8001");
        }
        self.content_type = env_or("CONTENT_TYPE", &self.content_type);
        self.vcs_base_url = self.vcs_base_url.trim_end_matches('/').to_string();
        self.vhome_base_url = self.vhome_base_url.trim_end_matches('/').to_string();
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = default_request_timeout();
        }
    }
}
