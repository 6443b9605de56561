use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable overriding `[jwt].key`.
pub const JWT_KEY_ENV: &str = "HRMS_JWT_KEY";

/// Environment variable overriding `[general].database_path`.
pub const DATABASE_URL_ENV: &str = "HRMS_DATABASE_URL";

const MIN_JWT_KEY_BYTES: usize = 32;

/// Shipped default signing key. Only usable when the server is disabled.
const PLACEHOLDER_JWT_KEY: &str = "change-me-change-me-change-me-change-me";

/// Random bytes behind a generated signing key (before base64).
const GENERATED_JWT_KEY_BYTES: usize = 64;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub jwt: JwtConfig,

    pub security: SecurityConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/hrms.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 5062,
            cors_allowed_origins: vec![
                "https://localhost:7003".to_string(),
                "http://localhost:5291".to_string(),
            ],
        }
    }
}

/// Signing parameters for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret. Must be at least 32 bytes.
    pub key: String,

    pub issuer: String,

    pub audience: String,

    /// Access token lifetime in minutes (default: 5)
    pub access_token_minutes: i64,
}

impl JwtConfig {
    /// Fresh random HMAC key, base64 encoded.
    #[must_use]
    pub fn generate_key() -> String {
        use base64::Engine;
        use rand::RngCore;

        let mut bytes = [0u8; GENERATED_JWT_KEY_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        base64::engine::general_purpose::STANDARD.encode(bytes)
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            key: PLACEHOLDER_JWT_KEY.to_string(),
            issuer: "hrms".to_string(),
            audience: "hrms-client".to_string(),
            access_token_minutes: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB (default: 8192 = 8MB)
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations)
    pub argon2_time_cost: u32,

    /// Argon2 parallelism (default: 1)
    pub argon2_parallelism: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,

    pub loki_labels: std::collections::HashMap<String, String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        let mut labels = std::collections::HashMap::new();
        labels.insert("app".to_string(), "hrms".to_string());

        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
            loki_labels: labels,
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies environment overrides.
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(JWT_KEY_ENV)
            && !key.is_empty()
        {
            self.jwt.key = key;
        }

        if let Ok(url) = std::env::var(DATABASE_URL_ENV)
            && !url.is_empty()
        {
            self.general.database_path = url;
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("hrms").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".hrms").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let mut config = Self::default();
            config.jwt.key = JwtConfig::generate_key();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.jwt.key.len() < MIN_JWT_KEY_BYTES {
            anyhow::bail!("JWT key must be at least {MIN_JWT_KEY_BYTES} bytes");
        }

        if self.server.enabled && self.jwt.key == PLACEHOLDER_JWT_KEY {
            anyhow::bail!(
                "JWT key is still the shipped placeholder; set [jwt].key or {JWT_KEY_ENV}"
            );
        }

        if self.jwt.access_token_minutes <= 0 {
            anyhow::bail!("JWT access token lifetime must be > 0 minutes");
        }

        if self.server.enabled && self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0 when the server is enabled");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let mut config = Config::default();
        assert_eq!(config.jwt.access_token_minutes, 5);
        assert_eq!(config.general.max_db_connections, 5);

        config.jwt.key = JwtConfig::generate_key();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_placeholder_jwt_key_is_rejected() {
        let mut config = Config::default();
        assert!(config.validate().is_err());

        config.server.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generated_jwt_keys() {
        let a = JwtConfig::generate_key();
        let b = JwtConfig::generate_key();
        assert_ne!(a, b);
        assert_ne!(a, PLACEHOLDER_JWT_KEY);
        assert!(a.len() >= MIN_JWT_KEY_BYTES);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[jwt]"));
        assert!(toml_str.contains("[server]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [jwt]
            issuer = "acme"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.jwt.issuer, "acme");

        assert_eq!(config.jwt.audience, "hrms-client");
        assert_eq!(config.server.port, 5062);
    }

    #[test]
    fn test_short_jwt_key_is_rejected() {
        let mut config = Config::default();
        config.jwt.key = "short".to_string();
        assert!(config.validate().is_err());
    }
}
