use std::env;
use std::path::PathBuf;

use crate::common::ConfigError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";
pub const DEFAULT_PUBLIC_UPLOAD_BASE: &str = "/uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

/// Options the request handlers need at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebOptions {
    pub max_upload_bytes: usize,
    pub secure_cookies: bool,
}

impl Default for WebOptions {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            secure_cookies: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub upload_dir: PathBuf,
    pub public_upload_base: String,
    pub admin: Option<AdminBootstrap>,
    pub log_json: bool,
    pub web: WebOptions,
}

fn env_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_bool(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env_string(name) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Ok(false),
            _ => Err(ConfigError::Invalid {
                key: name,
                reason: format!("expected a boolean, got '{}'", v),
            }),
        },
    }
}

fn env_usize(name: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env_string(name) {
        None => Ok(default),
        Some(v) => v.parse::<usize>().map_err(|e| ConfigError::Invalid {
            key: name,
            reason: e.to_string(),
        }),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin = match (
            env_string("MAAGAP_ADMIN_EMAIL"),
            env_string("MAAGAP_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(AdminBootstrap { email, password }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("MAAGAP_ADMIN_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Missing("MAAGAP_ADMIN_EMAIL")),
        };

        let max_upload_bytes = env_usize("MAAGAP_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;
        if max_upload_bytes == 0 {
            return Err(ConfigError::Invalid {
                key: "MAAGAP_MAX_UPLOAD_BYTES",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            database_url: env_string("DATABASE_URL"),
            bind_addr: env_string("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            upload_dir: env_string("MAAGAP_UPLOAD_DIR")
                .unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string())
                .into(),
            public_upload_base: env_string("MAAGAP_PUBLIC_UPLOAD_BASE")
                .unwrap_or_else(|| DEFAULT_PUBLIC_UPLOAD_BASE.to_string()),
            admin,
            log_json: env_bool("MAAGAP_LOG_JSON", false)?,
            web: WebOptions {
                max_upload_bytes,
                secure_cookies: env_bool("MAAGAP_SECURE_COOKIES", false)?,
            },
        })
    }
}
