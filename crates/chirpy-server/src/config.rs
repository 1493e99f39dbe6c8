use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub fileserver_root: PathBuf,
    pub unique_emails: bool,
    /// Argon2 cost overrides. `None` keeps the library defaults.
    pub argon2_memory_kib: Option<u32>,
    pub argon2_iterations: Option<u32>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = get("JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("JWT_SECRET is unset or still a placeholder");
        }

        let port = match get("CHIRPY_PORT") {
            Some(v) => v.parse().with_context(|| format!("invalid CHIRPY_PORT: {}", v))?,
            None => 8080,
        };

        Ok(Self {
            jwt_secret,
            host: get("CHIRPY_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            db_path: get("CHIRPY_DB_PATH")
                .unwrap_or_else(|| "database.json".into())
                .into(),
            fileserver_root: get("CHIRPY_FILESERVER_ROOT")
                .unwrap_or_else(|| ".".into())
                .into(),
            unique_emails: parse_flag("CHIRPY_UNIQUE_EMAILS", get("CHIRPY_UNIQUE_EMAILS"))?,
            argon2_memory_kib: parse_opt("CHIRPY_ARGON2_MEMORY_KIB", get("CHIRPY_ARGON2_MEMORY_KIB"))?,
            argon2_iterations: parse_opt("CHIRPY_ARGON2_ITERATIONS", get("CHIRPY_ARGON2_ITERATIONS"))?,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn parse_flag(key: &str, value: Option<String>) -> Result<bool> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => bail!("invalid {}: {}", key, other),
    }
}

fn parse_opt(key: &str, value: Option<String>) -> Result<Option<u32>> {
    value
        .map(|v| v.parse().with_context(|| format!("invalid {}: {}", key, v)))
        .transpose()
}
