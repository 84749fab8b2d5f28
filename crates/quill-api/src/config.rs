use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Process-wide settings. Built once at startup and shared behind an `Arc`;
/// nothing reads the environment after that.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// `*` allows any origin.
    pub allowed_origins: Vec<String>,
    /// Reported by `/health`.
    pub service_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("QUILL_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("QUILL_PORT")
            .unwrap_or_else(|| "8000".into())
            .parse()
            .context("QUILL_PORT must be a port number")?;
        let db_path = lookup("QUILL_DB_PATH")
            .unwrap_or_else(|| "quill.db".into())
            .into();
        let allowed_origins = lookup("QUILL_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        let service_name = lookup("QUILL_SERVICE_NAME").unwrap_or_else(|| "blog-api".into());

        Ok(Self {
            host,
            port,
            db_path,
            allowed_origins,
            service_name,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.db_path, PathBuf::from("quill.db"));
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.service_name, "blog-api");
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let config = config_from(&[(
            "QUILL_ALLOWED_ORIGINS",
            "http://a.test, http://b.test ,,",
        )])
        .unwrap();
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert!(!config.allows_any_origin());

        let config = config_from(&[("QUILL_ALLOWED_ORIGINS", "*")]).unwrap();
        assert!(config.allows_any_origin());
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(config_from(&[("QUILL_PORT", "eighty")]).is_err());
        assert!(config_from(&[("QUILL_PORT", "70000")]).is_err());
    }
}
