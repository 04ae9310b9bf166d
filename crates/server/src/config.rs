use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Human-readable debug logging
    #[serde(default)]
    pub debug: bool,

    /// Log level (an `EnvFilter` directive)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Pipeline YAML (models, keywords, embedding, lexicon). Built-in
    /// defaults apply when unset.
    #[serde(default)]
    pub pipeline_config: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            debug: false,
            log_level: default_log_level(),
            enable_cors: default_true(),
            max_body_size_mb: default_max_body_size_mb(),
            pipeline_config: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.*` file,
    /// `TEXTLENS__*` variables, and finally `PORT` / `DEBUG`.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("TEXTLENS").separator("__"));

        let mut config: ServerConfig = builder.build()?.try_deserialize()?;
        config.apply_overrides(env::var("PORT").ok(), env::var("DEBUG").ok())?;
        Ok(config)
    }

    /// Applies the bare `PORT` and `DEBUG` values. Only the exact string
    /// `"True"` turns debug on.
    pub fn apply_overrides(
        &mut self,
        port: Option<String>,
        debug: Option<String>,
    ) -> anyhow::Result<()> {
        if let Some(port) = port {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT '{port}': {e}"))?;
        }
        if let Some(debug) = debug {
            self.debug = debug == "True";
        }
        Ok(())
    }

    /// Filter directive used by the subscriber.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.log_level
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_body_size_mb() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.bind_addr, "0.0.0.0");
        assert_eq!(cfg.max_body_size_mb, 10);
        assert!(cfg.enable_cors);
        assert!(!cfg.debug);
        assert!(cfg.pipeline_config.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 5000);
    }

    #[test]
    fn test_port_and_debug_overrides() {
        let mut cfg = ServerConfig::default();
        cfg.apply_overrides(Some("8081".into()), Some("True".into()))
            .unwrap();
        assert_eq!(cfg.port, 8081);
        assert!(cfg.debug);
        assert_eq!(cfg.effective_log_level(), "debug");
    }

    #[test]
    fn test_debug_requires_exact_true() {
        let mut cfg = ServerConfig::default();
        cfg.apply_overrides(None, Some("true".into())).unwrap();
        assert!(!cfg.debug);
        assert_eq!(cfg.effective_log_level(), "info");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut cfg = ServerConfig::default();
        assert!(cfg.apply_overrides(Some("http".into()), None).is_err());
        assert_eq!(cfg.port, 5000);
    }

    #[test]
    fn test_max_body_size_bytes() {
        let cfg = ServerConfig {
            max_body_size_mb: 2,
            ..ServerConfig::default()
        };
        assert_eq!(cfg.max_body_size(), 2 * 1024 * 1024);
    }
}
