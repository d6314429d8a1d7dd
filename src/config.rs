// src/config.rs
//! Service configuration: defaults, then an optional TOML file, then env overrides.

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::engine::DEFAULT_ENGINE;

// --- env defaults & names ---
pub const DEFAULT_CONFIG_PATH: &str = "config/service.toml";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

pub const ENV_CONFIG_PATH: &str = "SENTIMENT_CONFIG_PATH";
pub const ENV_BIND_ADDR: &str = "SENTIMENT_BIND_ADDR";
pub const ENV_ENGINE: &str = "SENTIMENT_ENGINE";
pub const ENV_METRICS: &str = "SENTIMENT_METRICS";
pub const ENV_BODY_LIMIT: &str = "SENTIMENT_BODY_LIMIT";
pub const ENV_LOG_FORMAT: &str = "SENTIMENT_LOG_FORMAT";
pub const ENV_CORS: &str = "SENTIMENT_CORS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("unsupported log format: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    /// Polarity engine name, see `engine::build_engine`.
    pub engine: String,
    /// Mount `GET /metrics` and install the Prometheus recorder.
    pub metrics: bool,
    /// Max request body in bytes.
    pub body_limit: usize,
    pub log_format: LogFormat,
    pub cors: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8000))),
            engine: DEFAULT_ENGINE.to_string(),
            metrics: false,
            body_limit: DEFAULT_BODY_LIMIT,
            log_format: LogFormat::Compact,
            cors: true,
        }
    }
}

impl ServiceConfig {
    /// Load using env var + fallbacks:
    /// 1) $SENTIMENT_CONFIG_PATH (must exist)
    /// 2) config/service.toml (optional)
    /// 3) built-in defaults
    ///
    /// Env overrides are applied last.
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var(ENV_CONFIG_PATH) {
            Ok(p) => {
                let pb = PathBuf::from(p);
                if !pb.exists() {
                    bail!("{ENV_CONFIG_PATH} points to non-existent path {}", pb.display());
                }
                Self::from_file(&pb)?
            }
            Err(_) => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::from_file(default)?
                } else {
                    Self::default()
                }
            }
        };
        cfg.apply_env(|k| std::env::var(k).ok())?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading service config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing service config {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: ServiceConfig = toml::from_str(s)?;
        if cfg.body_limit == 0 {
            bail!("body_limit must be greater than zero");
        }
        Ok(cfg)
    }

    /// Apply overrides from a variable lookup (`std::env::var` in production).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_BIND_ADDR) {
            self.bind_addr = v
                .trim()
                .parse()
                .with_context(|| format!("invalid {ENV_BIND_ADDR}: {v}"))?;
        }
        if let Some(v) = lookup(ENV_ENGINE) {
            self.engine = v.trim().to_string();
        }
        if let Some(v) = lookup(ENV_METRICS) {
            self.metrics = parse_flag(&v);
        }
        if let Some(v) = lookup(ENV_BODY_LIMIT) {
            let n: usize = v
                .trim()
                .parse()
                .with_context(|| format!("invalid {ENV_BODY_LIMIT}: {v}"))?;
            if n == 0 {
                bail!("{ENV_BODY_LIMIT} must be greater than zero");
            }
            self.body_limit = n;
        }
        if let Some(v) = lookup(ENV_LOG_FORMAT) {
            self.log_format = v.parse()?;
        }
        if let Some(v) = lookup(ENV_CORS) {
            self.cors = parse_flag(&v);
        }
        Ok(())
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
