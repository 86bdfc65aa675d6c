// src/config.rs
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::errors::{AppError, Result};
use crate::exec::{DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_TIMEOUT_SECS, RunLimits};

/// Configuration for the Ollama suggestion backend.
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_api_base")]
    pub api_base: String,
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            api_base: default_ollama_api_base(),
            model: default_ollama_model(),
        }
    }
}

/// Limits applied to every sandboxed run. Mirrors `exec::RunLimits` but
/// stays plain-integer so it can come straight out of env vars or TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,
    #[serde(default = "default_max_concurrent_runs")]
    pub max_concurrent_runs: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_output_bytes: default_max_output_bytes(),
            max_concurrent_runs: default_max_concurrent_runs(),
        }
    }
}

impl LimitsConfig {
    pub fn run_limits(&self) -> RunLimits {
        RunLimits {
            timeout: Duration::from_secs(self.timeout_secs),
            max_output_bytes: self.max_output_bytes,
        }
    }
}

/// High-level application configuration, loaded from environment variables
/// or from an optional `sandpad.toml` file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workspace_dir")]
    pub workspace_dir: String,
    #[serde(default = "default_python_bin")]
    pub python_bin: String,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workspace_dir: default_workspace_dir(),
            python_bin: default_python_bin(),
            ollama: OllamaConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration: `sandpad.toml` when present, environment
    /// variables on top of the defaults otherwise.
    pub fn load() -> Result<Self> {
        let path = std::env::var("SANDPAD_CONFIG").unwrap_or_else(|_| "sandpad.toml".to_string());
        if Path::new(&path).exists() {
            Self::from_file(&path)
        } else {
            Self::from_env()
        }
    }

    /// Parse configuration from a TOML file. Missing keys fall back to the
    /// same defaults as `from_env`.
    pub fn from_file(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = AppConfig::default();

        if let Ok(host) = std::env::var("HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|_| AppError::Config(format!("PORT is not a number: {}", port)))?;
        }
        if let Ok(dir) = std::env::var("WORKSPACE_DIR") {
            config.workspace_dir = dir;
        }
        if let Ok(bin) = std::env::var("PYTHON_BIN") {
            config.python_bin = bin;
        }
        if let Ok(url) = std::env::var("OLLAMA_API_URL") {
            config.ollama.api_base = url;
        }
        if let Ok(model) = std::env::var("OLLAMA_MODEL") {
            config.ollama.model = model;
        }
        if let Ok(secs) = std::env::var("RUN_TIMEOUT_SECS") {
            config.limits.timeout_secs = secs
                .parse()
                .map_err(|_| AppError::Config(format!("RUN_TIMEOUT_SECS is not a number: {}", secs)))?;
        }
        if let Ok(bytes) = std::env::var("MAX_OUTPUT_BYTES") {
            config.limits.max_output_bytes = bytes
                .parse()
                .map_err(|_| AppError::Config(format!("MAX_OUTPUT_BYTES is not a number: {}", bytes)))?;
        }
        if let Ok(n) = std::env::var("MAX_CONCURRENT_RUNS") {
            config.limits.max_concurrent_runs = n
                .parse()
                .map_err(|_| AppError::Config(format!("MAX_CONCURRENT_RUNS is not a number: {}", n)))?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.limits.timeout_secs == 0 {
            return Err(AppError::Config("run timeout must be at least 1 second".to_string()));
        }
        if self.limits.max_concurrent_runs == 0 {
            return Err(AppError::Config("max_concurrent_runs must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5002
}

fn default_workspace_dir() -> String {
    "./workspace".to_string()
}

fn default_python_bin() -> String {
    "python3".to_string()
}

fn default_ollama_api_base() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3:latest".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_output_bytes() -> usize {
    DEFAULT_MAX_OUTPUT_BYTES
}

fn default_max_concurrent_runs() -> usize {
    8
}
