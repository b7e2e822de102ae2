// src/config.rs
use std::{collections::HashMap, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Jsonl,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreKind,
    pub data_dir: PathBuf,
    /// `None` disables the admin routes.
    pub admin_key: Option<String>,
    /// Bearer token → identity.
    pub api_tokens: HashMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            store: StoreKind::Memory,
            data_dir: PathBuf::from("data/chat"),
            admin_key: None,
            api_tokens: HashMap::new(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("SHOPBOT_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("SHOPBOT_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "SHOPBOT_PORT", value: port })?;
        }
        if let Some(store) = lookup("SHOPBOT_STORE") {
            config.store = match store.trim().to_lowercase().as_str() {
                "memory" => StoreKind::Memory,
                "jsonl" => StoreKind::Jsonl,
                _ => return Err(ConfigError::Invalid { key: "SHOPBOT_STORE", value: store }),
            };
        }
        if let Some(dir) = lookup("SHOPBOT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.admin_key = lookup("SHOPBOT_ADMIN_KEY").filter(|k| !k.trim().is_empty());
        if let Some(tokens) = lookup("SHOPBOT_API_TOKENS") {
            config.api_tokens = parse_tokens(&tokens)?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// "tok1=alice,tok2=bob"
fn parse_tokens(raw: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut tokens = HashMap::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match pair.split_once('=') {
            Some((token, identity)) if !token.trim().is_empty() && !identity.trim().is_empty() => {
                tokens.insert(token.trim().to_string(), identity.trim().to_string());
            }
            _ => {
                return Err(ConfigError::Invalid {
                    key: "SHOPBOT_API_TOKENS",
                    value: pair.to_string(),
                });
            }
        }
    }
    Ok(tokens)
}
