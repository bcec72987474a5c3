use std::path::PathBuf;

use anyhow::{Context, Result};
use cirrus_core::Pipeline;
use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind, `CIRRUS_ADDR`
    pub addr: String,
    /// Newline-delimited cardinal word list, `CIRRUS_DICTIONARY`.
    /// When unset the list compiled into cirrus-core is used.
    #[serde(default)]
    pub dictionary_path: Option<PathBuf>,
    /// Pause between streamed WebSocket events, `CIRRUS_WS_DELAY_MS`
    #[serde(default)]
    pub ws_event_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:3000".to_string(),
            dictionary_path: None,
            ws_event_delay_ms: 35,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            addr: std::env::var("CIRRUS_ADDR").unwrap_or(defaults.addr),
            dictionary_path: std::env::var_os("CIRRUS_DICTIONARY").map(PathBuf::from),
            ws_event_delay_ms: std::env::var("CIRRUS_WS_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ws_event_delay_ms),
        }
    }

    /// Builds the pipeline from the configured word list.
    pub fn load_pipeline(&self) -> Result<Pipeline> {
        match &self.dictionary_path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading dictionary {}", path.display()))?;
                Pipeline::from_word_list(&content)
                    .with_context(|| format!("loading dictionary {}", path.display()))
            }
            None => Pipeline::embedded().context("loading embedded dictionary"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_embedded_dictionary() {
        let pipeline = ServerConfig::default().load_pipeline().unwrap();
        assert!(pipeline.dictionary().contains("dozen"));
    }

    #[test]
    fn test_missing_dictionary_file_is_an_error() {
        let config = ServerConfig {
            dictionary_path: Some(PathBuf::from("/nonexistent/cardinals.txt")),
            ..ServerConfig::default()
        };
        let err = config.load_pipeline().unwrap_err();
        assert!(err.to_string().contains("reading dictionary"));
    }
}
