/// `load_config` module: Loads a static YAML config and injects secrets from the environment.
///
/// # Responsibilities
/// - Parse the optional user-supplied YAML file into [`SyncConfig`]; every field has a default
/// - Read the enhancement API key from `OPENAI_API_KEY`; it never lives in the file
/// - Produce clear diagnostics: any failure in loading surfaces at the CLI boundary
///
/// # Errors
/// All errors in this module use `anyhow::Error` for context-rich diagnostics.
use anyhow::Result;
use deck_sync_core::config::SyncConfig;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

pub struct CliConfig {
    pub sync: SyncConfig,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("sync", &self.sync)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Loads `path` when given, defaults otherwise, and injects the API key from the environment.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<CliConfig> {
    let sync = match path {
        Some(path) => load_sync_config(path.as_ref())?,
        None => {
            info!("No config file given, using defaults");
            SyncConfig::default()
        }
    };
    sync.trace_loaded();

    let api_key = match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => {
            info!("{API_KEY_VAR} found in env");
            Some(key)
        }
        _ => {
            if sync.enhancement.enabled {
                warn!("{API_KEY_VAR} not set; enhancement will be skipped for every card");
            }
            None
        }
    };

    Ok(CliConfig { sync, api_key })
}

fn load_sync_config(path_ref: &Path) -> Result<SyncConfig> {
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    // An empty file is a valid, all-defaults config.
    if config_content.trim().is_empty() {
        return Ok(SyncConfig::default());
    }

    match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}
