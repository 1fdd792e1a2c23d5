use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub dimensions_file: PathBuf,
    pub log_json: bool,
    pub max_body_bytes: usize,
    pub shutdown_drain: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            dimensions_file: PathBuf::from("saved_dimensions.json"),
            log_json: true,
            max_body_bytes: 16 * 1024,
            shutdown_drain: Duration::from_millis(500),
        }
    }
}

pub fn validate_startup_config(cfg: &ServerConfig) -> Result<(), String> {
    if cfg.max_body_bytes == 0 {
        return Err("max body bytes must be > 0".to_string());
    }
    if cfg.dimensions_file.as_os_str().is_empty() {
        return Err("dimensions file path must not be empty".to_string());
    }
    if cfg.bind_addr.trim().is_empty() {
        return Err("bind address must not be empty".to_string());
    }
    Ok(())
}
