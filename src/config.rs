use std::{env, path::PathBuf};
use log::info;

pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub data_dir: PathBuf,
}

impl ServerConfig {
    /// Reads the server settings from the environment, falling back to defaults.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| format!("SERVER_PORT must be a number: {}", e))?;
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let data_dir = lookup("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));

        Ok(ServerConfig {
            host,
            port,
            log_level,
            data_dir,
        })
    }

    pub fn log_summary(&self) {
        info!("Server config: host={}, port={}, data_dir={}", self.host, self.port, self.data_dir.display());
    }
}
