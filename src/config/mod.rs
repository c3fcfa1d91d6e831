// Configuration module entry point
// Loads layered configuration and owns shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, ServerConfig};

impl Config {
    /// Load configuration from "config.toml" (when present), the `PORT`
    /// environment variable, then built-in defaults
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            // PORT wins over both the file and the default
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str, port: u16) -> Config {
        Config {
            server: ServerConfig {
                host: host.to_string(),
                port,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: true,
            },
        }
    }

    #[test]
    fn socket_addr_parses_host_and_port() {
        let addr = config("127.0.0.1", 3000).socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
        assert!(addr.is_ipv4());
    }

    #[test]
    fn socket_addr_rejects_invalid_host() {
        assert!(config("not a host", 3000).socket_addr().is_err());
    }
}
