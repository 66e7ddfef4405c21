// Configuration module entry point
// Loads application configuration and holds the per-process state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, UpstreamConfig};

/// Daily rates feed published by the Central Bank of Russia
pub const DEFAULT_UPSTREAM_URL: &str = "https://www.cbr-xml-daily.ru/daily_json.js";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CONVERTER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("http.server_name", "rate-converter/0.1")?
            .set_default("templates.dir", "templates")?
            .set_default("upstream.url", DEFAULT_UPSTREAM_URL)?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would make every response fail to build
    fn validate(&self) -> Result<(), config::ConfigError> {
        hyper::header::HeaderValue::from_str(&self.http.server_name).map_err(|e| {
            config::ConfigError::Message(format!("Invalid http.server_name: {e}"))
        })?;
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
impl Config {
    /// Defaults with access logging off, pointed at the given pages and feed
    pub fn for_tests(templates_dir: &std::path::Path, upstream: UpstreamConfig) -> Self {
        use types::{HttpConfig, LoggingConfig, ServerConfig, TemplatesConfig};

        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                log_file: None,
            },
            http: HttpConfig {
                server_name: "test".to_string(),
            },
            templates: TemplatesConfig {
                dir: templates_dir.to_string_lossy().into_owned(),
            },
            upstream,
        }
    }
}
