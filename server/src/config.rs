use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Single origin allowed by CORS. Any origin when unset.
    pub allowed_origin: Option<String>,
    /// Bound of the command channel into the server loop.
    pub channel_capacity: usize,
}

impl std::default::Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            allowed_origin: None,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { key, value })
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, keeping defaults for absent or empty keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("WHITEBOARD_HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = parse_number("PORT", port)?;
        }
        config.allowed_origin = get("WHITEBOARD_ALLOWED_ORIGIN");
        if let Some(capacity) = get("WHITEBOARD_CHANNEL_CAPACITY") {
            config.channel_capacity = parse_number("WHITEBOARD_CHANNEL_CAPACITY", capacity)?;
            if config.channel_capacity == 0 {
                return Err(ConfigError::Zero {
                    key: "WHITEBOARD_CHANNEL_CAPACITY",
                });
            }
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
