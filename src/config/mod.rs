//! Configuration module

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub retriever: RetrieverConfig,
}

/// Router web interface endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub password_url: Option<String>,
    #[serde(default)]
    pub set_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransportConfig {
    /// 0 disables the connect timeout
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default)]
    pub read_timeout_ms: Option<u64>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: None,
        }
    }
}

impl TransportConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        match self.connect_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}

/// Body layout used by the set operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormEncoding {
    /// `password=<p>&secret<s>&`, as the router client always sent it
    #[default]
    Legacy,
    /// Proper `application/x-www-form-urlencoded`
    Standard,
}

impl FormEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormEncoding::Legacy => "legacy",
            FormEncoding::Standard => "standard",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "standard" => FormEncoding::Standard,
            _ => FormEncoding::Legacy,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieverConfig {
    #[serde(default)]
    pub form_encoding: FormEncoding,
    #[serde(default)]
    pub report_failures: bool,
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("SINGLENET").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize().unwrap_or_else(|e| {
            tracing::warn!("Invalid configuration, using defaults: {}", e);
            Config::default()
        });

        Ok(config)
    }
}
