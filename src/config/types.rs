//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::narrow::DEFAULT_NARROW;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub channels: ChannelsConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Defaults for the export run (each can be overridden on the command line)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Narrow expression selecting the messages to scan
    #[serde(default = "default_narrow")]
    pub narrow: String,
    /// Messages requested per history fetch
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u32,
    /// Print the `#channel,...` header line
    #[serde(default = "default_header")]
    pub header: bool,
    /// Write each page as soon as it is fetched instead of in time order
    #[serde(default)]
    pub stream: bool,
}

pub fn default_narrow() -> String {
    DEFAULT_NARROW.to_string()
}

pub fn default_chunk_size() -> u32 {
    1000
}

pub fn default_header() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            narrow: default_narrow(),
            chunk_size: default_chunk_size(),
            header: default_header(),
            stream: false,
        }
    }
}

/// Which channels are loaded into the channel directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelsConfig {
    /// Also include channels the API user is subscribed to (e.g. private ones)
    #[serde(default)]
    pub include_subscribed: bool,
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Override the User-Agent header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

pub fn default_timeout_secs() -> u64 {
    60
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl HttpConfig {
    /// User-Agent sent with every request
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("reaction-export/{}", env!("CARGO_PKG_VERSION")))
    }
}
