use crate::url::HostMatch;
use serde::Deserialize;

/// Browser-like client identity; some servers reject requests without one
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Linksieve
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Timeout applied to every page fetch and link check (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum number of page fetches in flight
    #[serde(rename = "max-concurrent-pages", default = "default_pages")]
    pub max_concurrent_pages: usize,

    /// Maximum number of external link checks in flight per page
    #[serde(rename = "max-concurrent-checks", default = "default_checks")]
    pub max_concurrent_checks: usize,

    /// How a link's host is compared with the seed host
    #[serde(rename = "host-match", default)]
    pub host_match: HostMatch,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
            max_concurrent_pages: default_pages(),
            max_concurrent_checks: default_checks(),
            host_match: HostMatch::default(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Full User-Agent header value
    #[serde(default = "default_user_agent")]
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root directory for exported tables
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Table format
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            format: OutputFormat::default(),
        }
    }
}

/// Tabular file formats the exporter can write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Markdown,
}

fn default_timeout() -> u64 {
    5
}

fn default_pages() -> usize {
    8
}

fn default_checks() -> usize {
    16
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_directory() -> String {
    "output".to_string()
}
