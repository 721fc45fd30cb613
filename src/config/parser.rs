use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::url::HostMatch;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
request-timeout-secs = 10
max-concurrent-pages = 4
max-concurrent-checks = 2
host-match = "exact"

[user-agent]
value = "TestAgent/1.0"

[output]
directory = "./reports"
format = "markdown"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.request_timeout_secs, 10);
        assert_eq!(config.crawler.max_concurrent_pages, 4);
        assert_eq!(config.crawler.max_concurrent_checks, 2);
        assert_eq!(config.crawler.host_match, HostMatch::Exact);
        assert_eq!(config.user_agent.value, "TestAgent/1.0");
        assert_eq!(config.output.directory, "./reports");
        assert_eq!(config.output.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.crawler.request_timeout_secs, 5);
        assert_eq!(config.crawler.host_match, HostMatch::Contains);
        assert_eq!(config.output.directory, "output");
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!(config.user_agent.value.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let config = parse_config("[crawler]\nmax-concurrent-pages = 2\n").unwrap();
        assert_eq!(config.crawler.max_concurrent_pages, 2);
        assert_eq!(config.crawler.request_timeout_secs, 5);
        assert_eq!(config.crawler.max_concurrent_checks, 16);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/linksieve.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_host_match_rejected() {
        let result = parse_config("[crawler]\nhost-match = \"fuzzy\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[crawler]\nmax-concurrent-pages = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
