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
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use policy_crawler::config::load_config;
///
/// let config = load_config(Path::new("crawler.toml")).unwrap();
/// println!("Max items: {}", config.crawler.max_items);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Loads the list of listing page URLs from a text file
///
/// A missing or unreadable file, or a file without a single usable line, is a
/// pre-flight failure: no crawl should be attempted.
///
/// # Arguments
///
/// * `path` - Path to the site list (one URL per line)
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Listing URLs in file order
/// * `Err(ConfigError)` - The file is missing, unreadable, or empty
pub fn load_site_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        tracing::debug!(error = %e, "Failed to read site list");
        ConfigError::MissingSiteList {
            path: path.display().to_string(),
        }
    })?;

    let sites = parse_site_list(&content);
    if sites.is_empty() {
        return Err(ConfigError::EmptySiteList {
            path: path.display().to_string(),
        });
    }

    tracing::info!(count = sites.len(), path = %path.display(), "Loaded site list");
    Ok(sites)
}

/// Parses site list content: trims each line, drops blanks and `#` comments
pub fn parse_site_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
