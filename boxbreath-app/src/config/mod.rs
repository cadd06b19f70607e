//! Configuration loading and parsing
//!
//! The default document is embedded at build time. Hosts with their own
//! settings store pass that text to [`parse_config`] instead.

pub mod toml;

pub use self::toml::{parse_config, AppConfig, ParseError, DEFAULT_CACHE_VERSION};

/// Default configuration document
pub const EMBEDDED_CONFIG: &str = include_str!("../../breathing.toml");

/// Load the embedded defaults
pub fn load_default() -> Result<AppConfig, ParseError> {
    let config = parse_config(EMBEDDED_CONFIG)?;
    info!(
        "Loaded configuration: {}s phases, {} presets, cache {}",
        config.breathing.phase_duration_s,
        config.breathing.presets.len(),
        config.cache_version.as_str()
    );
    Ok(config)
}
