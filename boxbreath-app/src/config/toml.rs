//! TOML configuration parser
//!
//! Document layout:
//!
//! ```toml
//! [breathing]
//! phase_duration_s = 4
//! max_phase_duration_s = 10
//! transition_delay_ms = 500
//!
//! [[preset]]
//! label = "1 min"
//! limit_s = 60
//!
//! [cache]
//! version = "v1"
//! shell = ["/", "/index.html"]
//! fallback = "/index.html"
//! ```
//!
//! Every table is optional; missing values take the built-in defaults.

use serde::Deserialize;

use boxbreath_cache::{CacheVersion, Manifest, ManifestError};
use boxbreath_core::config::{
    BreathingConfig, ConfigError, Preset, DEFAULT_MAX_PHASE_DURATION_S, DEFAULT_PHASE_DURATION_S,
    DEFAULT_TRANSITION_DELAY_MS,
};

/// Cache version used when the document names none
pub const DEFAULT_CACHE_VERSION: &str = "v1";

/// Parse error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not valid TOML, or a value of the wrong type
    Syntax(String),
    /// Breathing settings rejected
    Config(ConfigError),
    /// Cache settings rejected
    Manifest(ManifestError),
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::Syntax(msg) => write!(f, "invalid configuration: {}", msg),
            ParseError::Config(e) => write!(f, "invalid breathing settings: {}", e),
            ParseError::Manifest(e) => write!(f, "invalid cache settings: {}", e),
        }
    }
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Config(e)
    }
}

impl From<ManifestError> for ParseError {
    fn from(e: ManifestError) -> Self {
        ParseError::Manifest(e)
    }
}

/// Complete app configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub breathing: BreathingConfig,
    pub cache_version: CacheVersion,
    pub manifest: Manifest,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    #[serde(default)]
    breathing: BreathingSection,
    #[serde(default, rename = "preset")]
    presets: Option<Vec<PresetSection>>,
    #[serde(default)]
    cache: CacheSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct BreathingSection {
    phase_duration_s: u16,
    max_phase_duration_s: u16,
    transition_delay_ms: u32,
}

impl Default for BreathingSection {
    fn default() -> Self {
        Self {
            phase_duration_s: DEFAULT_PHASE_DURATION_S,
            max_phase_duration_s: DEFAULT_MAX_PHASE_DURATION_S,
            transition_delay_ms: DEFAULT_TRANSITION_DELAY_MS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresetSection {
    label: String,
    limit_s: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CacheSection {
    version: Option<String>,
    shell: Option<Vec<String>>,
    fallback: Option<String>,
}

/// Parse and validate a configuration document
pub fn parse_config(input: &str) -> Result<AppConfig, ParseError> {
    let doc: Document = toml::from_str(input).map_err(|e| ParseError::Syntax(e.message().into()))?;

    let breathing = build_breathing(doc.breathing, doc.presets)?;
    breathing.validate()?;

    let cache_version = CacheVersion::new(doc.cache.version.as_deref().unwrap_or(DEFAULT_CACHE_VERSION))?;
    let manifest = match (doc.cache.shell, doc.cache.fallback) {
        (None, None) => Manifest::default(),
        (shell, fallback) => {
            let defaults = Manifest::default();
            let shell = shell.unwrap_or_else(|| defaults.shell().to_vec());
            let fallback = fallback.unwrap_or_else(|| defaults.fallback().into());
            Manifest::new(shell, &fallback)?
        }
    };

    Ok(AppConfig {
        breathing,
        cache_version,
        manifest,
    })
}

fn build_breathing(
    section: BreathingSection,
    presets: Option<Vec<PresetSection>>,
) -> Result<BreathingConfig, ConfigError> {
    let mut config = BreathingConfig {
        phase_duration_s: section.phase_duration_s,
        max_phase_duration_s: section.max_phase_duration_s,
        transition_delay_ms: section.transition_delay_ms,
        ..BreathingConfig::default()
    };

    if let Some(presets) = presets {
        config.presets.clear();
        for preset in presets {
            config
                .presets
                .push(Preset::new(&preset.label, preset.limit_s)?)
                .map_err(|_| ConfigError::TooManyPresets)?;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.breathing, BreathingConfig::default());
        assert_eq!(config.cache_version.bucket_name(), "box-breathing-cache-v1");
        assert_eq!(config.manifest, Manifest::default());
    }

    #[test]
    fn test_custom_values() {
        let config = parse_config(
            r#"
            [breathing]
            phase_duration_s = 6
            max_phase_duration_s = 12

            [[preset]]
            label = "2 min"
            limit_s = 120

            [cache]
            version = "2025-04-07"
            "#,
        )
        .unwrap();

        assert_eq!(config.breathing.phase_duration_s, 6);
        assert_eq!(config.breathing.max_phase_duration_s, 12);
        assert_eq!(config.breathing.transition_delay_ms, 500);
        assert_eq!(config.breathing.presets.len(), 1);
        assert_eq!(config.breathing.presets[0].label.as_str(), "2 min");
        assert_eq!(config.breathing.preset_limit(0), Some(120));
        assert_eq!(config.cache_version.as_str(), "2025-04-07");
    }

    #[test]
    fn test_custom_shell() {
        let config = parse_config(
            r#"
            [cache]
            shell = ["/", "/index.html", "/style.css"]
            "#,
        )
        .unwrap();
        assert!(config.manifest.contains("/style.css"));
        assert_eq!(config.manifest.fallback(), "/index.html");
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            parse_config("[breathing]\nphase_duration_s = 0"),
            Err(ParseError::Config(ConfigError::PhaseDurationOutOfRange))
        );
        assert_eq!(
            parse_config("[breathing]\nmax_phase_duration_s = 0"),
            Err(ParseError::Config(ConfigError::MaxPhaseDurationZero))
        );
        assert_eq!(
            parse_config("preset = []"),
            Err(ParseError::Config(ConfigError::NoPresets))
        );
        assert_eq!(
            parse_config("[[preset]]\nlabel = \"never\"\nlimit_s = 0"),
            Err(ParseError::Config(ConfigError::PresetLimitZero))
        );
        assert_eq!(
            parse_config("[[preset]]\nlabel = \"a label that is far too long\"\nlimit_s = 60"),
            Err(ParseError::Config(ConfigError::LabelTooLong))
        );
        assert_eq!(
            parse_config("[cache]\nversion = \"\""),
            Err(ParseError::Manifest(ManifestError::EmptyVersion))
        );
        assert_eq!(
            parse_config("[cache]\nshell = [\"/\"]\nfallback = \"/offline.html\""),
            Err(ParseError::Manifest(ManifestError::FallbackNotInShell))
        );
    }

    #[test]
    fn test_too_many_presets() {
        let mut doc = String::new();
        for i in 0..7 {
            doc.push_str(&format!("[[preset]]\nlabel = \"p{}\"\nlimit_s = 60\n", i));
        }
        assert_eq!(
            parse_config(&doc),
            Err(ParseError::Config(ConfigError::TooManyPresets))
        );
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(parse_config("[breathing"), Err(ParseError::Syntax(_))));
        assert!(matches!(
            parse_config("[breathing]\nphase_duration_s = \"four\""),
            Err(ParseError::Syntax(_))
        ));
        assert!(matches!(
            parse_config("[breathing]\nspeed = 3"),
            Err(ParseError::Syntax(_))
        ));
    }
}
