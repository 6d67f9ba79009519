//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `COFFEEHUB_STORAGE_PATH` - Local storage file (default: coffeehub-storage.json)
//! - `COFFEEHUB_VIEWPORT_WIDTH` - Horizontal distance a floating image travels, in px (default: 1280)
//! - `COFFEEHUB_ANIMATION_TRANSITION_MS` - Delay before the fly-to-cart transition starts (default: 10)
//! - `COFFEEHUB_ANIMATION_REMOVE_MS` - Delay before a floating image is removed (default: 700)
//! - `COFFEEHUB_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_STORAGE_PATH: &str = "coffeehub-storage.json";
const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
const DEFAULT_TRANSITION_MS: u64 = 10;
const DEFAULT_REMOVE_MS: u64 = 700;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Timing and geometry of the fly-to-cart animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    /// How far right the floating image travels.
    pub viewport_width: u32,
    /// Delay before the transform/opacity transition is applied.
    pub transition_delay: Duration,
    /// Delay before the floating image is removed, measured from spawn.
    pub removal_delay: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            transition_delay: Duration::from_millis(DEFAULT_TRANSITION_MS),
            removal_delay: Duration::from_millis(DEFAULT_REMOVE_MS),
        }
    }
}

/// Widget configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// File backing the local storage.
    pub storage_path: PathBuf,
    /// Fly-to-cart animation settings.
    pub animation: AnimationConfig,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            animation: AnimationConfig::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl WidgetConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_path = lookup("COFFEEHUB_STORAGE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);
        let viewport_width =
            parse_or_default(&lookup, "COFFEEHUB_VIEWPORT_WIDTH", DEFAULT_VIEWPORT_WIDTH)?;
        let transition_ms =
            parse_or_default(&lookup, "COFFEEHUB_ANIMATION_TRANSITION_MS", DEFAULT_TRANSITION_MS)?;
        let remove_ms =
            parse_or_default(&lookup, "COFFEEHUB_ANIMATION_REMOVE_MS", DEFAULT_REMOVE_MS)?;
        let log_format = parse_or_default(&lookup, "COFFEEHUB_LOG_FORMAT", LogFormat::Pretty)?;

        Ok(Self {
            storage_path,
            animation: AnimationConfig {
                viewport_width,
                transition_delay: Duration::from_millis(transition_ms),
                removal_delay: Duration::from_millis(remove_ms),
            },
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if present, otherwise use the default.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = WidgetConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.storage_path, PathBuf::from("coffeehub-storage.json"));
        assert_eq!(config.animation, AnimationConfig::default());
        assert_eq!(config.animation.removal_delay, Duration::from_millis(700));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = WidgetConfig::from_lookup(lookup_from(&[
            ("COFFEEHUB_STORAGE_PATH", "/tmp/hub.json"),
            ("COFFEEHUB_VIEWPORT_WIDTH", "800"),
            ("COFFEEHUB_ANIMATION_TRANSITION_MS", "5"),
            ("COFFEEHUB_ANIMATION_REMOVE_MS", " 300 "),
            ("COFFEEHUB_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.storage_path, PathBuf::from("/tmp/hub.json"));
        assert_eq!(config.animation.viewport_width, 800);
        assert_eq!(config.animation.transition_delay, Duration::from_millis(5));
        assert_eq!(config.animation.removal_delay, Duration::from_millis(300));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = WidgetConfig::from_lookup(lookup_from(&[(
            "COFFEEHUB_ANIMATION_REMOVE_MS",
            "soon",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "COFFEEHUB_ANIMATION_REMOVE_MS"));
    }

    #[test]
    fn test_invalid_log_format_is_rejected() {
        let result = WidgetConfig::from_lookup(lookup_from(&[("COFFEEHUB_LOG_FORMAT", "xml")]));
        assert!(result.is_err());
    }
}
