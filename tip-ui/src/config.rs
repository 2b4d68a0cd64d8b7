//! TOML configuration file.
//!
//! Every key is optional; missing keys take the defaults below and unknown
//! keys are rejected so typos surface at startup.
//!
//! ```toml
//! locale = "de-DE"
//!
//! [ads]
//! enabled = true
//! # Defaults to the ad network's public test banner. Production builds use
//! # "ca-app-pub-8163475936982739/1267348899".
//! placement_id = "ca-app-pub-8163475936982739/1267348899"
//!
//! [window]
//! width = 420.0
//! height = 640.0
//!
//! [logging]
//! level = "info"
//! file = "tip-time.log"
//! stdout = true
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tip_core::PlacementId;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Locale tag for currency formatting. Unset means "use the environment".
    pub locale: Option<String>,
    pub ads: AdsConfig,
    pub window: WindowConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdsConfig {
    pub enabled: bool,
    /// Blank identifiers are rejected while parsing.
    pub placement_id: PlacementId,
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            placement_id: PlacementId::test_banner(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 420.0,
            height: 640.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            stdout: true,
        }
    }
}

impl AppConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), ?config, "loaded config file");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tip_core::ads::TEST_BANNER_PLACEMENT;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.locale, None);
        assert!(config.ads.enabled);
        assert_eq!(config.ads.placement_id.as_str(), TEST_BANNER_PLACEMENT);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            locale = "fr-FR"

            [window]
            width = 500.0
            "#,
        )
        .unwrap();

        assert_eq!(config.locale.as_deref(), Some("fr-FR"));
        assert_eq!(config.window.width, 500.0);
        assert_eq!(config.window.height, 640.0);
        assert!(config.logging.stdout);
    }

    #[test]
    fn placement_id_is_read_from_ads_table() {
        let config = AppConfig::from_toml_str(
            "[ads]\nplacement_id = \"ca-app-pub-8163475936982739/1267348899\"",
        )
        .unwrap();

        assert_eq!(
            config.ads.placement_id.as_str(),
            "ca-app-pub-8163475936982739/1267348899"
        );
    }

    #[test]
    fn blank_placement_id_is_rejected() {
        let result = AppConfig::from_toml_str("[ads]\nplacement_id = \"  \"");

        assert!(result.is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = AppConfig::from_toml_str("currency = \"EUR\"");

        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_keys_are_rejected() {
        let result = AppConfig::from_toml_str("[ads]\nsize = \"banner\"");

        assert!(result.is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = AppConfig::load_from_file(Path::new("does/not/exist.toml")).unwrap_err();

        assert!(matches!(error, ConfigError::Read { .. }));
        assert!(error.to_string().contains("does/not/exist.toml"));
    }
}
