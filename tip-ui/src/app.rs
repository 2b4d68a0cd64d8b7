//! Startup wiring: merges config and command-line overrides into
//! [`AppSettings`] and builds the core objects the screen runs on.

use std::{fmt, path::PathBuf};

use tip_core::{
    AdError, AdRegion, CurrencyFormat, Locale, LoggingAdCollaborator, PlacementId, TipCalculator,
    TipScreenModel, currency::resolve_currency_format,
};

use crate::{
    config::{AppConfig, WindowConfig},
    logging::LoggingOptions,
};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub locale: Option<String>,
    pub placement: Option<String>,
    pub no_ads: bool,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub quiet: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub locale: Locale,
    pub currency: CurrencyFormat,
    /// `None` when ads are disabled.
    pub ad_placement: Option<PlacementId>,
    pub window: WindowConfig,
    pub logging: LoggingOptions,
}

impl AppSettings {
    /// Resolves settings against the process environment.
    pub fn resolve(
        config: AppConfig,
        overrides: Overrides,
    ) -> Result<Self, AdError> {
        Self::resolve_with_env(config, overrides, |var| std::env::var(var).ok())
    }

    /// Resolves settings, reading locale variables through `lookup_env`.
    pub fn resolve_with_env(
        config: AppConfig,
        overrides: Overrides,
        lookup_env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AdError> {
        let explicit_locale = overrides.locale.or(config.locale);
        let (locale, currency) = resolve_currency_format(explicit_locale.as_deref(), lookup_env);

        let ad_placement = if overrides.no_ads || !config.ads.enabled {
            None
        } else {
            let placement = match overrides.placement {
                Some(id) => PlacementId::new(id)?,
                None => config.ads.placement_id,
            };
            Some(placement)
        };

        let logging = LoggingOptions {
            level: overrides.log_level.unwrap_or(config.logging.level),
            file: overrides.log_file.or(config.logging.file),
            stdout: config.logging.stdout && !overrides.quiet,
        };

        Ok(Self {
            locale,
            currency,
            ad_placement,
            window: config.window,
            logging,
        })
    }

    /// Builds the screen model in its mount state.
    pub fn screen_model(&self) -> TipScreenModel {
        TipScreenModel::new(TipCalculator::new(self.currency.clone()))
    }

    /// Builds the screen's single ad region, if ads are enabled.
    pub fn ad_region(&self) -> Option<AdRegion> {
        self.ad_placement
            .clone()
            .map(|placement| AdRegion::new(placement, LoggingAdCollaborator))
    }
}

impl fmt::Display for AppSettings {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Locale:    {}", self.locale)?;
        match &self.ad_placement {
            Some(placement) => writeln!(f, "Ads:       {placement}")?,
            None => writeln!(f, "Ads:       disabled")?,
        }
        writeln!(
            f,
            "Window:    {}x{}",
            self.window.width, self.window.height
        )?;
        write!(f, "Log level: {}", self.logging.level)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tip_core::{CurrencyFormatter, ScreenEvent, ads::TEST_BANNER_PLACEMENT};

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_resolve_to_en_us_with_test_banner() {
        let settings =
            AppSettings::resolve_with_env(AppConfig::default(), Overrides::default(), no_env)
                .unwrap();

        assert_eq!(settings.locale, Locale::en_us());
        assert_eq!(
            settings.ad_placement.as_ref().map(PlacementId::as_str),
            Some(TEST_BANNER_PLACEMENT)
        );
        assert_eq!(settings.logging, LoggingOptions::default());
    }

    #[test]
    fn command_line_locale_beats_config_and_environment() {
        let config = AppConfig {
            locale: Some("fr-FR".to_string()),
            ..AppConfig::default()
        };
        let overrides = Overrides {
            locale: Some("de-DE".to_string()),
            ..Overrides::default()
        };

        let settings = AppSettings::resolve_with_env(config, overrides, |_| {
            Some("it_IT.UTF-8".to_string())
        })
        .unwrap();

        assert_eq!(settings.locale.to_string(), "de-DE");
        assert_eq!(settings.currency.format(dec!(1234.5)), "1.234,50\u{a0}€");
    }

    #[test]
    fn environment_locale_is_used_without_explicit_setting() {
        let settings =
            AppSettings::resolve_with_env(AppConfig::default(), Overrides::default(), |var| {
                (var == "LANG").then(|| "ja_JP.UTF-8".to_string())
            })
            .unwrap();

        assert_eq!(settings.locale.to_string(), "ja-JP");
    }

    #[test]
    fn no_ads_flag_disables_region() {
        let overrides = Overrides {
            no_ads: true,
            ..Overrides::default()
        };

        let settings =
            AppSettings::resolve_with_env(AppConfig::default(), overrides, no_env).unwrap();

        assert!(settings.ad_placement.is_none());
        assert!(settings.ad_region().is_none());
    }

    #[test]
    fn blank_placement_is_an_error() {
        let overrides = Overrides {
            placement: Some(" ".to_string()),
            ..Overrides::default()
        };

        let result = AppSettings::resolve_with_env(AppConfig::default(), overrides, no_env);

        assert_eq!(result.unwrap_err(), AdError::EmptyPlacement);
    }

    #[test]
    fn quiet_flag_and_log_overrides_apply() {
        let overrides = Overrides {
            log_level: Some("debug".to_string()),
            log_file: Some(PathBuf::from("tip.log")),
            quiet: true,
            ..Overrides::default()
        };

        let settings =
            AppSettings::resolve_with_env(AppConfig::default(), overrides, no_env).unwrap();

        assert_eq!(
            settings.logging,
            LoggingOptions {
                level: "debug".to_string(),
                file: Some(PathBuf::from("tip.log")),
                stdout: false,
            }
        );
    }

    #[test]
    fn screen_model_formats_with_resolved_currency() {
        let settings = AppSettings::resolve_with_env(
            AppConfig::default(),
            Overrides {
                locale: Some("en-GB".to_string()),
                ..Overrides::default()
            },
            no_env,
        )
        .unwrap();
        let mut model = settings.screen_model();

        let view = model.dispatch(ScreenEvent::AmountEdited("40".to_string()));

        assert_eq!(view.tip_text, "£6.00");
    }

    #[test]
    fn ad_region_starts_unrequested() {
        let settings =
            AppSettings::resolve_with_env(AppConfig::default(), Overrides::default(), no_env)
                .unwrap();

        let region = settings.ad_region().unwrap();

        assert!(!region.is_requested());
    }
}
