use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};

use super::format::{CurrencyFormat, SymbolPlacement};

/// Environment variables consulted for the active locale, highest priority first.
pub const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MONETARY", "LANG"];

/// Errors produced while parsing or resolving a locale tag.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    /// The tag does not look like `ll`, `ll-RR` or `ll_RR.encoding`.
    #[error("malformed locale tag '{0}'")]
    Malformed(String),

    /// The tag is well formed but has no currency conventions in the table.
    #[error("no currency format for locale '{0}'")]
    Unsupported(String),
}

/// A language/region pair such as `en-US`.
///
/// Parsing accepts BCP 47 style (`en-US`) and POSIX style
/// (`en_US.UTF-8@euro`) tags and normalizes case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    pub fn en_us() -> Self {
        Self {
            language: "en".to_string(),
            region: Some("US".to_string()),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Returns the region, or the region conventionally implied by the language.
    fn effective_region(&self) -> Option<&str> {
        self.region.as_deref().or(match self.language.as_str() {
            "en" => Some("US"),
            "de" => Some("DE"),
            "fr" => Some("FR"),
            "it" => Some("IT"),
            "nl" => Some("NL"),
            "pt" => Some("BR"),
            "ja" => Some("JP"),
            _ => None,
        })
    }

    /// Looks up the currency conventions for this locale.
    pub fn currency_format(&self) -> Result<CurrencyFormat, LocaleError> {
        use SymbolPlacement::*;

        let format = match (self.language.as_str(), self.effective_region()) {
            ("en", Some("US" | "CA" | "AU")) => CurrencyFormat::us_dollar(),
            ("en", Some("GB")) => CurrencyFormat::new("£", Prefix, '.', ",", 2),
            ("de", Some("DE")) => CurrencyFormat::new("€", SuffixSpaced, ',', ".", 2),
            ("de", Some("CH")) => CurrencyFormat::new("CHF", PrefixSpaced, '.', "’", 2),
            ("fr", Some("FR")) => CurrencyFormat::new("€", SuffixSpaced, ',', "\u{202f}", 2),
            ("it", Some("IT")) => CurrencyFormat::new("€", SuffixSpaced, ',', ".", 2),
            ("nl", Some("NL")) => CurrencyFormat::new("€", PrefixSpaced, ',', ".", 2),
            ("pt", Some("BR")) => CurrencyFormat::new("R$", PrefixSpaced, ',', ".", 2),
            ("ja", Some("JP")) => CurrencyFormat::new("￥", Prefix, '.', ",", 0),
            _ => return Err(LocaleError::Unsupported(self.to_string())),
        };

        Ok(format)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

impl fmt::Display for Locale {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || LocaleError::Malformed(s.to_string());

        // Drop POSIX encoding and modifier suffixes: `de_DE.UTF-8@euro`.
        let tag = s.trim();
        let tag = tag.split(['.', '@']).next().unwrap_or_default();

        let mut parts = tag.split(['-', '_']);
        let language = parts.next().unwrap_or_default();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(malformed());
        }

        let region = match parts.next() {
            None => None,
            Some(region) if is_region(region) => Some(region.to_ascii_uppercase()),
            Some(_) => return Err(malformed()),
        };

        Ok(Self {
            language: language.to_ascii_lowercase(),
            region,
        })
    }
}

fn is_region(part: &str) -> bool {
    (part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
        || (part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()))
}

/// Picks the locale and currency conventions to use.
///
/// The first non-empty candidate wins: `explicit`, then each of
/// [`LOCALE_ENV_VARS`] as returned by `lookup_env`. A candidate that cannot be
/// parsed or has no table entry falls back to `en-US` with a warning; so does
/// the absence of any candidate.
pub fn resolve_currency_format(
    explicit: Option<&str>,
    lookup_env: impl Fn(&str) -> Option<String>,
) -> (Locale, CurrencyFormat) {
    let candidate = explicit
        .map(str::to_string)
        .into_iter()
        .chain(LOCALE_ENV_VARS.iter().filter_map(|var| lookup_env(var)))
        .find(|value| !value.trim().is_empty());

    let Some(candidate) = candidate else {
        debug!("no locale configured, using en-US");
        return (Locale::en_us(), CurrencyFormat::us_dollar());
    };

    match candidate
        .parse::<Locale>()
        .and_then(|locale| locale.currency_format().map(|format| (locale, format)))
    {
        Ok((locale, format)) => {
            debug!(%locale, "resolved currency locale");
            (locale, format)
        }
        Err(error) => {
            warn!(%error, "falling back to en-US currency format");
            (Locale::en_us(), CurrencyFormat::us_dollar())
        }
    }
}

/// [`resolve_currency_format`] against the process environment.
pub fn resolve_from_environment(explicit: Option<&str>) -> (Locale, CurrencyFormat) {
    resolve_currency_format(explicit, |var| std::env::var(var).ok())
}
