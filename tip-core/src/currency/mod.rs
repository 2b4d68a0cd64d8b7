//! Locale-aware currency formatting.
//!
//! [`CurrencyFormatter`] is the pluggable strategy the tip calculator renders
//! through. [`CurrencyFormat`] is the built-in implementation, and
//! [`Locale`] maps language/region tags onto it.

mod format;
mod locale;

pub use format::{CurrencyFormat, CurrencyFormatter, SymbolPlacement};
pub use locale::{
    LOCALE_ENV_VARS, Locale, LocaleError, resolve_currency_format, resolve_from_environment,
};
