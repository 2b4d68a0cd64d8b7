use rust_decimal::Decimal;
use thousands::{Separable, SeparatorPolicy};

use crate::calculations::common::round_half_even;

/// Non-breaking space used between a symbol and the number.
const NBSP: char = '\u{a0}';

/// Strategy that renders a monetary value as display text.
///
/// The tip calculator is generic over this trait so hosts can plug in a
/// platform formatter instead of the built-in locale table.
pub trait CurrencyFormatter {
    fn format(
        &self,
        value: Decimal,
    ) -> String;
}

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPlacement {
    /// `$1.00`
    Prefix,
    /// `CHF 1.00`
    PrefixSpaced,
    /// `1.00$`
    Suffix,
    /// `1,00 €`
    SuffixSpaced,
}

/// Currency display conventions for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub placement: SymbolPlacement,
    pub decimal_separator: char,
    /// Inserted between groups of three integer digits.
    pub grouping_separator: &'static str,
    /// Number of minor-unit digits shown (2 for cents, 0 for yen).
    pub fraction_digits: u32,
}

impl CurrencyFormat {
    pub fn new(
        symbol: impl Into<String>,
        placement: SymbolPlacement,
        decimal_separator: char,
        grouping_separator: &'static str,
        fraction_digits: u32,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            placement,
            decimal_separator,
            grouping_separator,
            fraction_digits,
        }
    }

    /// US dollar conventions, the fallback when no locale can be resolved.
    pub fn us_dollar() -> Self {
        Self::new("$", SymbolPlacement::Prefix, '.', ",", 2)
    }

    fn with_symbol(
        &self,
        number: &str,
    ) -> String {
        match self.placement {
            SymbolPlacement::Prefix => format!("{}{number}", self.symbol),
            SymbolPlacement::PrefixSpaced => format!("{}{NBSP}{number}", self.symbol),
            SymbolPlacement::Suffix => format!("{number}{}", self.symbol),
            SymbolPlacement::SuffixSpaced => format!("{number}{NBSP}{}", self.symbol),
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::us_dollar()
    }
}

impl CurrencyFormatter for CurrencyFormat {
    fn format(
        &self,
        value: Decimal,
    ) -> String {
        let mut rounded = round_half_even(value, self.fraction_digits);
        // Values near the 28-digit limit keep a smaller scale than requested.
        rounded.rescale(self.fraction_digits);

        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = rounded.abs().to_string();
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

        let mut number = group_thousands(integer, self.grouping_separator);
        if self.fraction_digits > 0 {
            number.push(self.decimal_separator);
            number.push_str(&pad_fraction(fraction, self.fraction_digits));
        }

        let body = self.with_symbol(&number);
        if negative { format!("-{body}") } else { body }
    }
}

impl<F: CurrencyFormatter + ?Sized> CurrencyFormatter for &F {
    fn format(
        &self,
        value: Decimal,
    ) -> String {
        (**self).format(value)
    }
}

impl<F: CurrencyFormatter + ?Sized> CurrencyFormatter for Box<F> {
    fn format(
        &self,
        value: Decimal,
    ) -> String {
        (**self).format(value)
    }
}

/// Inserts `separator` between groups of three ASCII digits.
fn group_thousands(
    integer: &str,
    separator: &'static str,
) -> String {
    let policy = SeparatorPolicy {
        separator,
        groups: &[3],
        digits: thousands::digits::ASCII_DECIMAL,
    };

    integer.separate_by_policy(policy)
}

/// Right-pads `fraction` with zeros to exactly `width` digits.
fn pad_fraction(
    fraction: &str,
    width: u32,
) -> String {
    format!("{fraction:0<width$}", width = width as usize)
}
