//! Tip derivation from the two screen inputs.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Parse the bill amount; unparsable text means 0 |
//! | 2    | Strip one trailing `%` from the percentage and parse; unparsable text means 15 |
//! | 3    | Clamp negative amounts and percentages to 0 |
//! | 4    | Tip = percentage / 100 × amount |
//! | 5    | Format the tip with the active [`CurrencyFormatter`] |
//!
//! Every step is total: no input text produces an error.
//!
//! # Example
//!
//! ```
//! use tip_core::calculations::TipCalculator;
//! use tip_core::currency::CurrencyFormat;
//!
//! let calculator = TipCalculator::new(CurrencyFormat::us_dollar());
//!
//! assert_eq!(calculator.calculate_tip("100", "10%"), "$10.00");
//! assert_eq!(calculator.calculate_tip("50", ""), "$7.50");
//! assert_eq!(calculator.calculate_tip("", "15%"), "$0.00");
//! ```

use rust_decimal::Decimal;
use tracing::{trace, warn};

use crate::calculations::common::{non_negative, parse_lenient};
use crate::currency::{CurrencyFormat, CurrencyFormatter};
use crate::models::{PERCENT_MARKER, TipBreakdown};

/// Tip rate used when the percentage text does not parse.
pub const DEFAULT_TIP_PERCENTAGE: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// Parses the bill amount, substituting zero for unparsable text.
///
/// Negative amounts are clamped to zero.
pub fn parse_amount(text: &str) -> Decimal {
    match parse_lenient(text) {
        Some(amount) => non_negative(amount),
        None => {
            trace!(input = %text, "amount did not parse, using 0");
            Decimal::ZERO
        }
    }
}

/// Parses the tip percentage, substituting [`DEFAULT_TIP_PERCENTAGE`] for
/// unparsable text.
///
/// A single trailing [`PERCENT_MARKER`] is removed first. Negative rates are
/// clamped to zero.
pub fn parse_percentage(text: &str) -> Decimal {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix(PERCENT_MARKER).unwrap_or(trimmed);

    match parse_lenient(number) {
        Some(percentage) => non_negative(percentage),
        None => {
            trace!(input = %text, "percentage did not parse, using default");
            DEFAULT_TIP_PERCENTAGE
        }
    }
}

/// Computes `percentage / 100 * amount`.
///
/// Overflow saturates to [`Decimal::MAX`].
pub fn compute_tip(
    amount: Decimal,
    percentage: Decimal,
) -> Decimal {
    percentage
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|rate| rate.checked_mul(amount))
        .unwrap_or_else(|| {
            warn!(%amount, %percentage, "tip overflowed, saturating");
            Decimal::MAX
        })
}

/// Stateless calculator that renders tips through a [`CurrencyFormatter`].
#[derive(Debug, Clone, Default)]
pub struct TipCalculator<F: CurrencyFormatter = CurrencyFormat> {
    formatter: F,
}

impl<F: CurrencyFormatter> TipCalculator<F> {
    pub fn new(formatter: F) -> Self {
        Self { formatter }
    }

    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Runs every step of the derivation and returns the intermediate values.
    pub fn breakdown(
        &self,
        amount_text: &str,
        percentage_text: &str,
    ) -> TipBreakdown {
        let amount = parse_amount(amount_text);
        let percentage = parse_percentage(percentage_text);
        let tip = compute_tip(amount, percentage);

        TipBreakdown {
            amount,
            percentage,
            tip,
            formatted_tip: self.formatter.format(tip),
        }
    }

    /// Returns the formatted tip for the given input text.
    pub fn calculate_tip(
        &self,
        amount_text: &str,
        percentage_text: &str,
    ) -> String {
        self.breakdown(amount_text, percentage_text).formatted_tip
    }
}
