use std::fmt;

use rust_decimal::Decimal;

/// Intermediate values of one tip derivation.
///
/// `amount` and `percentage` are the values actually used after defaults and
/// clamping were applied; `tip` is unrounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipBreakdown {
    pub amount: Decimal,
    pub percentage: Decimal,
    pub tip: Decimal,
    pub formatted_tip: String,
}

impl fmt::Display for TipBreakdown {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}% of {} = {} ({})",
            self.percentage, self.amount, self.tip, self.formatted_tip
        )
    }
}
