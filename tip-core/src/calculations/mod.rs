//! Tip calculation.
//!
//! This module turns the raw text of the two inputs into a formatted tip,
//! substituting documented defaults wherever the text does not parse.

pub mod common;
pub mod tip;

pub use tip::{DEFAULT_TIP_PERCENTAGE, TipCalculator, compute_tip, parse_amount, parse_percentage};
