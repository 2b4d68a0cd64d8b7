mod input_state;
mod tip_breakdown;

pub use input_state::{DEFAULT_PERCENTAGE_TEXT, PERCENT_MARKER, TipInputState, filter_percentage};
pub use tip_breakdown::TipBreakdown;
