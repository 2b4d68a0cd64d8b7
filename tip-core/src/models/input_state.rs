use tracing::debug;

/// Marker that terminates a tip percentage, e.g. the `%` in `"15%"`.
pub const PERCENT_MARKER: char = '%';

/// Value the tip percentage field starts with and falls back to.
pub const DEFAULT_PERCENTAGE_TEXT: &str = "15%";

/// Raw text of the two inputs on the tip screen.
///
/// The bill amount is stored verbatim. The tip percentage only ever holds
/// ASCII digits and [`PERCENT_MARKER`]; everything else is dropped on entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipInputState {
    amount: String,
    percentage: String,
}

impl TipInputState {
    /// State at screen mount: empty amount, `"15%"` percentage.
    pub fn new() -> Self {
        Self {
            amount: String::new(),
            percentage: DEFAULT_PERCENTAGE_TEXT.to_string(),
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Stored percentage text, exactly as filtered.
    pub fn percentage(&self) -> &str {
        &self.percentage
    }

    /// Percentage text as shown to the user, always ending in the marker.
    pub fn percentage_display(&self) -> String {
        if self.percentage.ends_with(PERCENT_MARKER) {
            self.percentage.clone()
        } else {
            format!("{}{PERCENT_MARKER}", self.percentage)
        }
    }

    /// Replaces the bill amount. Any text is accepted.
    pub fn set_amount(
        &mut self,
        text: impl Into<String>,
    ) {
        self.amount = text.into();
    }

    /// Replaces the tip percentage with the digits and markers of `text`.
    pub fn set_percentage(
        &mut self,
        text: &str,
    ) {
        let filtered = filter_percentage(text);
        if filtered.len() != text.len() {
            debug!(input = %text, kept = %filtered, "dropped characters from tip percentage");
        }
        self.percentage = filtered;
    }

    /// Handles the percentage field losing focus.
    ///
    /// Restores [`DEFAULT_PERCENTAGE_TEXT`] when the field was left empty and
    /// returns whether it did.
    pub fn on_percentage_blur(&mut self) -> bool {
        if self.percentage.is_empty() {
            self.percentage = DEFAULT_PERCENTAGE_TEXT.to_string();
            true
        } else {
            false
        }
    }
}

impl Default for TipInputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the ASCII digits and percent markers of `text`, in order.
pub fn filter_percentage(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == PERCENT_MARKER)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_state_has_mount_defaults() {
        let state = TipInputState::new();

        assert_eq!(state.amount(), "");
        assert_eq!(state.percentage(), "15%");
        assert_eq!(state, TipInputState::default());
    }

    // =========================================================================
    // amount field
    // =========================================================================

    #[test]
    fn set_amount_stores_text_verbatim() {
        let mut state = TipInputState::new();

        state.set_amount("12,5 abc");

        assert_eq!(state.amount(), "12,5 abc");
    }

    #[test]
    fn set_amount_replaces_previous_value() {
        let mut state = TipInputState::new();

        state.set_amount("10");
        state.set_amount("");

        assert_eq!(state.amount(), "");
    }

    // =========================================================================
    // percentage field
    // =========================================================================

    #[test]
    fn filter_keeps_digits_and_markers_in_order() {
        assert_eq!(filter_percentage("1a2%b3"), "12%3");
        assert_eq!(filter_percentage("%%5"), "%%5");
    }

    #[test]
    fn filter_drops_everything_else() {
        assert_eq!(filter_percentage("abc"), "");
        assert_eq!(filter_percentage("-1.5 %"), "15%");
    }

    #[test]
    fn filter_drops_non_ascii_digits() {
        assert_eq!(filter_percentage("١٢3%"), "3%");
    }

    #[test]
    fn filter_table() {
        let cases = [
            ("", ""),
            ("15%", "15%"),
            ("%", "%"),
            ("007", "007"),
            ("12.5%", "125%"),
            ("+20", "20"),
            ("1e2", "12"),
            ("1_000", "1000"),
            ("1,000%", "1000%"),
            ("  18 % ", "18%"),
            ("\t9\n", "9"),
            ("%1%2%", "%1%2%"),
            ("٣٤%", "%"),
            ("１２", ""),
            ("½", ""),
            ("²5", "5"),
            ("20％", "20"),
            ("emoji😀7", "7"),
            ("NaN", ""),
            ("-∞", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(filter_percentage(input), expected, "input {input:?}");
        }
    }

    /// Every string of up to three characters over a mixed alphabet.
    fn short_strings() -> Vec<String> {
        const ALPHABET: [char; 10] = ['0', '7', '%', 'a', ' ', '.', '-', '٣', 'é', '\t'];

        let mut all = vec![String::new()];
        let mut previous = vec![String::new()];
        for _ in 0..3 {
            let next: Vec<String> = previous
                .iter()
                .flat_map(|prefix| ALPHABET.iter().map(move |c| format!("{prefix}{c}")))
                .collect();
            all.extend(next.iter().cloned());
            previous = next;
        }
        all
    }

    #[test]
    fn filter_keeps_exactly_the_accepted_characters_of_any_input() {
        for input in short_strings() {
            let filtered = filter_percentage(&input);

            assert!(
                filtered.chars().all(|c| c.is_ascii_digit() || c == '%'),
                "input {input:?} kept {filtered:?}"
            );

            let accepted: Vec<char> = input
                .chars()
                .filter(|c| matches!(c, '0'..='9' | '%'))
                .collect();
            assert_eq!(filtered.chars().collect::<Vec<_>>(), accepted, "input {input:?}");
        }
    }

    #[test]
    fn filter_is_idempotent_for_any_input() {
        for input in short_strings() {
            let once = filter_percentage(&input);

            assert_eq!(filter_percentage(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn set_percentage_filters_before_storing() {
        let mut state = TipInputState::new();

        state.set_percentage("1a2%b3");

        assert_eq!(state.percentage(), "12%3");
    }

    #[test]
    fn set_percentage_with_only_rejected_characters_empties_the_field() {
        let mut state = TipInputState::new();

        state.set_percentage("xyz");

        assert_eq!(state.percentage(), "");
    }

    #[test]
    fn display_appends_marker_when_missing() {
        let mut state = TipInputState::new();

        state.set_percentage("20");
        assert_eq!(state.percentage_display(), "20%");

        state.set_percentage("20%");
        assert_eq!(state.percentage_display(), "20%");
    }

    // =========================================================================
    // blur handling
    // =========================================================================

    #[test]
    fn blur_on_empty_field_restores_default() {
        let mut state = TipInputState::new();
        state.set_percentage("");

        let restored = state.on_percentage_blur();

        assert!(restored);
        assert_eq!(state.percentage(), "15%");
    }

    #[test]
    fn blur_on_filled_field_keeps_value() {
        let mut state = TipInputState::new();
        state.set_percentage("18");

        let restored = state.on_percentage_blur();

        assert!(!restored);
        assert_eq!(state.percentage(), "18");
    }

    #[test]
    fn blur_does_not_touch_amount() {
        let mut state = TipInputState::new();
        state.set_percentage("");

        state.on_percentage_blur();

        assert_eq!(state.amount(), "");
    }
}
