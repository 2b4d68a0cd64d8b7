//! Explicit state container for the tip screen.
//!
//! The host forwards each input event to [`TipScreenModel::dispatch`] and
//! renders the returned [`TipView`]. Every dispatch runs filter, store and
//! recompute to completion before returning.

use tracing::debug;

use crate::calculations::TipCalculator;
use crate::currency::{CurrencyFormat, CurrencyFormatter};
use crate::models::{PERCENT_MARKER, TipInputState};

/// Input events the host forwards from the screen's two text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// The bill amount field now holds this text.
    AmountEdited(String),
    /// The tip percentage field now holds this text (before filtering).
    PercentageEdited(String),
    /// The tip percentage field lost focus.
    PercentageBlurred,
}

/// Everything the host needs to render after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipView {
    pub amount_text: String,
    /// Stored percentage, as filtered.
    pub percentage_text: String,
    /// Percentage with the trailing marker guaranteed.
    pub percentage_display: String,
    pub tip_text: String,
}

/// Replacement text for the percentage field and where its caret goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentageRewrite {
    pub text: String,
    /// Byte offset into `text`, just before the trailing marker.
    pub caret: usize,
}

impl TipView {
    /// Decides whether the percentage field, currently showing `shown`, has to
    /// be rewritten to match this view.
    ///
    /// The field always shows [`TipView::percentage_display`]. Rejected
    /// characters disappear and a missing marker is appended; the caret is
    /// placed in front of that marker so typing continues before it.
    pub fn percentage_rewrite(
        &self,
        shown: &str,
    ) -> Option<PercentageRewrite> {
        if shown == self.percentage_display {
            return None;
        }

        let text = self.percentage_display.clone();
        let caret = text
            .strip_suffix(PERCENT_MARKER)
            .map_or(text.len(), str::len);
        Some(PercentageRewrite { text, caret })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TipScreenModel<F: CurrencyFormatter = CurrencyFormat> {
    input: TipInputState,
    calculator: TipCalculator<F>,
}

impl<F: CurrencyFormatter> TipScreenModel<F> {
    /// Creates the model in its mount state.
    pub fn new(calculator: TipCalculator<F>) -> Self {
        Self {
            input: TipInputState::new(),
            calculator,
        }
    }

    pub fn input(&self) -> &TipInputState {
        &self.input
    }

    /// Derives the current view without changing state.
    pub fn view(&self) -> TipView {
        let breakdown = self
            .calculator
            .breakdown(self.input.amount(), self.input.percentage());
        debug!(%breakdown, "recomputed tip");

        TipView {
            amount_text: self.input.amount().to_string(),
            percentage_text: self.input.percentage().to_string(),
            percentage_display: self.input.percentage_display(),
            tip_text: breakdown.formatted_tip,
        }
    }

    /// Applies one event and returns the recomputed view.
    pub fn dispatch(
        &mut self,
        event: ScreenEvent,
    ) -> TipView {
        match event {
            ScreenEvent::AmountEdited(text) => self.input.set_amount(text),
            ScreenEvent::PercentageEdited(text) => self.input.set_percentage(&text),
            ScreenEvent::PercentageBlurred => {
                if self.input.on_percentage_blur() {
                    debug!("restored default tip percentage");
                }
            }
        }

        self.view()
    }
}
