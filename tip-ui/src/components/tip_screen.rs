use gpui::{
    AppContext, Context, Entity, IntoElement, ParentElement, Render, SharedString, Styled,
    Subscription, Window, div,
};
use gpui_component::{
    input::{Input, InputEvent, InputState, Position},
    v_flex,
};
use tip_core::{PercentageRewrite, ScreenEvent, TipScreenModel, TipView};
use tracing::debug;

use super::{AdBanner, make_labeled_row};

/// The tip calculator screen.
///
/// Input widgets report edits and blur here; each one is forwarded to the
/// [`TipScreenModel`] and the returned [`TipView`] is what gets rendered.
pub struct TipScreen {
    model: TipScreenModel,
    view: TipView,
    amount_input: Entity<InputState>,
    percentage_input: Entity<InputState>,
    ad_banner: Option<Entity<AdBanner>>,
    /// Text last written into the percentage field by this screen.
    written_percentage: Option<String>,
    _subscriptions: Vec<Subscription>,
}

impl TipScreen {
    pub fn new(
        model: TipScreenModel,
        ad_banner: Option<AdBanner>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let view = model.view();

        let amount_input = make_input_state("Bill Amount", &view.amount_text, window, cx);
        let percentage_input =
            make_input_state("Tip Percentage", &view.percentage_display, window, cx);

        let subscriptions = vec![
            cx.subscribe_in(&amount_input, window, Self::on_amount_event),
            cx.subscribe_in(&percentage_input, window, Self::on_percentage_event),
        ];

        let ad_banner = ad_banner.map(|banner| cx.new(|_| banner));

        Self {
            model,
            view,
            amount_input,
            percentage_input,
            ad_banner,
            written_percentage: None,
            _subscriptions: subscriptions,
        }
    }

    fn apply(
        &mut self,
        event: ScreenEvent,
        cx: &mut Context<Self>,
    ) {
        self.view = self.model.dispatch(event);
        cx.notify();
    }

    fn on_amount_event(
        &mut self,
        state: &Entity<InputState>,
        event: &InputEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if let InputEvent::Change { .. } = event {
            let text = state.read(cx).value().to_string();
            self.apply(ScreenEvent::AmountEdited(text), cx);
        }
    }

    fn on_percentage_event(
        &mut self,
        state: &Entity<InputState>,
        event: &InputEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let event = match event {
            InputEvent::Change { .. } => {
                let shown = state.read(cx).value().to_string();
                // Our own rewrite echoing back is not a user edit.
                if self.written_percentage.take().as_deref() == Some(shown.as_str()) {
                    return;
                }
                ScreenEvent::PercentageEdited(shown)
            }
            InputEvent::Blur { .. } => ScreenEvent::PercentageBlurred,
            _ => return,
        };

        self.apply(event, cx);

        let shown = state.read(cx).value().to_string();
        if let Some(rewrite) = self.view.percentage_rewrite(&shown) {
            debug!(%shown, shown_after = %rewrite.text, "rewriting tip percentage input");
            self.written_percentage = Some(rewrite.text.clone());
            write_percentage(state, rewrite, window, cx);
        }
    }
}

impl Render for TipScreen {
    fn render(
        &mut self,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> impl IntoElement {
        v_flex()
            .size_full()
            .p_5()
            .gap_4()
            .child(div().text_lg().child("Calculate Tip"))
            .child(make_labeled_row("Bill Amount").child(Input::new(&self.amount_input).flex_grow()))
            .child(
                make_labeled_row("Tip Percentage")
                    .child(Input::new(&self.percentage_input).flex_grow()),
            )
            .child(
                div()
                    .text_2xl()
                    .child(SharedString::from(format!("Tip Amount: {}", self.view.tip_text))),
            )
            .children(self.ad_banner.clone())
    }
}

fn make_input_state(
    placeholder: &'static str,
    initial: &str,
    window: &mut Window,
    cx: &mut Context<TipScreen>,
) -> Entity<InputState> {
    let initial = SharedString::from(initial.to_string());

    cx.new(|input_cx| {
        let mut state = InputState::new(window, input_cx).placeholder(placeholder);
        state.set_value(initial, window, input_cx);
        state
    })
}

fn write_percentage(
    state: &Entity<InputState>,
    rewrite: PercentageRewrite,
    window: &mut Window,
    cx: &mut Context<TipScreen>,
) {
    let caret = Position::new(0, rewrite.caret as u32);

    state.update(cx, |input, input_cx| {
        input.set_value(rewrite.text, window, input_cx);
        input.set_cursor_position(caret, window, input_cx);
    });
}
