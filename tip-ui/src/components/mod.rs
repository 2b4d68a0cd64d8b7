pub mod ad_banner;
pub mod tip_screen;

use gpui::{Div, ParentElement, Pixels, SharedString, Size, Styled, TextAlign, div, px};
use gpui_component::h_flex;

pub use ad_banner::AdBanner;
pub use tip_screen::TipScreen;

use crate::config::WindowConfig;

#[derive(Debug, Clone, Copy)]
pub struct WindowPreferences {
    pub size: Size<Pixels>,
}

impl Default for WindowPreferences {
    fn default() -> Self {
        Self::from(WindowConfig::default())
    }
}

impl From<WindowConfig> for WindowPreferences {
    fn from(config: WindowConfig) -> Self {
        Self::new(px(config.width), px(config.height))
    }
}

impl WindowPreferences {
    pub fn new(
        width: impl Into<Pixels>,
        height: impl Into<Pixels>,
    ) -> Self {
        Self {
            size: Size {
                width: width.into(),
                height: height.into(),
            },
        }
    }
}

/// Creates a row with a right-aligned label followed by the row's content.
pub fn make_labeled_row(label: impl Into<SharedString>) -> Div {
    h_flex()
        .items_center()
        .gap_5()
        .p(px(2.))
        .rounded_md()
        .border_1()
        .child(
            div()
                .min_w(px(120.))
                .text_align(TextAlign::Right)
                .child(label.into()),
        )
}
