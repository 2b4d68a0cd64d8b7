use gpui::{Context, IntoElement, ParentElement, Render, SharedString, Styled, Window, px};
use gpui_component::h_flex;
use tip_core::{AdCollaborator, AdRegion, LoggingAdCollaborator};

/// Height of a standard banner slot.
const BANNER_HEIGHT: f32 = 50.0;

/// The screen's only ad region.
///
/// The placement is requested once, when the banner is created. Rendering
/// just reserves the slot; the collaborator owns whatever is drawn into it.
pub struct AdBanner<C: AdCollaborator = LoggingAdCollaborator> {
    region: AdRegion<C>,
}

impl<C: AdCollaborator> AdBanner<C> {
    pub fn new(mut region: AdRegion<C>) -> Self {
        region.request();
        Self { region }
    }

    pub fn region(&self) -> &AdRegion<C> {
        &self.region
    }
}

impl<C: AdCollaborator + 'static> Render for AdBanner<C> {
    fn render(
        &mut self,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> impl IntoElement {
        h_flex()
            .w_full()
            .h(px(BANNER_HEIGHT))
            .items_center()
            .justify_center()
            .rounded_md()
            .border_1()
            .child(SharedString::from(format!("Ad · {}", self.region.placement())))
    }
}

#[cfg(test)]
mod tests {
    use tip_core::{PlacementId, ads::TEST_BANNER_PLACEMENT};

    use super::*;

    #[test]
    fn creating_a_banner_requests_its_placement() {
        let region = AdRegion::new(
            PlacementId::new(TEST_BANNER_PLACEMENT).unwrap(),
            LoggingAdCollaborator,
        );

        let banner = AdBanner::new(region);

        assert!(banner.region().is_requested());
    }
}
