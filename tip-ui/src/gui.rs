use anyhow::Result;
use gpui::{
    AnyView, App, AppContext, Bounds, KeyBinding, Menu, MenuItem, TitlebarOptions, WindowBounds,
    WindowOptions,
};
use gpui_component::Root;
use tracing::info;

use crate::{
    Quit,
    app::AppSettings,
    components::{AdBanner, TipScreen, WindowPreferences},
    quit,
};

pub const WINDOW_TITLE: &str = "Tip Time";

pub fn setup_app(app_cx: &mut App) {
    // This must be called before using any GPUI Component features.
    gpui_component::init(app_cx);

    app_cx.activate(true);

    #[cfg(target_os = "macos")]
    app_cx.bind_keys([KeyBinding::new("cmd-q", Quit, None)]);

    #[cfg(not(target_os = "macos"))]
    app_cx.bind_keys([
        KeyBinding::new("ctrl-q", Quit, None),
        KeyBinding::new("alt-F4", Quit, None),
    ]);

    app_cx.on_action(quit);

    app_cx.set_menus(vec![Menu {
        name: WINDOW_TITLE.into(),
        items: vec![MenuItem::action("Quit", Quit)],
    }]);

    // Single-window app: closing it ends the process.
    app_cx
        .on_window_closed(|cx: &mut App| {
            info!("Window closed");
            quit(&Quit, cx);
        })
        .detach();
}

/// Opens the tip calculator window for `settings`.
pub fn open_main_window(
    settings: AppSettings,
    app_cx: &mut App,
) -> Result<()> {
    let preferences = WindowPreferences::from(settings.window);
    let options = WindowOptions {
        window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
            None,
            preferences.size,
            app_cx,
        ))),
        titlebar: Some(TitlebarOptions {
            title: Some(WINDOW_TITLE.into()),
            ..Default::default()
        }),
        ..Default::default()
    };

    let model = settings.screen_model();
    let banner = settings.ad_region().map(AdBanner::new);

    app_cx.open_window(options, move |window, cx| {
        let screen = cx.new(|screen_cx| TipScreen::new(model, banner, window, screen_cx));
        let view: AnyView = screen.into();
        cx.new(|root_cx| Root::new(view, window, root_cx))
    })?;

    info!(locale = %settings.locale, "Tip Time window opened");
    Ok(())
}
