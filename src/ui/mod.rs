pub mod answer;
pub mod clipboard;
pub mod dialogs;
pub mod drawing;
pub mod handlers;
pub mod header;
pub mod overlay;
pub mod preview;
pub mod shortcuts;
pub mod toolbar;

use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::{gdk, Orientation};
use std::rc::Rc;

use crate::app::{AppConfig, AppState};
use crate::privacy::{PrivacyChrome, Visibility};

const OVERLAY_CSS: &str = "window.capture-overlay { background-color: transparent; }";

fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_string(OVERLAY_CSS);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

pub fn build_ui(app: &adw::Application) {
    load_css();

    let header = header::create_header_bar();
    let controls = toolbar::create_controls();

    let content = gtk::Box::builder()
        .orientation(Orientation::Vertical)
        .build();
    content.append(&header.header_bar);
    content.append(&controls.content);

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title(PrivacyChrome::for_visibility(Visibility::Visible).window_title)
        .content(&content)
        .default_width(600)
        .default_height(400)
        .resizable(false)
        .build();

    let state = AppState::new(&window, AppConfig::from_env());

    let components = Rc::new(handlers::UiComponents {
        window: window.clone(),
        header,
        controls,
    });

    handlers::connect_all_handlers(&state, &components);

    window.present();
}
