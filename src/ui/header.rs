use gtk4 as gtk;
use libadwaita as adw;

use crate::privacy::{PrivacyChrome, Visibility};

pub struct HeaderComponents {
    pub header_bar: adw::HeaderBar,
    pub title: adw::WindowTitle,
    pub shortcuts_btn: gtk::Button,
}

pub fn create_header_bar() -> HeaderComponents {
    let chrome = PrivacyChrome::for_visibility(Visibility::Visible);
    let title = adw::WindowTitle::new(chrome.window_title, "Capture or paste a coding problem");

    let shortcuts_btn = gtk::Button::builder()
        .icon_name("preferences-desktop-keyboard-shortcuts-symbolic")
        .tooltip_text("Keyboard Shortcuts")
        .build();

    let header_bar = adw::HeaderBar::builder().title_widget(&title).build();
    header_bar.pack_end(&shortcuts_btn);

    HeaderComponents {
        header_bar,
        title,
        shortcuts_btn,
    }
}
