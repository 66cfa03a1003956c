use adw::prelude::*;
use gtk4 as gtk;
use libadwaita as adw;

use crate::app::{Action, ShortcutConfig};

pub fn show_shortcuts_dialog(shortcuts: &ShortcutConfig, parent: &impl IsA<gtk::Window>) {
    let window = adw::PreferencesWindow::builder()
        .transient_for(parent)
        .modal(true)
        .title("Keyboard Shortcuts")
        .default_width(460)
        .default_height(420)
        .build();

    let page = adw::PreferencesPage::new();
    window.add(&page);

    let group_capture = adw::PreferencesGroup::builder()
        .title("Capture & Answer")
        .build();
    add_action_row(shortcuts, &group_capture, Action::Capture);
    add_action_row(shortcuts, &group_capture, Action::Send);
    page.add(&group_capture);

    let group_privacy = adw::PreferencesGroup::builder().title("Privacy").build();
    add_action_row(shortcuts, &group_privacy, Action::TogglePrivacy);
    add_action_row(shortcuts, &group_privacy, Action::TestPrivacy);
    page.add(&group_privacy);

    let group_general = adw::PreferencesGroup::builder().title("General").build();
    add_action_row(shortcuts, &group_general, Action::ShowShortcuts);
    add_action_row(shortcuts, &group_general, Action::Quit);
    page.add(&group_general);

    window.present();
}

fn add_action_row(shortcuts: &ShortcutConfig, group: &adw::PreferencesGroup, action: Action) {
    let shortcut_label = shortcuts.get_shortcut_label(action);

    let row = adw::ActionRow::builder().title(action.label()).build();

    let label = gtk::Label::builder()
        .label(if shortcut_label.is_empty() {
            "Disabled"
        } else {
            shortcut_label.as_str()
        })
        .valign(gtk::Align::Center)
        .css_classes(["dim-label"])
        .build();

    row.add_suffix(&label);
    group.add(&row);
}
