mod app;
mod capture;
mod llm;
mod preview;
mod privacy;
mod ui;

use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use log::{debug, info};

const APP_ID: &str = "org.example.LeetCodeHelper";

fn main() -> gtk::glib::ExitCode {
    // Load .env before the logger so RUST_LOG can live there too
    let dotenv = dotenvy::dotenv();
    env_logger::init();

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }

    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(ui::build_ui);
    app.run()
}
