use lunchwheel::config;
use lunchwheel::gui::app::AppModel;
use lunchwheel::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);
    let (cmd_tx, cmd_rx) = async_channel::unbounded();

    // Start Background Services
    runtime::start_background_services(tx, cmd_rx, config.clone());

    let app = RelmApp::new("org.troia.lunchwheel");

    app.run::<AppModel>((config, cmd_tx, rx));
}
