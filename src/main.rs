mod clock;
mod config;
mod flock;
mod loader;
mod model;
mod shortcuts;
mod ui;

use std::thread;

use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let Some(_lock) = flock::InstanceLock::obtain() else {
        log::info!("another instance is already running");
        return Ok(());
    };

    let config = config::Config::load_or_default();

    // discovery runs while the window comes up; joined on the first frame
    let catalog_thread = thread::spawn(loader::load_apps);

    ui::run_ui(config, catalog_thread);

    Ok(())
}
