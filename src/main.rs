//! Sprinkler Deck
//!
//! # What this program is
//! A small desktop app (built with the `iced` GUI library) that drives an
//! OpenSprinkler irrigation controller over its local HTTP API: start and
//! stop zones, pick a run time per zone, and watch which zones are running.
//!
//! # How it's put together
//! - `core` = the device side: config, auth token, HTTP client, zone helpers.
//!   No GUI code in there.
//! - `gui` = iced state, messages, update, view and the polling timer.
//!
//! The app loop is the usual iced one:
//! **Message happens -> update changes state -> view redraws**
//!
//! # Concurrency model
//! - Every device request runs as a `Task` on iced's tokio executor, so the
//!   window never waits on the network.
//! - A timer subscription fires every `refresh_interval` seconds and re-polls
//!   zone status; the device is the source of truth.
//! - Commands for different zones can be in flight at the same time.
//!
//! # Configuration
//! `config.json` in the working directory (or the path in `$SPRINKLER_CONFIG`),
//! read once at startup. See `config.example.json`.

mod core;
mod gui;
mod logging;

use std::sync::Arc;

use tracing::{error, info};

use crate::core::api::OpenSprinkler;
use crate::core::config::Config;

const WINDOW_W: f32 = 640.0;
const WINDOW_H: f32 = 560.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::enable_tracing();

    let config = Config::load_default().inspect_err(|e| error!("startup failed: {e}"))?;
    info!(
        host = %config.host,
        port = config.port,
        refresh_interval = config.refresh_interval,
        "loaded config"
    );

    let api = OpenSprinkler::new(&config)?;
    let config = Arc::new(config);

    iced::application(
        move || gui::boot(Arc::clone(&config), api.clone()),
        gui::update,
        gui::view,
    )
    .title("Sprinkler Deck")
    .subscription(gui::subscription)
    .window_size(iced::Size::new(WINDOW_W, WINDOW_H))
    .run()?;

    info!("window closed");
    Ok(())
}
