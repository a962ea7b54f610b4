//! gui/mod.rs
//!
//! This folder contains ONLY frontend concerns:
//! - app state ('Deck')
//! - messages ('Message')
//! - update logic ('update()')
//! - view layout ('view()')
//! - subscriptions (status polling timer)
//! - small UI helpers ('util')

pub(crate) mod state;
pub(crate) mod subscription;
pub(crate) mod update;
pub(crate) mod util;
pub(crate) mod view;

use std::sync::Arc;

use iced::Task;

use crate::core::api::OpenSprinkler;
use crate::core::config::Config;

// Re-export the entry points main.rs needs.
pub(crate) use state::{Deck, Message};
pub(crate) use subscription::subscription;
pub(crate) use update::update;
pub(crate) use view::view;

/// Initial state plus the first zone load.
pub(crate) fn boot(config: Arc<Config>, api: OpenSprinkler) -> (Deck, Task<Message>) {
    let mut state = Deck::new(config, api);
    let task = update::poll::load_zones(&mut state);
    (state, task)
}
