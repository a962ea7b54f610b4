//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use std::time::Instant;

use iced::Task;

use super::state::{Deck, Message};

pub(crate) mod poll;
mod zones;

pub(crate) fn update(state: &mut Deck, message: Message) -> Task<Message> {
    match message {
        // Polling
        Message::Tick => poll::tick(state, Instant::now()),
        Message::RefreshPressed => poll::load_zones(state),
        Message::ZonesLoaded(epoch, result) => poll::zones_loaded(state, epoch, result),
        Message::StatusLoaded(epoch, result) => poll::status_loaded(state, epoch, result),

        // Zone commands
        Message::ToggleZone(station) => zones::toggle_zone(state, station),
        Message::SetDuration(station, minutes) => zones::set_duration(state, station, minutes),
        Message::CommandFinished {
            station,
            turn_on,
            duration_secs,
            result,
        } => zones::command_finished(
            state,
            station,
            turn_on,
            duration_secs,
            result,
            Instant::now(),
        ),

        Message::StopAll => zones::stop_all(state),
        Message::StopAllFinished(result) => zones::stop_all_finished(state, result),

        Message::DismissError => {
            state.command_error = None;
            Task::none()
        }
    }
}
