//! gui/update/zones.rs
//! Start/stop commands.
//!
//! - Each zone has its own in-flight flag, so different zones can be started
//!   or stopped at the same time.
//! - A finished command updates the zone right away, bumps the epoch so
//!   older polls can't undo it, then asks the device for fresh status.

use std::time::{Duration, Instant};

use iced::Task;
use tracing::{info, warn};

use super::super::state::{Deck, MAX_DURATION_MIN, MIN_DURATION_MIN, Message, ZoneControl};
use super::poll::start_poll;
use crate::core::error::ApiError;

pub(crate) fn toggle_zone(state: &mut Deck, station: usize) -> Task<Message> {
    let Some(zone) = state.zone(station) else {
        warn!(station, "toggle for unknown zone");
        return Task::none();
    };
    let turn_on = !zone.active;
    let name = zone.name.clone();

    let default_min = state.default_duration_min();
    let control = state
        .controls
        .entry(station)
        .or_insert_with(|| ZoneControl::new(default_min));

    if control.pending {
        return Task::none();
    }
    control.pending = true;

    let duration_secs = u32::from(control.duration_min) * 60;
    let api = state.api.clone();

    if turn_on {
        info!(station, zone = %name, duration_secs, "starting zone");
        state.status = format!("Starting {name}...");
        Task::perform(
            async move { api.activate(station, duration_secs).await },
            move |result| Message::CommandFinished {
                station,
                turn_on,
                duration_secs,
                result,
            },
        )
    } else {
        info!(station, zone = %name, "stopping zone");
        state.status = format!("Stopping {name}...");
        Task::perform(
            async move { api.deactivate(station).await },
            move |result| Message::CommandFinished {
                station,
                turn_on,
                duration_secs: 0,
                result,
            },
        )
    }
}

pub(crate) fn set_duration(state: &mut Deck, station: usize, minutes: u16) -> Task<Message> {
    if let Some(control) = state.controls.get_mut(&station) {
        control.duration_min = minutes.clamp(MIN_DURATION_MIN, MAX_DURATION_MIN);
    }
    Task::none()
}

pub(crate) fn command_finished(
    state: &mut Deck,
    station: usize,
    turn_on: bool,
    duration_secs: u32,
    result: Result<(), ApiError>,
    now: Instant,
) -> Task<Message> {
    if let Some(control) = state.controls.get_mut(&station) {
        control.pending = false;
    }

    let name = state
        .zone(station)
        .map(|z| z.name.clone())
        .unwrap_or_else(|| format!("station {station}"));

    if let Err(e) = result {
        let verb = if turn_on { "start" } else { "stop" };
        warn!(station, error = %e, "could not {verb} zone");
        state.status = format!("Could not {verb} {name}");
        state.command_error = Some(format!("{name}: {}", e.user_message()));
        return Task::none();
    }

    state.epoch += 1;
    if let Some(zone) = state.zone_mut(station) {
        zone.active = turn_on;
    }
    if let Some(control) = state.controls.get_mut(&station) {
        control.ends_at =
            turn_on.then(|| now + Duration::from_secs(u64::from(duration_secs)));
    }

    state.status = if turn_on {
        format!("{name} running for {} min", duration_secs / 60)
    } else {
        format!("{name} stopped")
    };

    start_poll(state)
}

pub(crate) fn stop_all(state: &mut Deck) -> Task<Message> {
    if state.stopping_all {
        return Task::none();
    }
    state.stopping_all = true;
    state.status = "Stopping all zones...".to_string();
    info!("stopping all zones");

    let api = state.api.clone();
    Task::perform(async move { api.stop_all().await }, Message::StopAllFinished)
}

pub(crate) fn stop_all_finished(state: &mut Deck, result: Result<(), ApiError>) -> Task<Message> {
    state.stopping_all = false;

    if let Err(e) = result {
        warn!(error = %e, "stop all failed");
        state.status = "Could not stop all zones".to_string();
        state.command_error = Some(e.user_message());
        return Task::none();
    }

    state.epoch += 1;
    for zone in state.zones.iter_mut() {
        zone.active = false;
    }
    for control in state.controls.values_mut() {
        control.ends_at = None;
    }
    state.status = "All zones stopped".to_string();

    start_poll(state)
}
