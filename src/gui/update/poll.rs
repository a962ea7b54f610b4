//! gui/update/poll.rs
//! Zone list loading + periodic status refresh.
//!
//! - `tick` runs on every timer beat: reload zones if we never got them,
//!   otherwise poll `/js`.
//! - At most one load and one poll are in flight at a time.
//! - Results are tagged with the epoch they started in; anything older
//!   than the last finished command is dropped.

use std::collections::BTreeMap;
use std::time::Instant;

use iced::Task;
use tracing::{debug, info, warn};

use super::super::state::{Deck, Message, ZoneControl};
use crate::core;
use crate::core::error::ApiError;
use crate::core::types::Zone;

/// Status line while the controller can't be reached; `link_error` has the detail.
const UNREACHABLE: &str = "Controller unreachable";

pub(crate) fn tick(state: &mut Deck, now: Instant) -> Task<Message> {
    state.now = now;

    if !state.zones_loaded {
        return load_zones(state);
    }
    start_poll(state)
}

pub(crate) fn load_zones(state: &mut Deck) -> Task<Message> {
    if state.loading_zones {
        return Task::none();
    }
    state.loading_zones = true;

    let api = state.api.clone();
    let epoch = state.epoch;
    Task::perform(async move { api.zones().await }, move |result| {
        Message::ZonesLoaded(epoch, result)
    })
}

pub(crate) fn start_poll(state: &mut Deck) -> Task<Message> {
    if state.polling {
        return Task::none();
    }
    state.polling = true;

    let api = state.api.clone();
    let epoch = state.epoch;
    Task::perform(async move { api.station_status().await }, move |result| {
        Message::StatusLoaded(epoch, result)
    })
}

pub(crate) fn zones_loaded(
    state: &mut Deck,
    epoch: u64,
    result: Result<Vec<Zone>, ApiError>,
) -> Task<Message> {
    state.loading_zones = false;

    let mut zones = match result {
        Ok(zones) => zones,
        Err(e) => {
            warn!(error = %e, "loading zones failed");
            state.status = UNREACHABLE.to_string();
            state.link_error = Some(e);
            return Task::none();
        }
    };

    let stale = epoch != state.epoch;
    if stale {
        // Names are still good; on/off is not. Keep what we know and re-poll.
        for zone in zones.iter_mut() {
            if let Some(current) = state.zone(zone.index) {
                zone.active = current.active;
            }
        }
    }

    let default_min = state.default_duration_min();
    let mut previous = std::mem::take(&mut state.controls);
    state.controls = zones
        .iter()
        .map(|z| {
            let control = previous
                .remove(&z.index)
                .unwrap_or_else(|| ZoneControl::new(default_min));
            (z.index, control)
        })
        .collect::<BTreeMap<_, _>>();

    info!(count = zones.len(), "zones loaded");
    for zone in &zones {
        debug!(station = zone.index, name = %zone.name, active = zone.active, "zone");
    }

    state.zones = zones;
    clear_finished_countdowns(state);
    state.zones_loaded = true;
    state.link_error = None;
    state.status = summary(state);

    if stale { start_poll(state) } else { Task::none() }
}

pub(crate) fn status_loaded(
    state: &mut Deck,
    epoch: u64,
    result: Result<Vec<bool>, ApiError>,
) -> Task<Message> {
    state.polling = false;

    if epoch != state.epoch {
        // A command landed while this poll was out; its own refresh was
        // skipped because this one held the slot, so ask again.
        debug!(epoch, current = state.epoch, "dropping stale poll");
        return start_poll(state);
    }

    match result {
        Ok(status) => {
            let changed = core::apply_status(&mut state.zones, &status);
            if changed > 0 {
                debug!(changed, "zone status changed on device");
            }

            clear_finished_countdowns(state);

            if state.link_error.take().is_some() {
                info!("controller reachable again");
            }
            state.status = summary(state);
        }
        Err(e) => {
            warn!(error = %e, "status poll failed");
            state.status = UNREACHABLE.to_string();
            state.link_error = Some(e);
        }
    }

    Task::none()
}

/// A zone the device reports off has no run left, whatever we estimated.
fn clear_finished_countdowns(state: &mut Deck) {
    for zone in state.zones.iter().filter(|z| !z.active) {
        if let Some(control) = state.controls.get_mut(&zone.index) {
            control.ends_at = None;
        }
    }
}

fn summary(state: &Deck) -> String {
    match state.running_count() {
        0 => format!("{} zones, all idle", state.zones.len()),
        n => format!("{} zones, {n} running", state.zones.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::loaded_deck;
    use super::super::zones;
    use super::*;

    #[test]
    fn tick_loads_zones_until_they_arrive() {
        let mut deck = loaded_deck(&[]);
        deck.zones_loaded = false;

        let _ = tick(&mut deck, Instant::now());
        assert!(deck.loading_zones);
        assert!(!deck.polling);

        // A second tick while loading doesn't stack requests.
        let _ = tick(&mut deck, Instant::now());
        assert!(deck.loading_zones);
    }

    #[test]
    fn tick_polls_once_loaded() {
        let mut deck = loaded_deck(&[(0, "Lawn", false)]);

        let _ = tick(&mut deck, Instant::now());
        assert!(deck.polling);
        assert!(!deck.loading_zones);
    }

    #[test]
    fn poll_result_updates_display_state() {
        let mut deck = loaded_deck(&[(0, "Lawn", false), (2, "Roses", true)]);
        let _ = start_poll(&mut deck);

        let _ = status_loaded(&mut deck, 0, Ok(vec![true, false, false]));

        assert!(!deck.polling);
        assert!(deck.zones[0].active);
        assert!(!deck.zones[1].active);
        assert_eq!(deck.status, "2 zones, 1 running");
    }

    #[test]
    fn stale_poll_is_dropped_and_asked_again() {
        let mut deck = loaded_deck(&[(0, "Lawn", false)]);
        let _ = start_poll(&mut deck);

        // A command finished while the poll was out.
        deck.epoch = 1;
        deck.zones[0].active = true;

        let _ = status_loaded(&mut deck, 0, Ok(vec![false]));
        assert!(deck.zones[0].active);
        assert!(deck.polling);

        // The fresh poll carries the new epoch and is applied.
        let _ = status_loaded(&mut deck, 1, Ok(vec![false]));
        assert!(!deck.zones[0].active);
        assert!(!deck.polling);
    }

    #[test]
    fn command_during_poll_still_gets_fresh_status() {
        let mut deck = loaded_deck(&[(0, "Lawn", false)]);
        let _ = start_poll(&mut deck);

        // The command's own refresh is skipped: a poll already holds the slot.
        let _ = zones::command_finished(&mut deck, 0, true, 300, Ok(()), Instant::now());
        assert!(deck.zones[0].active);
        assert_eq!(deck.epoch, 1);
        assert!(deck.polling);

        // The old poll comes back stale; another one goes out in its place.
        let _ = status_loaded(&mut deck, 0, Ok(vec![false]));
        assert!(deck.zones[0].active);
        assert!(deck.polling);
    }

    #[test]
    fn poll_error_is_reported_and_cleared_later() {
        let mut deck = loaded_deck(&[(0, "Lawn", false)]);

        let _ = status_loaded(&mut deck, 0, Err(ApiError::Parse("eof".into())));
        assert_eq!(deck.status, "Controller unreachable");
        assert_eq!(
            deck.link_error.as_ref().map(|e| e.user_message()),
            Some("Parse error: malformed response: eof".to_string())
        );

        let _ = status_loaded(&mut deck, 0, Ok(vec![false]));
        assert!(deck.link_error.is_none());
        assert_eq!(deck.status, "1 zones, all idle");
    }

    #[test]
    fn inactive_zone_drops_its_countdown() {
        let mut deck = loaded_deck(&[(0, "Lawn", true)]);
        if let Some(c) = deck.controls.get_mut(&0) {
            c.ends_at = Some(Instant::now());
        }

        let _ = status_loaded(&mut deck, 0, Ok(vec![false]));
        assert!(deck.controls[&0].ends_at.is_none());
    }

    #[test]
    fn reload_drops_countdown_of_idle_zone() {
        let mut deck = loaded_deck(&[(0, "Lawn", true)]);
        if let Some(c) = deck.controls.get_mut(&0) {
            c.ends_at = Some(Instant::now());
        }
        deck.loading_zones = true;

        let _ = zones_loaded(&mut deck, 0, Ok(vec![Zone::new(0, "Lawn")]));

        assert!(!deck.zones[0].active);
        assert!(deck.controls[&0].ends_at.is_none());
    }

    #[test]
    fn reload_keeps_slider_values() {
        let mut deck = loaded_deck(&[(0, "Lawn", false)]);
        if let Some(c) = deck.controls.get_mut(&0) {
            c.duration_min = 42;
        }
        deck.loading_zones = true;

        let zones = vec![Zone::new(0, "Lawn"), Zone::new(3, "New bed")];
        let _ = zones_loaded(&mut deck, 0, Ok(zones));

        assert!(!deck.loading_zones);
        assert_eq!(deck.controls[&0].duration_min, 42);
        assert_eq!(deck.controls[&3].duration_min, deck.default_duration_min());
        assert_eq!(deck.zones.len(), 2);
    }

    #[test]
    fn stale_reload_keeps_known_status() {
        let mut deck = loaded_deck(&[(0, "Lawn", true)]);
        deck.epoch = 3;

        let mut fresh = Zone::new(0, "Front lawn");
        fresh.active = false;
        let _ = zones_loaded(&mut deck, 2, Ok(vec![fresh]));

        assert_eq!(deck.zones[0].name, "Front lawn");
        assert!(deck.zones[0].active);
        assert!(deck.polling);
    }

    #[test]
    fn failed_first_load_leaves_retry_to_the_timer() {
        let mut deck = loaded_deck(&[]);
        deck.zones_loaded = false;
        let _ = load_zones(&mut deck);

        let _ = zones_loaded(&mut deck, 0, Err(ApiError::Timeout));
        assert!(!deck.loading_zones);
        assert!(!deck.zones_loaded);
        assert_eq!(deck.status, "Controller unreachable");
        assert!(matches!(deck.link_error, Some(ApiError::Timeout)));
    }
}
