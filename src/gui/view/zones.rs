//! Zone list: one row per zone (toggle, state, duration slider, countdown).

use iced::widget::{Scrollable, column, row, scrollable, slider, text};
use iced::{Alignment, Length};

use super::super::state::{Deck, MAX_DURATION_MIN, MIN_DURATION_MIN, Message};
use super::super::util::{fmt_minutes, fmt_remaining};
use super::constants::{DURATION_W, REMAINING_W, ROW_TEXT, SLIDER_W, STATE_W, ZONE_LIST_SPACING};
use super::widgets::zone_button;

pub(crate) fn build_zone_list(state: &Deck) -> Scrollable<'_, Message> {
    let mut list = column![].spacing(ZONE_LIST_SPACING);

    if state.zones.is_empty() {
        let hint = if state.zones_loaded {
            "The controller reports no named zones."
        } else {
            "Loading zones..."
        };
        return scrollable(list.push(text(hint).size(ROW_TEXT)));
    }

    let default_min = state.default_duration_min();

    for zone in &state.zones {
        let control = state.controls.get(&zone.index);
        let pending = control.is_some_and(|c| c.pending);
        let minutes = control.map_or(default_min, |c| c.duration_min);

        let on_off = if zone.active { "ON" } else { "off" };

        let station = zone.index;
        let duration = slider(MIN_DURATION_MIN..=MAX_DURATION_MIN, minutes, move |m| {
            Message::SetDuration(station, m)
        })
        .width(Length::Fixed(SLIDER_W));

        let remaining = control
            .and_then(|c| c.ends_at)
            .filter(|_| zone.active)
            .and_then(|end| fmt_remaining(end, state.now))
            .unwrap_or_default();

        list = list.push(
            row![
                zone_button(&zone.name, station, zone.active, pending),
                text(on_off).size(ROW_TEXT).width(Length::Fixed(STATE_W)),
                duration,
                text(fmt_minutes(minutes))
                    .size(ROW_TEXT)
                    .width(Length::Fixed(DURATION_W)),
                text(remaining)
                    .size(ROW_TEXT)
                    .width(Length::Fixed(REMAINING_W)),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
        );
    }

    scrollable(list)
}
