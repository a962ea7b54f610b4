//! Top bar: title, controller address, status line, errors, global actions.

use iced::widget::{Column, button, column, row, text};
use iced::{Alignment, Length};

use super::super::state::{Deck, Message};
use super::constants::{STATUS_TEXT, TITLE_TEXT};
use super::widgets::error_text;

pub(crate) fn build_header(state: &Deck) -> Column<'_, Message> {
    let refresh_btn = button("Refresh")
        .on_press_maybe((!state.loading_zones).then_some(Message::RefreshPressed));

    let stop_label = if state.stopping_all {
        "Stopping..."
    } else {
        "Stop all"
    };
    let stop_btn = button(stop_label)
        .style(button::danger)
        .on_press_maybe((!state.stopping_all).then_some(Message::StopAll));

    let title = row![
        text("Sprinkler Deck").size(TITLE_TEXT).width(Length::Fill),
        refresh_btn,
        stop_btn,
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let mut col = column![
        title,
        text(state.api.base_url()).size(STATUS_TEXT),
        text(&state.status).size(STATUS_TEXT),
    ]
    .spacing(6);

    if let Some(e) = &state.link_error {
        col = col.push(error_text(e.user_message()).size(STATUS_TEXT));
    }

    if let Some(msg) = &state.command_error {
        col = col.push(
            row![
                error_text(msg.clone()).size(STATUS_TEXT).width(Length::Fill),
                button(text("×").size(STATUS_TEXT)).on_press(Message::DismissError),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );
    }

    col
}
