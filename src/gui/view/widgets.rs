//! Reusable small widgets/helpers used across view modules.

use iced::widget::{Button, Text, button, text};
use iced::{Color, Length};

use super::super::state::Message;
use super::constants::{ROW_TEXT, ZONE_BUTTON_W};

const ERROR_RED: Color = Color {
    r: 0.85,
    g: 0.2,
    b: 0.2,
    a: 1.0,
};

/// Zone on/off button. Running zones are drawn in the success style so they
/// stand out; a zone with a request in flight can't be pressed.
pub(crate) fn zone_button<'a>(
    label: &'a str,
    station: usize,
    active: bool,
    pending: bool,
) -> Button<'a, Message> {
    let caption = if pending {
        format!("{label} ...")
    } else {
        label.to_string()
    };

    let style = if active {
        button::success
    } else {
        button::secondary
    };

    button(text(caption).size(ROW_TEXT))
        .width(Length::Fixed(ZONE_BUTTON_W))
        .style(style)
        .on_press_maybe((!pending).then_some(Message::ToggleZone(station)))
}

pub(crate) fn error_text<'a>(message: String) -> Text<'a> {
    text(message).color(ERROR_RED)
}
