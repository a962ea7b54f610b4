//! GUI renderer (reads state, produces widgets; no mutation).

mod constants;
mod header;
mod widgets;
mod zones;

use iced::Length;
use iced::widget::{Column, column};

use super::state::{Deck, Message};

pub(crate) fn view(state: &Deck) -> Column<'_, Message> {
    let header = header::build_header(state);
    let zones = zones::build_zone_list(state).height(Length::Fill);

    column![header, zones].spacing(12).padding(12)
}
