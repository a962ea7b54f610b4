//! gui/subscription.rs
//! Drive status polling by emitting a periodic Tick message.

use iced::{Subscription, time};

use super::state::{Deck, Message};

pub(crate) fn subscription(state: &Deck) -> Subscription<Message> {
    time::every(state.config.refresh_every()).map(|_| Message::Tick)
}
