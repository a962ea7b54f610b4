//! core/mod.rs
//!
//! Everything that talks to (or reasons about) the controller:
//! - load connection settings
//! - build authenticated requests and decode replies
//! - turn raw station arrays into `Zone`s for the GUI to render
//!
//! No iced imports in here. The GUI calls into core; core never calls back.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod types;

#[cfg(test)]
pub(crate) mod fake_device;

use types::Zone;

/// True for the placeholder names a fresh controller gives its stations
/// (`S01`, `S02`, ... `S120`).
pub fn is_generic_station_name(name: &str) -> bool {
    let name = name.trim();
    match name.strip_prefix('S') {
        Some(digits) => digits.len() >= 2 && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Build the zone list from the device's `snames` array.
///
/// - blank and placeholder names are hidden
/// - each zone keeps its real station index
/// - if every station still has a placeholder name, show them all rather
///   than an empty list
pub fn zones_from_names(names: &[String]) -> Vec<Zone> {
    let named: Vec<Zone> = names
        .iter()
        .enumerate()
        .filter(|(_, n)| !n.trim().is_empty() && !is_generic_station_name(n))
        .map(|(i, n)| Zone::new(i, n.trim()))
        .collect();

    if !named.is_empty() {
        return named;
    }

    names
        .iter()
        .enumerate()
        .filter(|(_, n)| !n.trim().is_empty())
        .map(|(i, n)| Zone::new(i, n.trim()))
        .collect()
}

/// Merge a `/js` status vector into the zone list by station index.
///
/// Zones whose index is past the end of `status` keep their previous value.
/// Returns how many zones flipped.
pub fn apply_status(zones: &mut [Zone], status: &[bool]) -> usize {
    let mut changed = 0;
    for zone in zones.iter_mut() {
        let Some(&active) = status.get(zone.index) else {
            continue;
        };
        if zone.active != active {
            zone.active = active;
            changed += 1;
        }
    }
    changed
}
