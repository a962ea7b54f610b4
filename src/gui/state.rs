//! GUI state + messages.
//! Pure data definitions used by update + view.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::core::api::OpenSprinkler;
use crate::core::config::Config;
use crate::core::error::ApiError;
use crate::core::types::Zone;

/// Duration slider range, in minutes.
pub(crate) const MIN_DURATION_MIN: u16 = 1;
pub(crate) const MAX_DURATION_MIN: u16 = 120;

/// Per-zone UI bits the device doesn't know about.
#[derive(Debug, Clone)]
pub(crate) struct ZoneControl {
    /// Slider value.
    pub duration_min: u16,
    /// A start/stop request for this zone is on the wire.
    pub pending: bool,
    /// When a run started from here should end. Only an estimate: the device
    /// may stop the zone earlier, and the next poll wins.
    pub ends_at: Option<Instant>,
}

impl ZoneControl {
    pub fn new(duration_min: u16) -> Self {
        Self {
            duration_min,
            pending: false,
            ends_at: None,
        }
    }
}

/// App state
pub(crate) struct Deck {
    pub config: Arc<Config>,
    pub api: OpenSprinkler,

    pub status: String,
    /// Last poll/load failure. Cleared by the next successful poll.
    pub link_error: Option<ApiError>,
    /// Last failed user command. Stays until dismissed.
    pub command_error: Option<String>,

    // Zone list: written only by update(), read by view().
    pub zones: Vec<Zone>,
    /// Keyed by device station index.
    pub controls: BTreeMap<usize, ZoneControl>,
    pub zones_loaded: bool,

    // In-flight guards
    pub loading_zones: bool,
    pub polling: bool,
    pub stopping_all: bool,

    /// Bumped by every finished command. Poll results tagged with an older
    /// value are dropped.
    pub epoch: u64,

    /// Clock used by view() for countdowns; refreshed on every tick.
    pub now: Instant,
}

impl Deck {
    pub fn new(config: Arc<Config>, api: OpenSprinkler) -> Self {
        Self {
            status: format!("Connecting to {}...", api.base_url()),
            config,
            api,
            link_error: None,
            command_error: None,
            zones: Vec::new(),
            controls: BTreeMap::new(),
            zones_loaded: false,
            loading_zones: false,
            polling: false,
            stopping_all: false,
            epoch: 0,
            now: Instant::now(),
        }
    }

    /// Slider starting point, from `default_duration` (seconds, rounded up).
    pub fn default_duration_min(&self) -> u16 {
        let minutes = self.config.default_duration.div_ceil(60);
        u16::try_from(minutes)
            .unwrap_or(MAX_DURATION_MIN)
            .clamp(MIN_DURATION_MIN, MAX_DURATION_MIN)
    }

    pub fn zone(&self, station: usize) -> Option<&Zone> {
        self.zones.iter().find(|z| z.index == station)
    }

    pub fn zone_mut(&mut self, station: usize) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|z| z.index == station)
    }

    pub fn running_count(&self) -> usize {
        self.zones.iter().filter(|z| z.active).count()
    }
}

/// Message = "something happened".
#[derive(Debug, Clone)]
pub(crate) enum Message {
    /// Timer fired (every `refresh_interval`).
    Tick,

    // Zone list
    RefreshPressed,
    ZonesLoaded(u64, Result<Vec<Zone>, ApiError>),
    StatusLoaded(u64, Result<Vec<bool>, ApiError>),

    // Zone commands (keyed by device station index)
    ToggleZone(usize),
    SetDuration(usize, u16),
    CommandFinished {
        station: usize,
        turn_on: bool,
        duration_secs: u32,
        result: Result<(), ApiError>,
    },

    StopAll,
    StopAllFinished(Result<(), ApiError>),

    DismissError,
}
