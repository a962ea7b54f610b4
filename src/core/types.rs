//! Core data types shared between the API client and the UI.
//!
//! Rule of thumb:
//! - These structs are plain bags of data
//! - No GUI code
//! - No HTTP code

/// One irrigation zone as the device reports it.
///
/// `index` is the device's own station index (0-based), which is what
/// `/cm?sid=` expects. It is NOT the row position in the UI, because
/// unnamed stations are hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub index: usize,
    pub name: String,
    /// Last known device status. The device is the source of truth.
    pub active: bool,
}

impl Zone {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            active: false,
        }
    }
}
