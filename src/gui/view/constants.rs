//! View constants (layout/sizing).

pub(crate) const TITLE_TEXT: f32 = 20.0;
pub(crate) const STATUS_TEXT: f32 = 13.0;
pub(crate) const ROW_TEXT: f32 = 15.0;

pub(crate) const ZONE_BUTTON_W: f32 = 200.0;
pub(crate) const STATE_W: f32 = 36.0;
pub(crate) const SLIDER_W: f32 = 160.0;
pub(crate) const DURATION_W: f32 = 90.0;
pub(crate) const REMAINING_W: f32 = 70.0;

pub(crate) const ZONE_LIST_SPACING: f32 = 6.0;
