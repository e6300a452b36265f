//! Semantic action IDs for Catch the Dip click targets.
//!
//! These IDs are registered during render and dispatched via `InputEvent::Click`.

pub const BUY: u16 = 0;
pub const PLAY_AGAIN: u16 = 1;
