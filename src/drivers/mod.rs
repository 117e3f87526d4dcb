//! Output drivers and the tick generator.

pub mod led;
pub mod tick_timer;
