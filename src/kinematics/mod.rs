//! Input geometry for the move command.
//!
//! - [`steering`] quantizes a joystick vector into the turn code carried by
//!   `CMD_MOVE`.
pub mod steering;
