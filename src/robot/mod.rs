//! Robot-facing types and client-side state.
//!
//! This module defines what the panel knows about the robot:
//! - [`commands`]: the `#`-delimited command strings and their parser.
//! - [`state`]: the attitude/position accumulator and its clamp ranges.
//! - [`head`]: head servos with clamp and duplicate suppression.
//! - [`gait`]: gait/action modes, speed and move intents.
//! - [`calibration`], [`leg`], [`axis`]: the per-leg calibration table.
//! - [`battery`], [`led`], [`routine`]: payloads for the auxiliary endpoints.
pub mod axis;
pub mod battery;
pub mod calibration;
pub mod commands;
pub mod gait;
pub mod head;
pub mod led;
pub mod leg;
pub mod routine;
pub mod state;
