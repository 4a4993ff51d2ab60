//! Joystick vector to turn code quantization.
//!
//! The move command carries a turn code in [-10, 10] that biases the gait
//! direction. Forward is +y and right is +x, so the angle is measured with
//! `atan2(x, y)`: 0° straight ahead, +90° pure right, ±180° straight back.
//!
//! The front half-plane maps linearly onto the code range. The rear
//! half-plane mirrors it about the lateral axis, so both ±90° seams agree and
//! straight back steers like straight ahead. The older dashboard formula for
//! the rear half ran past ±10 (91° gave 30); the mirror replaces it and is
//! pinned by `rear_half_mirrors_front`.
use core::f64::consts::PI;

use crate::config::TURN_CODE_LIMIT;
use crate::robot::gait::ActionMode;

/// Degrees of heading per unit of turn code
const DEGREES_PER_STEP: f64 = 180.0 / (2 * TURN_CODE_LIMIT) as f64;

/// Heading of `(x, y)` in degrees, in (-180, 180].
pub fn heading_degrees(x: f64, y: f64) -> f64 {
    x.atan2(y) * 180.0 / PI
}

/// Rounds halves toward positive infinity, the way the dashboard always did
/// (`-4.5 → -4`, `4.5 → 5`).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Turn code for a joystick vector.
///
/// Returns 0 when steering is disabled, for the null vector and for
/// non-finite input.
pub fn turn_code(x: f64, y: f64, mode: ActionMode) -> i32 {
    if mode == ActionMode::Translate || (x == 0.0 && y == 0.0) || !x.is_finite() || !y.is_finite()
    {
        return 0;
    }

    let mut angle = heading_degrees(x, y);
    let code = if (-90.0..=90.0).contains(&angle) {
        round_half_up(((angle + 90.0) / 180.0) * 20.0 - 10.0)
    } else {
        if angle < 0.0 {
            angle += 360.0;
        }
        // angle in (90, 270): 90 -> 10, 180 -> 0, 270 -> -10
        round_half_up((180.0 - angle) / DEGREES_PER_STEP)
    };

    code.clamp(-TURN_CODE_LIMIT, TURN_CODE_LIMIT)
}
