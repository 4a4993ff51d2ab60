//! Body pose accumulator.
//!
//! [`PoseState`] holds the attitude and position triples the panel last asked
//! for. Every update is a pure function returning a new state; the panel
//! controller owns the single live instance.
use core::fmt::{self, Display, Formatter};

use crate::config::{ATTITUDE_RANGE, POSITION_XY_RANGE, POSITION_Z_RANGE};

/// Closed integer interval used for saturating clamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRange {
    pub min: i32,
    pub max: i32,
}

impl AxisRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// Saturating `value + delta`, never leaves the range even on i32 overflow
    pub fn nudge(&self, value: i32, delta: i32) -> i32 {
        self.clamp(value.saturating_add(delta))
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vec3 {
    pub const ORIGIN: Vec3 = Vec3 { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl Display for Vec3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<[i32; 3]> for Vec3 {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoseState {
    pub attitude: Vec3,
    pub position: Vec3,
}

impl PoseState {
    pub fn nudged_attitude(self, dx: i32, dy: i32) -> Self {
        let attitude = Vec3 {
            x: ATTITUDE_RANGE.nudge(self.attitude.x, dx),
            y: ATTITUDE_RANGE.nudge(self.attitude.y, dy),
            ..self.attitude
        };
        Self { attitude, ..self }
    }

    pub fn nudged_attitude_z(self, dz: i32) -> Self {
        let attitude = Vec3 {
            z: ATTITUDE_RANGE.nudge(self.attitude.z, dz),
            ..self.attitude
        };
        Self { attitude, ..self }
    }

    pub fn with_attitude_reset(self) -> Self {
        Self {
            attitude: Vec3::ORIGIN,
            ..self
        }
    }

    pub fn nudged_position(self, dx: i32, dy: i32) -> Self {
        let position = Vec3 {
            x: POSITION_XY_RANGE.nudge(self.position.x, dx),
            y: POSITION_XY_RANGE.nudge(self.position.y, dy),
            ..self.position
        };
        Self { position, ..self }
    }

    pub fn nudged_position_z(self, dz: i32) -> Self {
        let position = Vec3 {
            z: POSITION_Z_RANGE.nudge(self.position.z, dz),
            ..self.position
        };
        Self { position, ..self }
    }

    pub fn with_position_reset(self) -> Self {
        Self {
            position: Vec3::ORIGIN,
            ..self
        }
    }

    /// True when every component sits inside its clamp range
    pub fn is_within_limits(&self) -> bool {
        ATTITUDE_RANGE.contains(self.attitude.x)
            && ATTITUDE_RANGE.contains(self.attitude.y)
            && ATTITUDE_RANGE.contains(self.attitude.z)
            && POSITION_XY_RANGE.contains(self.position.x)
            && POSITION_XY_RANGE.contains(self.position.y)
            && POSITION_Z_RANGE.contains(self.position.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_is_idempotent() {
        for v in [-1000, -41, -40, -3, 0, 7, 40, 41, i32::MAX] {
            let once = POSITION_XY_RANGE.clamp(v);
            assert_eq!(POSITION_XY_RANGE.clamp(once), once);
        }
    }

    #[test]
    fn attitude_saturates_instead_of_wrapping() {
        let mut pose = PoseState::default();
        for _ in 0..10 {
            pose = pose.nudged_attitude(3, -3);
        }
        assert_eq!(pose.attitude, Vec3::new(15, -15, 0));

        let pose = pose.nudged_attitude(-4, 0);
        assert_eq!(pose.attitude, Vec3::new(11, -15, 0));
    }

    #[test]
    fn attitude_xy_nudge_leaves_z_alone() {
        let pose = PoseState::default().nudged_attitude_z(6).nudged_attitude(3, 3);
        assert_eq!(pose.attitude, Vec3::new(3, 3, 6));
    }

    #[test]
    fn position_stays_in_range_for_any_sequence() {
        let deltas = [50, -7, 13, -200, 5, 5, 5, 90, -1, i32::MIN, i32::MAX, 4];
        let mut pose = PoseState::default();
        for (i, d) in deltas.iter().enumerate() {
            pose = if i % 3 == 0 {
                pose.nudged_position_z(*d)
            } else {
                pose.nudged_position(*d, d.saturating_neg())
            };
            assert!(pose.is_within_limits(), "left range after step {i}: {pose:?}");
        }
    }

    #[test]
    fn position_z_has_its_own_range() {
        let pose = PoseState::default().nudged_position_z(100);
        assert_eq!(pose.position.z, 20);
        let pose = pose.nudged_position_z(-100);
        assert_eq!(pose.position.z, -20);
    }

    #[test]
    fn reset_attitude_always_yields_origin() {
        let pose = PoseState::default()
            .nudged_attitude(9, -12)
            .nudged_attitude_z(15)
            .nudged_position(5, 5);
        let reset = pose.with_attitude_reset();
        assert_eq!(reset.attitude, Vec3::ORIGIN);
        assert_eq!(reset.position, Vec3::new(5, 5, 0));
    }

    #[test]
    fn reset_position_clears_all_three_axes() {
        let pose = PoseState::default()
            .nudged_position(-40, 12)
            .nudged_position_z(-8)
            .with_position_reset();
        assert_eq!(pose.position, Vec3::ORIGIN);
    }
}
