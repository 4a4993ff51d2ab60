//! Axis enumeration for calibration nudges.
use core::fmt::Display;
use core::str::FromStr;

use super::state::Vec3;
use crate::error::PanelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// Adds `delta` to this axis of `v`, saturating at the i32 bounds
    pub fn offset(self, v: Vec3, delta: i32) -> Vec3 {
        match self {
            Axis::X => Vec3 { x: v.x.saturating_add(delta), ..v },
            Axis::Y => Vec3 { y: v.y.saturating_add(delta), ..v },
            Axis::Z => Vec3 { z: v.z.saturating_add(delta), ..v },
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
            Axis::Z => f.write_str("z"),
        }
    }
}

impl FromStr for Axis {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(Axis::X),
            "y" | "Y" => Ok(Axis::Y),
            "z" | "Z" => Ok(Axis::Z),
            other => Err(PanelError::Parse(format!("unknown axis {other:?}"))),
        }
    }
}
