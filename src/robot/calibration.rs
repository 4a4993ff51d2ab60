//! Per-leg calibration offsets kept on the panel side.
//!
//! The backend owns the real calibration; this table mirrors it so nudges can
//! be sent as absolute offsets. It is refreshed from `GET /calibration`.
use super::axis::Axis;
use super::commands::Command;
use super::leg::{Leg, LEG_COUNT};
use super::state::Vec3;
use crate::config::CALIBRATION_DEFAULT;
use crate::error::PanelError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationTable {
    offsets: [Vec3; LEG_COUNT],
    selected: Leg,
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self {
            offsets: [Vec3::from(CALIBRATION_DEFAULT); LEG_COUNT],
            selected: Leg::One,
        }
    }
}

impl CalibrationTable {
    pub fn selected(&self) -> Leg {
        self.selected
    }

    pub fn select(&mut self, leg: Leg) {
        self.selected = leg;
    }

    pub fn offset(&self, leg: Leg) -> Vec3 {
        self.offsets[leg]
    }

    pub fn offsets(&self) -> &[Vec3; LEG_COUNT] {
        &self.offsets
    }

    /// Moves one axis of the selected leg and returns the absolute command
    pub fn nudge(&mut self, axis: Axis, delta: i32) -> Command {
        let leg = self.selected;
        self.offsets[leg] = axis.offset(self.offsets[leg], delta);
        Command::Calibration {
            leg,
            offset: self.offsets[leg],
        }
    }

    /// Replaces the whole table with the backend's points.
    ///
    /// Anything other than six triples is rejected and leaves the table as it was.
    pub fn load(&mut self, points: &[[i32; 3]]) -> Result<(), PanelError> {
        if points.len() != LEG_COUNT {
            return Err(PanelError::UnexpectedResponse(format!(
                "expected {LEG_COUNT} calibration points, got {}",
                points.len()
            )));
        }
        for (slot, point) in self.offsets.iter_mut().zip(points) {
            *slot = Vec3::from(*point);
        }
        Ok(())
    }
}
