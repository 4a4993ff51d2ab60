use heapless::Vec;
use log::debug;

use super::commands::{Command, HeadAxis};
use crate::config::{
    HEAD_DEFAULT, HEAD_MIN_DELTA, HEAD_PAN_MAX, HEAD_PAN_MIN, HEAD_TILT_MAX, HEAD_TILT_MIN,
};

/// One head servo as the panel sees it: the last angle actually sent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadServo {
    axis: HeadAxis,
    angle: f64,
    min: f64,
    max: f64,
}

impl HeadServo {
    pub fn new(axis: HeadAxis, min: f64, max: f64) -> Self {
        Self {
            axis,
            angle: HEAD_DEFAULT.clamp(min, max),
            min,
            max,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Requests a new angle in degrees.
    ///
    /// The angle is clamped to the servo range first. Returns the command to
    /// send, or `None` when the change from the last sent angle is under
    /// [`HEAD_MIN_DELTA`].
    pub fn set_angle(&mut self, angle: f64) -> Option<Command> {
        if angle.is_nan() {
            return None;
        }
        let angle = angle.clamp(self.min, self.max);

        //Avoid sending the same angle again
        if (angle - self.angle).abs() < HEAD_MIN_DELTA {
            debug!("head {:?} ignoring {angle} (last sent {})", self.axis, self.angle);
            return None;
        }
        self.angle = angle;

        Some(Command::Head {
            axis: self.axis,
            value: angle.round() as i32,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadState {
    pub tilt: HeadServo,
    pub pan: HeadServo,
}

impl Default for HeadState {
    fn default() -> Self {
        Self {
            tilt: HeadServo::new(HeadAxis::Tilt, HEAD_TILT_MIN, HEAD_TILT_MAX),
            pan: HeadServo::new(HeadAxis::Pan, HEAD_PAN_MIN, HEAD_PAN_MAX),
        }
    }
}

impl HeadState {
    /// Each axis is evaluated on its own and yields at most one command.
    pub fn set(&mut self, tilt: f64, pan: f64) -> Vec<Command, 2> {
        let mut out = Vec::new();
        for cmd in [self.tilt.set_angle(tilt), self.pan.set_angle(pan)]
            .into_iter()
            .flatten()
        {
            // capacity matches the two axes
            let _ = out.push(cmd);
        }
        out
    }
}
