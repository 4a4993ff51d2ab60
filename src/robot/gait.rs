//! Gait selection and move intents.
use core::fmt::{self, Display, Formatter};

use crate::config::{MOVE_COMPONENT_RANGE, SPEED_DEFAULT, SPEED_MAX, SPEED_MIN};
use crate::error::PanelError;
use crate::kinematics::steering::turn_code;

/// Locomotion pattern selector, sent as its numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GaitMode {
    #[default]
    Tripod = 1,
    Ripple = 2,
}

impl GaitMode {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Display for GaitMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<u8> for GaitMode {
    type Error = PanelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(GaitMode::Tripod),
            2 => Ok(GaitMode::Ripple),
            other => Err(PanelError::Parse(format!("unknown gait mode {other}"))),
        }
    }
}

/// Whether the joystick steers the body (turn code) or only translates it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionMode {
    #[default]
    Translate = 0,
    Steer = 1,
}

impl Display for ActionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

impl TryFrom<u8> for ActionMode {
    type Error = PanelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ActionMode::Translate),
            1 => Ok(ActionMode::Steer),
            other => Err(PanelError::Parse(format!("unknown action mode {other}"))),
        }
    }
}

/// Gait speed, saturated into [`SPEED_MIN`, `SPEED_MAX`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Speed(u8);

impl Speed {
    pub fn new(value: i64) -> Self {
        Self(value.clamp(SPEED_MIN as i64, SPEED_MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(SPEED_DEFAULT)
    }
}

impl Display for Speed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Move parameters that persist between joystick events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveSettings {
    pub gait: GaitMode,
    pub action: ActionMode,
    pub speed: Speed,
}

/// One joystick event, ready to encode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    pub gait: GaitMode,
    pub x: i32,
    pub y: i32,
    pub speed: Speed,
    pub turn: i32,
}

impl MoveIntent {
    pub fn new(x: i32, y: i32, settings: MoveSettings) -> Self {
        let x = MOVE_COMPONENT_RANGE.clamp(x);
        let y = MOVE_COMPONENT_RANGE.clamp(y);
        Self {
            gait: settings.gait,
            x,
            y,
            speed: settings.speed,
            turn: turn_code(x as f64, y as f64, settings.action),
        }
    }

    /// A move with no translation asks the robot to stand still
    pub fn is_neutral(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_saturates() {
        assert_eq!(Speed::new(0).get(), 2);
        assert_eq!(Speed::new(99).get(), 10);
        assert_eq!(Speed::new(5).get(), 5);
        assert_eq!(Speed::default().get(), 8);
    }

    #[test]
    fn move_intent_uses_settings_and_quantizer() {
        let settings = MoveSettings {
            gait: GaitMode::Ripple,
            action: ActionMode::Steer,
            speed: Speed::new(6),
        };
        let intent = MoveIntent::new(35, 0, settings);
        assert_eq!(intent.turn, 10);
        assert_eq!(intent.gait, GaitMode::Ripple);
        assert_eq!(intent.speed.get(), 6);

        let translate = MoveIntent::new(35, 0, MoveSettings::default());
        assert_eq!(translate.turn, 0);
    }

    #[test]
    fn move_components_are_saturated() {
        let intent = MoveIntent::new(-100, 80, MoveSettings::default());
        assert_eq!((intent.x, intent.y), (-35, 35));
        assert!(!intent.is_neutral());
        assert!(MoveIntent::new(0, 0, MoveSettings::default()).is_neutral());
    }

    #[test]
    fn mode_codes_round_trip() {
        assert_eq!(GaitMode::try_from(2).unwrap(), GaitMode::Ripple);
        assert!(GaitMode::try_from(3).is_err());
        assert_eq!(ActionMode::try_from(1).unwrap(), ActionMode::Steer);
        assert!(ActionMode::try_from(7).is_err());
    }
}
