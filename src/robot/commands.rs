//! Command strings understood by the robot backend.
//!
//! Every command is a `#`-delimited line whose first field names the verb and
//! whose other fields are decimal integers or fixed identifiers. No escaping
//! exists for `#`, so nothing free-form is ever encoded.
//!
//! [`Command`] encodes through [`Display`] and parses back with
//! [`TryFrom<&str>`], which backs the operator's `raw` input. Parsing is
//! strict: a field outside the range the panel itself would encode is an
//! error, never saturated.
use core::fmt::{self, Display, Formatter};

use super::gait::{GaitMode, MoveIntent, Speed};
use super::leg::Leg;
use super::state::{AxisRange, Vec3};
use crate::config::{MOVE_COMPONENT_RANGE, SPEED_MAX, SPEED_MIN, TURN_CODE_LIMIT};
use crate::error::PanelError;

pub const CMD_MOVE: &str = "CMD_MOVE";
pub const CMD_ATTITUDE: &str = "CMD_ATTITUDE";
pub const CMD_POSITION: &str = "CMD_POSITION";
pub const CMD_HEAD: &str = "CMD_HEAD";
pub const CMD_CALIBRATION: &str = "CMD_CALIBRATION";
pub const CMD_BATTERY: &str = "CMD_BATTERY";
pub const CMD_DIAG_SERVO: &str = "diag_set_servo";

const SEPARATOR: char = '#';

const TURN_CODE_RANGE: AxisRange = AxisRange::new(-TURN_CODE_LIMIT, TURN_CODE_LIMIT);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadAxis {
    Tilt = 0,
    Pan = 1,
}

impl TryFrom<u8> for HeadAxis {
    type Error = PanelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(HeadAxis::Tilt),
            1 => Ok(HeadAxis::Pan),
            other => Err(PanelError::Parse(format!("unknown head axis {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(MoveIntent),
    Attitude(Vec3),
    Position(Vec3),
    Head { axis: HeadAxis, value: i32 },
    Calibration { leg: Leg, offset: Vec3 },
    CalibrationSave,
    Battery,
    DiagSetServo { channel: u8, angle: u8 },
}

impl Command {
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move(m) => write!(
                f,
                "{CMD_MOVE}#{}#{}#{}#{}#{}",
                m.gait, m.x, m.y, m.speed, m.turn
            ),
            Command::Attitude(v) => write!(f, "{CMD_ATTITUDE}#{}#{}#{}", v.x, v.y, v.z),
            Command::Position(v) => write!(f, "{CMD_POSITION}#{}#{}#{}", v.x, v.y, v.z),
            Command::Head { axis, value } => write!(f, "{CMD_HEAD}#{}#{}", *axis as u8, value),
            Command::Calibration { leg, offset } => write!(
                f,
                "{CMD_CALIBRATION}#{}#{}#{}#{}",
                leg, offset.x, offset.y, offset.z
            ),
            Command::CalibrationSave => write!(f, "{CMD_CALIBRATION}#save"),
            Command::Battery => f.write_str(CMD_BATTERY),
            Command::DiagSetServo { channel, angle } => {
                write!(f, "{CMD_DIAG_SERVO}#{channel}#{angle}")
            }
        }
    }
}

fn field<T: core::str::FromStr>(tokens: &[&str], idx: usize) -> Result<T, PanelError> {
    let raw = tokens
        .get(idx)
        .ok_or_else(|| PanelError::Parse(format!("missing field {idx}")))?;
    raw.parse::<T>()
        .map_err(|_| PanelError::Parse(format!("bad field {idx}: {raw:?}")))
}

fn expect_len(tokens: &[&str], len: usize) -> Result<(), PanelError> {
    if tokens.len() != len {
        return Err(PanelError::Parse(format!(
            "{} expects {} fields, got {}",
            tokens[0],
            len - 1,
            tokens.len() - 1
        )));
    }
    Ok(())
}

fn in_range(tokens: &[&str], idx: usize, range: AxisRange) -> Result<i32, PanelError> {
    let value: i32 = field(tokens, idx)?;
    if !range.contains(value) {
        return Err(PanelError::Parse(format!(
            "field {idx}: {value} outside [{}, {}]",
            range.min, range.max
        )));
    }
    Ok(value)
}

fn triple(tokens: &[&str], first: usize) -> Result<Vec3, PanelError> {
    Ok(Vec3::new(
        field(tokens, first)?,
        field(tokens, first + 1)?,
        field(tokens, first + 2)?,
    ))
}

impl TryFrom<&str> for Command {
    type Error = PanelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let tokens: Vec<&str> = value.trim().split(SEPARATOR).collect();

        match tokens[0] {
            CMD_MOVE => {
                expect_len(&tokens, 6)?;
                let gait = GaitMode::try_from(field::<u8>(&tokens, 1)?)?;
                let speed = field::<i64>(&tokens, 4)?;
                if !(SPEED_MIN as i64..=SPEED_MAX as i64).contains(&speed) {
                    return Err(PanelError::Parse(format!("speed {speed} out of range")));
                }
                Ok(Command::Move(MoveIntent {
                    gait,
                    x: in_range(&tokens, 2, MOVE_COMPONENT_RANGE)?,
                    y: in_range(&tokens, 3, MOVE_COMPONENT_RANGE)?,
                    speed: Speed::new(speed),
                    turn: in_range(&tokens, 5, TURN_CODE_RANGE)?,
                }))
            }
            CMD_ATTITUDE => {
                expect_len(&tokens, 4)?;
                Ok(Command::Attitude(triple(&tokens, 1)?))
            }
            CMD_POSITION => {
                expect_len(&tokens, 4)?;
                Ok(Command::Position(triple(&tokens, 1)?))
            }
            CMD_HEAD => {
                expect_len(&tokens, 3)?;
                Ok(Command::Head {
                    axis: HeadAxis::try_from(field::<u8>(&tokens, 1)?)?,
                    value: field(&tokens, 2)?,
                })
            }
            CMD_CALIBRATION if tokens.get(1) == Some(&"save") => {
                expect_len(&tokens, 2)?;
                Ok(Command::CalibrationSave)
            }
            CMD_CALIBRATION => {
                expect_len(&tokens, 5)?;
                Ok(Command::Calibration {
                    leg: field(&tokens, 1)?,
                    offset: triple(&tokens, 2)?,
                })
            }
            CMD_BATTERY => {
                expect_len(&tokens, 1)?;
                Ok(Command::Battery)
            }
            CMD_DIAG_SERVO => {
                expect_len(&tokens, 3)?;
                Ok(Command::DiagSetServo {
                    channel: field(&tokens, 1)?,
                    angle: field(&tokens, 2)?,
                })
            }
            other => Err(PanelError::Parse(format!("unknown command {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::gait::ActionMode;

    #[test]
    fn encodes_full_attitude_triple() {
        let cmd = Command::Attitude(Vec3::new(3, -5, 10));
        assert_eq!(cmd.encode(), "CMD_ATTITUDE#3#-5#10");
    }

    #[test]
    fn encodes_move_with_turn_code() {
        let intent = MoveIntent::new(
            0,
            35,
            crate::robot::gait::MoveSettings {
                gait: GaitMode::Tripod,
                action: ActionMode::Steer,
                speed: Speed::default(),
            },
        );
        assert_eq!(Command::Move(intent).encode(), "CMD_MOVE#1#0#35#8#0");
    }

    #[test]
    fn encodes_fixed_literals() {
        assert_eq!(Command::CalibrationSave.encode(), "CMD_CALIBRATION#save");
        assert_eq!(Command::Battery.encode(), "CMD_BATTERY");
        assert_eq!(
            Command::Head {
                axis: HeadAxis::Pan,
                value: 120
            }
            .encode(),
            "CMD_HEAD#1#120"
        );
        assert_eq!(
            Command::Calibration {
                leg: Leg::Three,
                offset: Vec3::new(-2, 72, 4)
            }
            .encode(),
            "CMD_CALIBRATION#three#-2#72#4"
        );
        assert_eq!(
            Command::DiagSetServo {
                channel: 15,
                angle: 90
            }
            .encode(),
            "diag_set_servo#15#90"
        );
    }

    #[test]
    fn parses_what_it_encodes() {
        let samples = [
            "CMD_MOVE#2#-35#10#4#-7",
            "CMD_POSITION#40#-40#20",
            "CMD_HEAD#0#50",
            "CMD_CALIBRATION#six#1#70#0",
            "CMD_CALIBRATION#save",
            "CMD_BATTERY",
        ];
        for line in samples {
            let cmd = Command::try_from(line).unwrap();
            assert_eq!(cmd.encode(), line);
        }
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in [
            "",
            "CMD_FLY#1",
            "CMD_ATTITUDE#1#2",
            "CMD_ATTITUDE#1#2#x",
            "CMD_HEAD#2#90",
            "CMD_MOVE#3#0#0#8#0",
            "CMD_CALIBRATION#seven#0#0#0",
            "CMD_BATTERY#now",
        ] {
            assert!(Command::try_from(line).is_err(), "{line:?} should not parse");
        }
    }

    #[test]
    fn move_fields_outside_encodable_range_are_rejected() {
        assert!(Command::try_from("CMD_MOVE#1#0#0#10#0").is_ok());
        for line in [
            "CMD_MOVE#1#0#0#99#0",
            "CMD_MOVE#1#0#0#1#0",
            "CMD_MOVE#1#36#0#8#0",
            "CMD_MOVE#1#0#-36#8#0",
            "CMD_MOVE#1#0#0#8#11",
        ] {
            assert!(Command::try_from(line).is_err(), "{line:?} should not parse");
        }
    }
}
