//! Operator input parsing.
//!
//! The terminal front-end reads one line per action. Lines are whitespace
//! separated tokens, keyboard style: `w`/`a`/`s`/`d` move, `att w` tilts the
//! body forward, `head 120 90` aims the head, and so on. See [`HELP`].
use crate::error::PanelError;
use crate::robot::axis::Axis;
use crate::robot::commands::Command;
use crate::robot::gait::{ActionMode, GaitMode};
use crate::robot::led::{LedMode, Rgb};
use crate::robot::leg::Leg;
use crate::robot::routine::{Routine, VoiceAction};

pub const HELP: &str = "\
w/a/s/d, x          move forward/left/back/right, stand still
mv <x> <y>          move with an explicit vector
gait <1|2>          tripod or ripple gait
action <0|1>        translate or steer
speed <2..10>       gait speed
att <w|a|s|d|+|-|0> body attitude nudge or reset
pos <w|a|s|d|+|-|0> body position nudge or reset
head <tilt> <pan>   aim the head
imu                 toggle IMU polling
bat                 query battery
calib prep|exit|load|save|status|leg <n>|<x|y|z> <delta>
led <n,n,..|all> <#rrggbb|rgb r g b> [static|flash|glow], led off
voice start|stop    voice control
lang <code>         switch voice language
turn left|right, sonic on|off, servotest on|off, stop
servo <channel> <angle>, servo load
raw <CMD_...>       send a command line as is
routine <name>      run any backend routine
status, show, help, quit";

/// Max joystick deflection used by the single-key moves
const FULL_STICK: i32 = 35;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

impl Direction {
    /// Unit vector, +y forward and +x right
    pub fn unit(self) -> (i32, i32) {
        match self {
            Direction::Forward => (0, 1),
            Direction::Back => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" => Some(Direction::Forward),
            "s" => Some(Direction::Back),
            "a" => Some(Direction::Left),
            "d" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Body-pose nudge requested from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Plane(Direction),
    Up,
    Down,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedSelection {
    All,
    /// Bitmask of 1-based LED numbers, bit n for LED n
    Some(u8),
}

impl LedSelection {
    pub fn numbers(self) -> Vec<u8> {
        match self {
            LedSelection::All => (1..=crate::config::LED_COUNT).collect(),
            LedSelection::Some(mask) => (1..=crate::config::LED_COUNT)
                .filter(|n| mask & (1 << n) != 0)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalibrationInput {
    Prepare,
    Exit,
    Load,
    Save,
    Status,
    Select(Leg),
    Nudge(Axis, i32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelInput {
    Move { x: i32, y: i32 },
    Gait(GaitMode),
    Action(ActionMode),
    Speed(i64),
    Attitude(Nudge),
    Position(Nudge),
    Head { tilt: f64, pan: f64 },
    ToggleImu,
    Battery,
    Calibration(CalibrationInput),
    Led {
        leds: LedSelection,
        color: Rgb,
        mode: LedMode,
    },
    LedOff,
    Voice(VoiceAction),
    Language(String),
    Routine(Routine),
    Servo { channel: i64, angle: i64 },
    ServoPoints,
    Raw(Command),
    Status,
    Show,
    Help,
    Quit,
}

fn arg<T: core::str::FromStr>(token: Option<&str>, what: &str) -> Result<T, PanelError> {
    let raw = token.ok_or_else(|| PanelError::Parse(format!("missing {what}")))?;
    raw.parse::<T>()
        .map_err(|_| PanelError::Parse(format!("bad {what}: {raw:?}")))
}

fn on_off(token: Option<&str>) -> Result<bool, PanelError> {
    match token {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        other => Err(PanelError::Parse(format!("expected on|off, got {other:?}"))),
    }
}

fn nudge(token: Option<&str>) -> Result<Nudge, PanelError> {
    match token {
        Some("+") => Ok(Nudge::Up),
        Some("-") => Ok(Nudge::Down),
        Some("0") => Ok(Nudge::Reset),
        Some(key) => Direction::from_key(key)
            .map(Nudge::Plane)
            .ok_or_else(|| PanelError::Parse(format!("bad nudge {key:?}"))),
        None => Err(PanelError::Parse("missing nudge".into())),
    }
}

fn led_selection(token: Option<&str>) -> Result<LedSelection, PanelError> {
    match token {
        Some("all") => Ok(LedSelection::All),
        Some(list) => {
            let mut mask = 0u8;
            for n in list.split(',').filter(|s| !s.is_empty()) {
                let n: u8 = n
                    .parse()
                    .map_err(|_| PanelError::Parse(format!("bad LED number {n:?}")))?;
                if (1..=crate::config::LED_COUNT).contains(&n) {
                    mask |= 1 << n;
                }
            }
            Ok(LedSelection::Some(mask))
        }
        None => Err(PanelError::Parse("missing LED list".into())),
    }
}

fn calibration(mut tokens: core::str::SplitWhitespace<'_>) -> Result<CalibrationInput, PanelError> {
    match tokens.next() {
        Some("prep") => Ok(CalibrationInput::Prepare),
        Some("exit") => Ok(CalibrationInput::Exit),
        Some("load") => Ok(CalibrationInput::Load),
        Some("save") => Ok(CalibrationInput::Save),
        Some("status") => Ok(CalibrationInput::Status),
        Some("leg") => Ok(CalibrationInput::Select(arg(tokens.next(), "leg")?)),
        Some(axis) => {
            let axis: Axis = axis.parse()?;
            Ok(CalibrationInput::Nudge(axis, arg(tokens.next(), "delta")?))
        }
        None => Err(PanelError::Parse("missing calibration action".into())),
    }
}

impl TryFrom<&str> for PanelInput {
    type Error = PanelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut tokens = value.split_whitespace();
        let cmd = tokens
            .next()
            .ok_or_else(|| PanelError::Parse("empty input".into()))?;

        if let Some(dir) = Direction::from_key(cmd) {
            let (x, y) = dir.unit();
            return Ok(PanelInput::Move {
                x: x * FULL_STICK,
                y: y * FULL_STICK,
            });
        }

        match cmd {
            "x" => Ok(PanelInput::Move { x: 0, y: 0 }),
            "mv" => Ok(PanelInput::Move {
                x: arg(tokens.next(), "x")?,
                y: arg(tokens.next(), "y")?,
            }),
            "gait" => Ok(PanelInput::Gait(GaitMode::try_from(arg::<u8>(
                tokens.next(),
                "gait",
            )?)?)),
            "action" => Ok(PanelInput::Action(ActionMode::try_from(arg::<u8>(
                tokens.next(),
                "action",
            )?)?)),
            "speed" => Ok(PanelInput::Speed(arg(tokens.next(), "speed")?)),
            "att" => Ok(PanelInput::Attitude(nudge(tokens.next())?)),
            "pos" => Ok(PanelInput::Position(nudge(tokens.next())?)),
            "head" => Ok(PanelInput::Head {
                tilt: arg(tokens.next(), "tilt")?,
                pan: arg(tokens.next(), "pan")?,
            }),
            "imu" => Ok(PanelInput::ToggleImu),
            "bat" => Ok(PanelInput::Battery),
            "calib" => Ok(PanelInput::Calibration(calibration(tokens)?)),
            "led" => {
                let first = tokens.next();
                if first == Some("off") {
                    return Ok(PanelInput::LedOff);
                }
                let leds = led_selection(first)?;
                let color = match tokens.next() {
                    Some("rgb") => Rgb::saturating(
                        arg(tokens.next(), "red")?,
                        arg(tokens.next(), "green")?,
                        arg(tokens.next(), "blue")?,
                    ),
                    Some(hex) => Rgb::from_hex(hex),
                    None => Rgb::WHITE,
                };
                let mode = match tokens.next() {
                    Some(mode) => mode.parse()?,
                    None => LedMode::default(),
                };
                Ok(PanelInput::Led { leds, color, mode })
            }
            "voice" => match tokens.next() {
                Some("start") => Ok(PanelInput::Voice(VoiceAction::Start)),
                Some("stop") => Ok(PanelInput::Voice(VoiceAction::Stop)),
                other => Err(PanelError::Parse(format!("expected start|stop, got {other:?}"))),
            },
            "lang" => Ok(PanelInput::Language(arg(tokens.next(), "language code")?)),
            "turn" => match tokens.next() {
                Some("left") => Ok(PanelInput::Routine(Routine::TurnLeft)),
                Some("right") => Ok(PanelInput::Routine(Routine::TurnRight)),
                other => Err(PanelError::Parse(format!("invalid turn direction {other:?}"))),
            },
            "sonic" => Ok(PanelInput::Routine(if on_off(tokens.next())? {
                Routine::StartSonic
            } else {
                Routine::StopSonic
            })),
            "servotest" => Ok(PanelInput::Routine(if on_off(tokens.next())? {
                Routine::StartServoTest
            } else {
                Routine::StopServoTest
            })),
            "stop" => Ok(PanelInput::Routine(Routine::StopMotion)),
            "routine" => Ok(PanelInput::Routine(Routine::from(
                tokens
                    .next()
                    .ok_or_else(|| PanelError::Parse("missing routine name".into()))?,
            ))),
            "servo" => match tokens.next() {
                Some("load") => Ok(PanelInput::ServoPoints),
                channel => Ok(PanelInput::Servo {
                    channel: arg(channel, "channel")?,
                    angle: arg(tokens.next(), "angle")?,
                }),
            },
            "raw" => {
                let line = tokens
                    .next()
                    .ok_or_else(|| PanelError::Parse("missing command line".into()))?;
                Ok(PanelInput::Raw(Command::try_from(line)?))
            }
            "status" => Ok(PanelInput::Status),
            "show" => Ok(PanelInput::Show),
            "help" | "?" => Ok(PanelInput::Help),
            "quit" | "q" => Ok(PanelInput::Quit),
            other => Err(PanelError::Parse(format!("unrecognised input {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> PanelInput {
        PanelInput::try_from(line).unwrap()
    }

    #[test]
    fn single_keys_move_at_full_stick() {
        assert_eq!(parse("w"), PanelInput::Move { x: 0, y: 35 });
        assert_eq!(parse("a"), PanelInput::Move { x: -35, y: 0 });
        assert_eq!(parse("x"), PanelInput::Move { x: 0, y: 0 });
        assert_eq!(parse("mv 10 -20"), PanelInput::Move { x: 10, y: -20 });
    }

    #[test]
    fn pose_nudges() {
        assert_eq!(parse("att d"), PanelInput::Attitude(Nudge::Plane(Direction::Right)));
        assert_eq!(parse("pos +"), PanelInput::Position(Nudge::Up));
        assert_eq!(parse("att 0"), PanelInput::Attitude(Nudge::Reset));
        assert!(PanelInput::try_from("att q").is_err());
    }

    #[test]
    fn calibration_inputs() {
        assert_eq!(
            parse("calib leg 3"),
            PanelInput::Calibration(CalibrationInput::Select(Leg::Three))
        );
        assert_eq!(
            parse("calib z -1"),
            PanelInput::Calibration(CalibrationInput::Nudge(Axis::Z, -1))
        );
        assert_eq!(parse("calib prep"), PanelInput::Calibration(CalibrationInput::Prepare));
        assert!(PanelInput::try_from("calib w 1").is_err());
    }

    #[test]
    fn led_inputs() {
        match parse("led 1,3,9 #00ff00 flash") {
            PanelInput::Led { leds, color, mode } => {
                assert_eq!(leds.numbers(), vec![1, 3]);
                assert_eq!(color, Rgb { r: 0, g: 255, b: 0 });
                assert_eq!(mode, LedMode::Flash);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(parse("led off"), PanelInput::LedOff);
        match parse("led all") {
            PanelInput::Led { leds, color, mode } => {
                assert_eq!(leds.numbers().len(), 7);
                assert_eq!(color, Rgb::WHITE);
                assert_eq!(mode, LedMode::Static);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn led_numeric_channels_saturate() {
        match parse("led 4 rgb 300 -20 64 glow") {
            PanelInput::Led { leds, color, mode } => {
                assert_eq!(leds.numbers(), vec![4]);
                assert_eq!(color, Rgb { r: 255, g: 0, b: 64 });
                assert_eq!(mode, LedMode::Glow);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(PanelInput::try_from("led 4 rgb 1 2").is_err());
    }

    #[test]
    fn servo_inputs() {
        assert_eq!(parse("servo load"), PanelInput::ServoPoints);
        assert_eq!(parse("servo 12 90"), PanelInput::Servo { channel: 12, angle: 90 });
        assert!(PanelInput::try_from("servo").is_err());
    }

    #[test]
    fn raw_lines_go_through_the_command_parser() {
        assert_eq!(
            parse("raw CMD_HEAD#1#120"),
            PanelInput::Raw(Command::Head {
                axis: crate::robot::commands::HeadAxis::Pan,
                value: 120
            })
        );
        assert!(PanelInput::try_from("raw CMD_MOVE#1#0#0#99#0").is_err());
        assert!(PanelInput::try_from("raw").is_err());
    }

    #[test]
    fn routines_and_toggles() {
        assert_eq!(parse("turn left"), PanelInput::Routine(Routine::TurnLeft));
        assert_eq!(parse("sonic off"), PanelInput::Routine(Routine::StopSonic));
        assert_eq!(parse("stop"), PanelInput::Routine(Routine::StopMotion));
        assert_eq!(
            parse("routine wave"),
            PanelInput::Routine(Routine::Named("wave".into()))
        );
        assert!(PanelInput::try_from("turn up").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(PanelInput::try_from("").is_err());
        assert!(PanelInput::try_from("fly").is_err());
        assert!(PanelInput::try_from("gait 5").is_err());
        assert!(PanelInput::try_from("head 90").is_err());
    }
}
