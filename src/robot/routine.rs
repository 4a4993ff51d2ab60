//! Named routines and voice/language settings triggered on the backend.
use core::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routine {
    StopMotion,
    StartSonic,
    StopSonic,
    TurnLeft,
    TurnRight,
    PrepCalibration,
    ExitCalibration,
    StartServoTest,
    StopServoTest,
    /// Any other routine name, sent verbatim
    Named(String),
}

impl Routine {
    pub fn name(&self) -> &str {
        match self {
            Routine::StopMotion => "sys_stop_motion",
            Routine::StartSonic => "sys_start_sonic",
            Routine::StopSonic => "sys_stop_sonic",
            Routine::TurnLeft => "routine_turn_left",
            Routine::TurnRight => "routine_turn_right",
            Routine::PrepCalibration => "sys_prep_calibration",
            Routine::ExitCalibration => "sys_exit_calibration",
            Routine::StartServoTest => "sys_start_servo_test",
            Routine::StopServoTest => "sys_stop_servo_test",
            Routine::Named(name) => name,
        }
    }
}

impl Display for Routine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Routine {
    fn from(value: &str) -> Self {
        match value {
            "sys_stop_motion" => Routine::StopMotion,
            "sys_start_sonic" => Routine::StartSonic,
            "sys_stop_sonic" => Routine::StopSonic,
            "routine_turn_left" => Routine::TurnLeft,
            "routine_turn_right" => Routine::TurnRight,
            "sys_prep_calibration" => Routine::PrepCalibration,
            "sys_exit_calibration" => Routine::ExitCalibration,
            "sys_start_servo_test" => Routine::StartServoTest,
            "sys_stop_servo_test" => Routine::StopServoTest,
            other => Routine::Named(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceAction {
    Start,
    Stop,
}

impl VoiceAction {
    pub fn as_str(self) -> &'static str {
        match self {
            VoiceAction::Start => "start",
            VoiceAction::Stop => "stop",
        }
    }
}

/// `"started"` is the only status that means voice control is running
pub fn voice_is_on(status: &str) -> bool {
    status == "started"
}

const LANGUAGES: [(&str, &str); 8] = [
    ("en", "English"),
    ("de", "Deutsch"),
    ("fr", "Français"),
    ("es", "Español"),
    ("pl", "Polski"),
    ("pt", "Português"),
    ("hi", "हिंदी"),
    ("eo", "Esperanto"),
];

/// Display name of a language code; unknown codes are shown upper-cased
pub fn language_name(code: &str) -> String {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_routines_round_trip_by_name() {
        for routine in [
            Routine::StopMotion,
            Routine::TurnRight,
            Routine::PrepCalibration,
            Routine::StopServoTest,
        ] {
            assert_eq!(Routine::from(routine.name()), routine);
        }
        assert_eq!(Routine::from("wave_hello").name(), "wave_hello");
    }

    #[test]
    fn voice_status_mapping() {
        assert!(voice_is_on("started"));
        assert!(!voice_is_on("stopped"));
        assert!(!voice_is_on(""));
    }

    #[test]
    fn language_names() {
        assert_eq!(language_name("de"), "Deutsch");
        assert_eq!(language_name("it"), "IT");
    }
}
