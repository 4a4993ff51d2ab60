//! Panel controller.
//!
//! [`Panel`] is the single owner of the client-side robot state: body pose,
//! head, move settings and the calibration table. Its methods are synchronous
//! and side-effect free apart from updating that state; they return the
//! commands or request bodies the caller should send.
use heapless::Vec as HVec;
use log::debug;

use crate::config::{Capabilities, SERVO_ANGLE_MAX, SERVO_CHANNEL_MAX};
use crate::error::{PanelError, Result};
use crate::robot::axis::Axis;
use crate::robot::calibration::CalibrationTable;
use crate::robot::commands::Command;
use crate::robot::gait::{ActionMode, GaitMode, MoveIntent, MoveSettings, Speed};
use crate::robot::head::HeadState;
use crate::robot::led::{LedConfig, LedMode, Rgb};
use crate::robot::leg::Leg;
use crate::robot::state::PoseState;

/// Optional feature groups, matched against [`Capabilities`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Calibration,
    Battery,
    Led,
    Voice,
    Language,
}

impl Feature {
    fn name(self) -> &'static str {
        match self {
            Feature::Calibration => "calibration",
            Feature::Battery => "battery",
            Feature::Led => "LED control",
            Feature::Voice => "voice control",
            Feature::Language => "language switching",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Panel {
    pose: PoseState,
    head: HeadState,
    settings: MoveSettings,
    calibration: CalibrationTable,
    capabilities: Capabilities,
}

impl Panel {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            pose: PoseState::default(),
            head: HeadState::default(),
            settings: MoveSettings::default(),
            calibration: CalibrationTable::default(),
            capabilities,
        }
    }

    pub fn pose(&self) -> PoseState {
        self.pose
    }

    pub fn head(&self) -> &HeadState {
        &self.head
    }

    pub fn settings(&self) -> MoveSettings {
        self.settings
    }

    pub fn calibration(&self) -> &CalibrationTable {
        &self.calibration
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn require(&self, feature: Feature) -> Result<()> {
        let caps = &self.capabilities;
        let enabled = match feature {
            Feature::Calibration => caps.calibration,
            Feature::Battery => caps.battery,
            Feature::Led => caps.led,
            Feature::Voice => caps.voice,
            Feature::Language => caps.language,
        };
        if enabled {
            Ok(())
        } else {
            Err(PanelError::Unsupported(feature.name()))
        }
    }

    // --- move ---

    pub fn set_gait(&mut self, gait: GaitMode) {
        self.settings.gait = gait;
    }

    pub fn set_action(&mut self, action: ActionMode) {
        self.settings.action = action;
    }

    pub fn set_speed(&mut self, speed: i64) -> Speed {
        self.settings.speed = Speed::new(speed);
        self.settings.speed
    }

    pub fn move_command(&self, x: i32, y: i32) -> Command {
        let intent = MoveIntent::new(x, y, self.settings);
        debug!("move intent {intent:?}");
        Command::Move(intent)
    }

    // --- body pose ---

    fn update_pose(&mut self, pose: PoseState) {
        debug_assert!(pose.is_within_limits(), "pose left its clamp ranges: {pose:?}");
        self.pose = pose;
    }

    pub fn adjust_attitude(&mut self, dx: i32, dy: i32) -> Command {
        self.update_pose(self.pose.nudged_attitude(dx, dy));
        Command::Attitude(self.pose.attitude)
    }

    pub fn adjust_attitude_z(&mut self, dz: i32) -> Command {
        self.update_pose(self.pose.nudged_attitude_z(dz));
        Command::Attitude(self.pose.attitude)
    }

    pub fn reset_attitude(&mut self) -> Command {
        self.update_pose(self.pose.with_attitude_reset());
        Command::Attitude(self.pose.attitude)
    }

    pub fn adjust_position(&mut self, dx: i32, dy: i32) -> Command {
        self.update_pose(self.pose.nudged_position(dx, dy));
        Command::Position(self.pose.position)
    }

    pub fn adjust_position_z(&mut self, dz: i32) -> Command {
        self.update_pose(self.pose.nudged_position_z(dz));
        Command::Position(self.pose.position)
    }

    pub fn reset_position(&mut self) -> Command {
        self.update_pose(self.pose.with_position_reset());
        Command::Position(self.pose.position)
    }

    pub fn set_head(&mut self, tilt: f64, pan: f64) -> HVec<Command, 2> {
        self.head.set(tilt, pan)
    }

    // --- calibration ---

    pub fn select_leg(&mut self, leg: Leg) -> Result<()> {
        self.require(Feature::Calibration)?;
        self.calibration.select(leg);
        Ok(())
    }

    /// Caller must have confirmed the robot is in calibration mode
    pub fn nudge_calibration(&mut self, axis: Axis, delta: i32) -> Result<Command> {
        self.require(Feature::Calibration)?;
        Ok(self.calibration.nudge(axis, delta))
    }

    pub fn save_calibration(&self) -> Result<Command> {
        self.require(Feature::Calibration)?;
        Ok(Command::CalibrationSave)
    }

    pub fn load_calibration(&mut self, points: &[[i32; 3]]) -> Result<()> {
        self.require(Feature::Calibration)?;
        self.calibration.load(points)
    }

    // --- auxiliary ---

    pub fn battery_query(&self) -> Result<Command> {
        self.require(Feature::Battery)?;
        Ok(Command::Battery)
    }

    pub fn led_config(&self, leds: &[u8], color: Rgb, mode: LedMode) -> Result<LedConfig> {
        self.require(Feature::Led)?;
        LedConfig::new(leds, color, mode)
    }

    pub fn servo_diagnostic(&self, channel: i64, angle: i64) -> Command {
        Command::DiagSetServo {
            channel: channel.clamp(0, SERVO_CHANNEL_MAX as i64) as u8,
            angle: angle.clamp(0, SERVO_ANGLE_MAX as i64) as u8,
        }
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new(Capabilities::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::state::Vec3;

    #[test]
    fn attitude_commands_carry_full_triple() {
        let mut panel = Panel::default();
        assert_eq!(panel.adjust_attitude(3, -5).encode(), "CMD_ATTITUDE#3#-5#0");
        assert_eq!(panel.adjust_attitude_z(10).encode(), "CMD_ATTITUDE#3#-5#10");
        assert_eq!(panel.reset_attitude().encode(), "CMD_ATTITUDE#0#0#0");
    }

    #[test]
    fn position_commands_saturate() {
        let mut panel = Panel::default();
        for _ in 0..20 {
            panel.adjust_position(5, -5);
            panel.adjust_position_z(4);
        }
        assert_eq!(panel.pose().position, Vec3::new(40, -40, 20));
        assert_eq!(panel.reset_position().encode(), "CMD_POSITION#0#0#0");
    }

    #[test]
    fn move_uses_current_settings() {
        let mut panel = Panel::default();
        panel.set_gait(GaitMode::Ripple);
        panel.set_action(ActionMode::Steer);
        assert_eq!(panel.set_speed(12).get(), 10);
        assert_eq!(panel.move_command(-35, 0).encode(), "CMD_MOVE#2#-35#0#10#-10");

        panel.set_action(ActionMode::Translate);
        assert_eq!(panel.move_command(-35, 0).encode(), "CMD_MOVE#2#-35#0#10#0");
    }

    #[test]
    fn head_updates_are_deduplicated() {
        let mut panel = Panel::default();
        assert_eq!(panel.set_head(91.0, 90.0).len(), 1);
        assert!(panel.set_head(91.4, 90.0).is_empty());
        assert_eq!(panel.set_head(92.0, 90.0).len(), 1);
    }

    #[test]
    fn disabled_features_are_refused() {
        let panel = Panel::new(Capabilities {
            led: false,
            battery: false,
            calibration: false,
            ..Capabilities::default()
        });
        assert!(matches!(
            panel.battery_query(),
            Err(PanelError::Unsupported("battery"))
        ));
        assert!(panel.led_config(&[1], Rgb::WHITE, LedMode::Static).is_err());
        assert!(panel.save_calibration().is_err());
        assert!(panel.require(Feature::Voice).is_ok());
    }

    #[test]
    fn calibration_follows_selected_leg() {
        let mut panel = Panel::default();
        panel.select_leg(Leg::Two).unwrap();
        let cmd = panel.nudge_calibration(Axis::Y, 3).unwrap();
        assert_eq!(cmd.encode(), "CMD_CALIBRATION#two#0#75#0");
    }

    #[test]
    fn servo_diagnostic_saturates() {
        let panel = Panel::default();
        assert_eq!(panel.servo_diagnostic(40, -3).encode(), "diag_set_servo#31#0");
    }
}
