//! Panel application loop.
//!
//! Glues the pure [`Panel`] controller to the backend: fire-and-forget
//! commands go through the dispatch channel, requests whose answer is shown to
//! the operator are awaited directly. Every handler returns the text to
//! display.
use std::sync::Arc;

use log::{info, warn};
use tokio::sync::mpsc::Sender;

use crate::config::{
    PanelConfig, CALIBRATION_POLL_INTERVAL, CALIBRATION_POLL_RETRIES, STEP_ATT_X, STEP_ATT_Y,
    STEP_ATT_Z, STEP_POS_X, STEP_POS_Y, STEP_POS_Z,
};
use crate::display;
use crate::error::{PanelError, Result};
use crate::input::{CalibrationInput, Nudge, PanelInput, HELP};
use crate::panel::{Feature, Panel};
use crate::robot::battery::BatteryReading;
use crate::robot::commands::Command;
use crate::robot::routine::{language_name, voice_is_on, Routine};
use crate::tasks::net_task::Backend;
use crate::tasks::poll_task::{wait_for_calibration_mode, ImuPoller};

/// What the front-end should do after an input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Show(String),
    Quiet,
    Quit,
}

pub struct App {
    panel: Panel,
    backend: Arc<dyn Backend>,
    cmd_sender: Sender<Command>,
    imu: ImuPoller,
}

impl App {
    pub fn new(config: &PanelConfig, backend: Arc<dyn Backend>, cmd_sender: Sender<Command>) -> Self {
        Self {
            panel: Panel::new(config.capabilities),
            imu: ImuPoller::new(backend.clone(), config.imu_poll_interval()),
            backend,
            cmd_sender,
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn imu(&self) -> &ImuPoller {
        &self.imu
    }

    async fn dispatch(&self, cmd: Command) -> Result<()> {
        self.cmd_sender
            .send(cmd)
            .await
            .map_err(|_| PanelError::ChannelClosed)
    }

    /// Backend view of calibration mode; a failed read counts as "off"
    async fn in_calibration_mode(&self) -> bool {
        match self.backend.calibration_mode().await {
            Ok(mode) => mode,
            Err(e) => {
                warn!("calibration_mode check failed: {e}");
                false
            }
        }
    }

    async fn calibration_status(&self) -> String {
        let mode = self.backend.calibration_mode().await.ok();
        display::calibration_lines(&self.panel, mode)
    }

    pub async fn handle(&mut self, input: PanelInput) -> Result<Outcome> {
        match input {
            PanelInput::Move { x, y } => {
                let cmd = self.panel.move_command(x, y);
                self.dispatch(cmd).await?;
                Ok(Outcome::Quiet)
            }
            PanelInput::Gait(gait) => {
                self.panel.set_gait(gait);
                Ok(Outcome::Show(format!("gait {gait}")))
            }
            PanelInput::Action(action) => {
                self.panel.set_action(action);
                Ok(Outcome::Show(format!("action {action}")))
            }
            PanelInput::Speed(speed) => {
                let speed = self.panel.set_speed(speed);
                self.backend.set_speed(speed).await?;
                Ok(Outcome::Show(format!("speed {speed}")))
            }
            PanelInput::Attitude(nudge) => {
                let cmd = match nudge {
                    Nudge::Plane(dir) => {
                        let (x, y) = dir.unit();
                        self.panel.adjust_attitude(x * STEP_ATT_X, y * STEP_ATT_Y)
                    }
                    Nudge::Up => self.panel.adjust_attitude_z(STEP_ATT_Z),
                    Nudge::Down => self.panel.adjust_attitude_z(-STEP_ATT_Z),
                    Nudge::Reset => self.panel.reset_attitude(),
                };
                self.dispatch(cmd).await?;
                Ok(Outcome::Show(format!("attitude {}", self.panel.pose().attitude)))
            }
            PanelInput::Position(nudge) => {
                let cmd = match nudge {
                    Nudge::Plane(dir) => {
                        let (x, y) = dir.unit();
                        self.panel.adjust_position(x * STEP_POS_X, y * STEP_POS_Y)
                    }
                    Nudge::Up => self.panel.adjust_position_z(STEP_POS_Z),
                    Nudge::Down => self.panel.adjust_position_z(-STEP_POS_Z),
                    Nudge::Reset => self.panel.reset_position(),
                };
                self.dispatch(cmd).await?;
                Ok(Outcome::Show(format!("position {}", self.panel.pose().position)))
            }
            PanelInput::Head { tilt, pan } => {
                for cmd in self.panel.set_head(tilt, pan) {
                    self.dispatch(cmd).await?;
                }
                let head = self.panel.head();
                Ok(Outcome::Show(format!(
                    "head tilt {} pan {}",
                    head.tilt.angle(),
                    head.pan.angle()
                )))
            }
            PanelInput::ToggleImu => {
                let on = self.imu.toggle();
                Ok(Outcome::Show(format!("IMU polling {}", display::on_off(on))))
            }
            PanelInput::Battery => {
                let cmd = self.panel.battery_query()?;
                let result = self.backend.send_command(&cmd).await?;
                let battery = BatteryReading::from_result(&result)?;
                Ok(Outcome::Show(display::battery_lines(&battery)))
            }
            PanelInput::Calibration(calib) => self.handle_calibration(calib).await,
            PanelInput::Led { leds, color, mode } => {
                let config = self.panel.led_config(&leds.numbers(), color, mode)?;
                let text = if self.backend.led_config(&config).await? {
                    let list: Vec<String> = config.leds.iter().map(u8::to_string).collect();
                    format!(
                        "Applied {mode} mode {} to LEDs {}",
                        config.color.to_hex(),
                        list.join(", ")
                    )
                } else {
                    "Failed to apply LED configuration".to_string()
                };
                Ok(Outcome::Show(text))
            }
            PanelInput::LedOff => {
                self.panel.require(Feature::Led)?;
                let text = if self.backend.led_off().await? {
                    "All LEDs turned off"
                } else {
                    "Failed to turn off LEDs"
                };
                Ok(Outcome::Show(text.to_string()))
            }
            PanelInput::Voice(action) => {
                self.panel.require(Feature::Voice)?;
                match self.backend.voice(action).await? {
                    Some(status) => Ok(Outcome::Show(format!(
                        "voice {}",
                        display::on_off(voice_is_on(&status))
                    ))),
                    None => Ok(Outcome::Quiet),
                }
            }
            PanelInput::Language(code) => {
                self.panel.require(Feature::Language)?;
                let reply = self.backend.switch_language(&code).await?;
                let shown = language_name(reply.language.as_deref().unwrap_or(&code));
                if reply.switched() {
                    info!("language switched to {shown}");
                    Ok(Outcome::Show(format!("Language switched to {shown}")))
                } else {
                    warn!(
                        "language switch failed: {}",
                        reply.reason.as_deref().unwrap_or("no reason given")
                    );
                    Ok(Outcome::Show(format!("Failed to switch to {shown}")))
                }
            }
            PanelInput::Routine(routine) => {
                self.backend.run_routine(&routine).await?;
                Ok(Outcome::Show(format!("routine {routine} triggered")))
            }
            PanelInput::Servo { channel, angle } => {
                let cmd = self.panel.servo_diagnostic(channel, angle);
                self.dispatch(cmd).await?;
                Ok(Outcome::Quiet)
            }
            PanelInput::ServoPoints => {
                let points = self.backend.load_point_txt().await?;
                Ok(Outcome::Show(display::servo_points_lines(&points)))
            }
            PanelInput::Raw(cmd) => {
                info!("raw command {cmd}");
                self.dispatch(cmd).await?;
                Ok(Outcome::Quiet)
            }
            PanelInput::Status => {
                let status = self.backend.status().await?;
                Ok(Outcome::Show(display::status_line(&status)))
            }
            PanelInput::Show => Ok(Outcome::Show(format!(
                "{}\n{}",
                display::pose_lines(&self.panel),
                display::imu_line(&self.imu.latest(), self.panel.capabilities())
            ))),
            PanelInput::Help => Ok(Outcome::Show(HELP.to_string())),
            PanelInput::Quit => {
                self.imu.stop();
                Ok(Outcome::Quit)
            }
        }
    }

    async fn handle_calibration(&mut self, input: CalibrationInput) -> Result<Outcome> {
        self.panel.require(Feature::Calibration)?;
        match input {
            CalibrationInput::Prepare | CalibrationInput::Exit => {
                let (routine, target) = if input == CalibrationInput::Prepare {
                    (Routine::PrepCalibration, true)
                } else {
                    (Routine::ExitCalibration, false)
                };
                self.backend.run_routine(&routine).await?;
                wait_for_calibration_mode(
                    self.backend.as_ref(),
                    target,
                    CALIBRATION_POLL_INTERVAL,
                    CALIBRATION_POLL_RETRIES,
                )
                .await;
                Ok(Outcome::Show(self.calibration_status().await))
            }
            CalibrationInput::Load => {
                let points = self.backend.calibration().await?;
                self.panel.load_calibration(&points)?;
                Ok(Outcome::Show(self.calibration_status().await))
            }
            CalibrationInput::Status => Ok(Outcome::Show(self.calibration_status().await)),
            CalibrationInput::Select(leg) => {
                self.panel.select_leg(leg)?;
                let offset = self.panel.calibration().offset(leg);
                Ok(Outcome::Show(format!("leg {leg} {offset}")))
            }
            CalibrationInput::Nudge(axis, delta) => {
                if !self.in_calibration_mode().await {
                    return Err(PanelError::NotInCalibrationMode);
                }
                let cmd = self.panel.nudge_calibration(axis, delta)?;
                self.dispatch(cmd).await?;
                let leg = self.panel.calibration().selected();
                Ok(Outcome::Show(format!(
                    "leg {leg} {}",
                    self.panel.calibration().offset(leg)
                )))
            }
            CalibrationInput::Save => {
                if !self.in_calibration_mode().await {
                    return Err(PanelError::NotInCalibrationMode);
                }
                let cmd = self.panel.save_calibration()?;
                self.dispatch(cmd).await?;
                Ok(Outcome::Show("Saved!".to_string()))
            }
        }
    }
}
