//! In-memory backend for unit tests.
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::net_task::{Backend, ImuReading, LanguageReply, RobotStatus};
use crate::error::{PanelError, Result};
use crate::robot::commands::Command;
use crate::robot::gait::Speed;
use crate::robot::led::LedConfig;
use crate::robot::routine::{Routine, VoiceAction};

fn offline() -> PanelError {
    PanelError::Status {
        endpoint: "mock".into(),
        status: 503,
    }
}

#[derive(Default)]
pub struct MockBackend {
    pub commands: Mutex<Vec<String>>,
    pub routines: Mutex<Vec<String>>,
    pub speeds: Mutex<Vec<u8>>,
    pub led_requests: Mutex<Vec<LedConfig>>,
    /// Answers for successive `GET /calibration_mode`; the last one repeats.
    /// `None` simulates a transport failure.
    pub calibration_modes: Mutex<VecDeque<Option<bool>>>,
    pub calibration_mode_calls: Mutex<u32>,
    pub calibration_points: Mutex<Vec<[i32; 3]>>,
    pub imu: Mutex<Option<ImuReading>>,
    pub imu_calls: Mutex<u32>,
    pub battery: Mutex<Value>,
    pub servo_points: Mutex<BTreeMap<u8, i64>>,
}

impl MockBackend {
    pub fn with_calibration_modes(modes: &[Option<bool>]) -> Self {
        let backend = Self::default();
        *backend.calibration_modes.lock().unwrap() = modes.iter().copied().collect();
        backend
    }

    pub fn sent(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn send_command(&self, cmd: &Command) -> Result<Value> {
        self.commands.lock().unwrap().push(cmd.encode());
        if *cmd == Command::Battery {
            return Ok(self.battery.lock().unwrap().clone());
        }
        Ok(Value::Null)
    }

    async fn run_routine(&self, routine: &Routine) -> Result<Value> {
        self.routines.lock().unwrap().push(routine.name().to_string());
        Ok(json!({"status": "ok", "started": routine.name()}))
    }

    async fn voice(&self, action: VoiceAction) -> Result<Option<String>> {
        Ok(Some(match action {
            VoiceAction::Start => "started".into(),
            VoiceAction::Stop => "stopped".into(),
        }))
    }

    async fn switch_language(&self, code: &str) -> Result<LanguageReply> {
        Ok(LanguageReply {
            status: "switched".into(),
            language: Some(code.into()),
            reason: None,
        })
    }

    async fn imu(&self) -> Result<ImuReading> {
        *self.imu_calls.lock().unwrap() += 1;
        self.imu.lock().unwrap().ok_or_else(offline)
    }

    async fn calibration_mode(&self) -> Result<bool> {
        *self.calibration_mode_calls.lock().unwrap() += 1;
        let mut modes = self.calibration_modes.lock().unwrap();
        let answer = if modes.len() > 1 {
            modes.pop_front().flatten()
        } else {
            modes.front().copied().flatten()
        };
        answer.ok_or_else(offline)
    }

    async fn calibration(&self) -> Result<Vec<[i32; 3]>> {
        Ok(self.calibration_points.lock().unwrap().clone())
    }

    async fn set_speed(&self, speed: Speed) -> Result<()> {
        self.speeds.lock().unwrap().push(speed.get());
        Ok(())
    }

    async fn led_config(&self, config: &LedConfig) -> Result<bool> {
        self.led_requests.lock().unwrap().push(config.clone());
        Ok(true)
    }

    async fn led_off(&self) -> Result<bool> {
        Ok(true)
    }

    async fn status(&self) -> Result<RobotStatus> {
        Ok(RobotStatus::default())
    }

    async fn load_point_txt(&self) -> Result<BTreeMap<u8, i64>> {
        Ok(self.servo_points.lock().unwrap().clone())
    }
}
