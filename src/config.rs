//! Panel constants and runtime configuration.
//!
//! Ranges and step sizes are fixed by the robot backend and live here as
//! constants. Everything that varies between installations (backend address,
//! polling periods, enabled features) lives in [`PanelConfig`], which is read
//! from an optional TOML file.
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PanelError, Result};
use crate::robot::state::AxisRange;

// POSE RANGES
pub const ATTITUDE_RANGE: AxisRange = AxisRange::new(-15, 15);
pub const POSITION_XY_RANGE: AxisRange = AxisRange::new(-40, 40);
pub const POSITION_Z_RANGE: AxisRange = AxisRange::new(-20, 20);

// HEAD
pub const HEAD_TILT_MIN: f64 = 50.0;
pub const HEAD_TILT_MAX: f64 = 180.0;
pub const HEAD_PAN_MIN: f64 = 0.0;
pub const HEAD_PAN_MAX: f64 = 180.0;
pub const HEAD_DEFAULT: f64 = 90.0;
/// Smallest change on a head axis that is worth sending
pub const HEAD_MIN_DELTA: f64 = 1.0;

// NUDGE STEPS
pub const STEP_ATT_X: i32 = 3;
pub const STEP_ATT_Y: i32 = 3;
pub const STEP_ATT_Z: i32 = 3;
pub const STEP_POS_X: i32 = 5;
pub const STEP_POS_Y: i32 = 5;
pub const STEP_POS_Z: i32 = 4;

// MOVE
pub const MOVE_COMPONENT_RANGE: AxisRange = AxisRange::new(-35, 35);
pub const SPEED_MIN: u8 = 2;
pub const SPEED_MAX: u8 = 10;
pub const SPEED_DEFAULT: u8 = 8;
pub const TURN_CODE_LIMIT: i32 = 10;

// CALIBRATION
pub const CALIBRATION_DEFAULT: [i32; 3] = [0, 72, 0];
pub const CALIBRATION_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub const CALIBRATION_POLL_RETRIES: u32 = 10;

// BATTERY
pub const BATTERY_MIN_VOLTAGE: f64 = 5.0;
pub const BATTERY_MAX_VOLTAGE: f64 = 8.4;
pub const BATTERY_CRITICAL_VOLTAGE: f64 = 6.0;
pub const BATTERY_LOW_VOLTAGE: f64 = 7.0;

// LED
pub const LED_COUNT: u8 = 7;

// DIAGNOSTIC SERVO CHANNELS
pub const SERVO_CHANNEL_MAX: u8 = 31;
pub const SERVO_ANGLE_MAX: u8 = 180;

pub const CMD_CHANNEL_SIZE: usize = 16;

/// Environment variable overriding [`PanelConfig::backend_url`]
pub const BACKEND_URL_ENV: &str = "SPIDER_PANEL_URL";

/// Top-level panel configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    /// Base URL of the robot web server, e.g. `http://spider.local:5000`
    pub backend_url: String,
    /// Per-request timeout
    pub request_timeout_ms: u64,
    /// Period of the IMU poller
    pub imu_poll_interval_ms: u64,
    pub capabilities: Capabilities,
}

/// Features a given robot build exposes. Intents needing a disabled
/// feature are refused before anything is sent.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Capabilities {
    pub yaw: bool,
    pub calibration: bool,
    pub battery: bool,
    pub led: bool,
    pub voice: bool,
    pub language: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            yaw: true,
            calibration: true,
            battery: true,
            led: true,
            voice: true,
            language: true,
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_ms: 2000,
            imu_poll_interval_ms: 1000,
            capabilities: Capabilities::default(),
        }
    }
}

impl PanelConfig {
    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| PanelError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        if config.backend_url.trim().is_empty() {
            return Err(PanelError::Config("backend_url is empty".into()));
        }
        Ok(config)
    }

    /// Apply the environment override for the backend address, if any.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                self.backend_url = url;
            }
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn imu_poll_interval(&self) -> Duration {
        Duration::from_millis(self.imu_poll_interval_ms.max(1))
    }
}
