//! Text rendering for the terminal front-end.
//!
//! Values that could not be read are shown as [`PLACEHOLDER`].
use std::collections::BTreeMap;

use crate::config::Capabilities;
use crate::panel::Panel;
use crate::robot::battery::{charge_percent, BatteryLevel, BatteryReading};
use crate::tasks::net_task::RobotStatus;
use crate::tasks::poll_task::ImuSample;

pub const PLACEHOLDER: &str = "--";

const BAR_WIDTH: usize = 20;

pub fn reading(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn on_off(on: bool) -> &'static str {
    if on {
        "ON"
    } else {
        "OFF"
    }
}

pub fn imu_line(sample: &ImuSample, caps: Capabilities) -> String {
    let pitch = reading(sample.map(|s| s.pitch));
    let roll = reading(sample.map(|s| s.roll));
    if caps.yaw {
        let yaw = reading(sample.and_then(|s| s.yaw));
        format!("IMU pitch {pitch} roll {roll} yaw {yaw}")
    } else {
        format!("IMU pitch {pitch} roll {roll}")
    }
}

fn bar(voltage: f64) -> String {
    let filled = ((charge_percent(voltage) / 100.0) * BAR_WIDTH as f64).round() as usize;
    let level = match BatteryLevel::from_voltage(voltage) {
        BatteryLevel::Critical => "!!",
        BatteryLevel::Low => "! ",
        BatteryLevel::Ok => "  ",
    };
    format!(
        "[{}{}] {voltage:.2} V {level}",
        "#".repeat(filled),
        " ".repeat(BAR_WIDTH - filled)
    )
}

pub fn battery_lines(battery: &BatteryReading) -> String {
    format!("load  {}\nraspi {}", bar(battery.load), bar(battery.raspi))
}

pub fn pose_lines(panel: &Panel) -> String {
    let pose = panel.pose();
    let head = panel.head();
    let settings = panel.settings();
    format!(
        "gait {} action {} speed {}\nattitude {}\nposition {}\nhead tilt {} pan {}",
        settings.gait,
        settings.action,
        settings.speed,
        pose.attitude,
        pose.position,
        head.tilt.angle(),
        head.pan.angle()
    )
}

pub fn calibration_lines(panel: &Panel, mode: Option<bool>) -> String {
    let table = panel.calibration();
    let status = match mode {
        Some(true) => "CALIBRATION MODE ACTIVE",
        Some(false) => "Calibration mode OFF",
        None => PLACEHOLDER,
    };
    let mut out = format!("{status} (leg {} selected)", table.selected());
    for (leg, offset) in crate::robot::leg::Leg::ALL.iter().zip(table.offsets()) {
        out.push_str(&format!("\n  {leg:<5} {offset}"));
    }
    out
}

/// Saved diagnostic angles, one `channel: angle` per line
pub fn servo_points_lines(points: &BTreeMap<u8, i64>) -> String {
    if points.is_empty() {
        return format!("servo points {PLACEHOLDER}");
    }
    points
        .iter()
        .map(|(channel, angle)| format!("servo {channel:>2}: {angle}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn status_line(status: &RobotStatus) -> String {
    format!(
        "tcp {} servos {} calibration {} motion {} sonic {}",
        on_off(status.tcp_active),
        if status.servo_relaxed { "relaxed" } else { "holding" },
        on_off(status.calibration_mode),
        status.motion_state,
        status.sonic_state
    )
}
