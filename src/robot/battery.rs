use serde_json::Value;

use super::commands::CMD_BATTERY;
use crate::config::{
    BATTERY_CRITICAL_VOLTAGE, BATTERY_LOW_VOLTAGE, BATTERY_MAX_VOLTAGE, BATTERY_MIN_VOLTAGE,
};
use crate::error::PanelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryLevel {
    Critical,
    Low,
    Ok,
}

impl BatteryLevel {
    pub fn from_voltage(voltage: f64) -> Self {
        if voltage < BATTERY_CRITICAL_VOLTAGE {
            BatteryLevel::Critical
        } else if voltage < BATTERY_LOW_VOLTAGE {
            BatteryLevel::Low
        } else {
            BatteryLevel::Ok
        }
    }
}

/// Fill percentage of a battery bar, 0..=100
pub fn charge_percent(voltage: f64) -> f64 {
    let span = BATTERY_MAX_VOLTAGE - BATTERY_MIN_VOLTAGE;
    (((voltage - BATTERY_MIN_VOLTAGE) / span) * 100.0).clamp(0.0, 100.0)
}

/// Servo supply and Raspberry Pi supply voltages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryReading {
    pub load: f64,
    pub raspi: f64,
}

impl BatteryReading {
    /// Parses the `result` of a `CMD_BATTERY` command:
    /// `["CMD_BATTERY", "<load volts>", "<raspi volts>"]`.
    pub fn from_result(result: &Value) -> Result<Self, PanelError> {
        let unexpected = || PanelError::UnexpectedResponse(format!("battery result {result}"));

        let items = result.as_array().ok_or_else(unexpected)?;
        if items.len() != 3 || items[0].as_str() != Some(CMD_BATTERY) {
            return Err(unexpected());
        }
        let volts = |v: &Value| -> Option<f64> {
            match v {
                Value::String(s) => s.trim().parse().ok(),
                Value::Number(n) => n.as_f64(),
                _ => None,
            }
        };
        Ok(Self {
            load: volts(&items[1]).ok_or_else(unexpected)?,
            raspi: volts(&items[2]).ok_or_else(unexpected)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_battery_result() {
        let reading = BatteryReading::from_result(&json!(["CMD_BATTERY", "7.42", "5.10"])).unwrap();
        assert_eq!(reading.load, 7.42);
        assert_eq!(reading.raspi, 5.10);
    }

    #[test]
    fn rejects_unexpected_shapes() {
        for bad in [
            json!(null),
            json!(["CMD_BATTERY", "7.4"]),
            json!(["CMD_HEAD", "7.4", "5.0"]),
            json!(["CMD_BATTERY", "seven", "5.0"]),
        ] {
            assert!(BatteryReading::from_result(&bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn percent_is_bounded() {
        assert_eq!(charge_percent(4.0), 0.0);
        assert_eq!(charge_percent(9.0), 100.0);
        assert!((charge_percent(6.7) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn levels_follow_thresholds() {
        assert_eq!(BatteryLevel::from_voltage(5.9), BatteryLevel::Critical);
        assert_eq!(BatteryLevel::from_voltage(6.0), BatteryLevel::Low);
        assert_eq!(BatteryLevel::from_voltage(7.0), BatteryLevel::Ok);
    }
}
