//! LED strip configuration requests.
use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::LED_COUNT;
use crate::error::PanelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Builds a color from arbitrary integers, saturating each channel
    pub fn saturating(r: i64, g: i64, b: i64) -> Self {
        let c = |v: i64| v.clamp(0, 255) as u8;
        Self {
            r: c(r),
            g: c(g),
            b: c(b),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parses `#rrggbb` or `rrggbb`. Anything else falls back to white.
    pub fn from_hex(hex: &str) -> Self {
        let hex = hex.trim();
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Self::WHITE;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match (channel(0), channel(2), channel(4)) {
            (Some(r), Some(g), Some(b)) => Self { r, g, b },
            _ => Self::WHITE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedMode {
    #[default]
    Static,
    Flash,
    Glow,
}

impl Display for LedMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LedMode::Static => f.write_str("static"),
            LedMode::Flash => f.write_str("flash"),
            LedMode::Glow => f.write_str("glow"),
        }
    }
}

impl FromStr for LedMode {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(LedMode::Static),
            "flash" => Ok(LedMode::Flash),
            "glow" => Ok(LedMode::Glow),
            other => Err(PanelError::Parse(format!("unknown LED mode {other:?}"))),
        }
    }
}

/// Body of `POST /led_config`. LED numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedConfig {
    pub leds: Vec<u8>,
    pub color: Rgb,
    pub mode: LedMode,
}

impl LedConfig {
    /// Builds a request, dropping LED numbers outside 1..=7 and duplicates.
    /// An empty selection is refused.
    pub fn new(leds: &[u8], color: Rgb, mode: LedMode) -> Result<Self, PanelError> {
        let mut selected: Vec<u8> = leds
            .iter()
            .copied()
            .filter(|n| (1..=LED_COUNT).contains(n))
            .collect();
        selected.sort_unstable();
        selected.dedup();
        if selected.is_empty() {
            return Err(PanelError::NoLedSelected);
        }
        Ok(Self {
            leds: selected,
            color,
            mode,
        })
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hex_conversions() {
        let c = Rgb::from_hex("#ff8000");
        assert_eq!(c, Rgb { r: 255, g: 128, b: 0 });
        assert_eq!(c.to_hex(), "#ff8000");
        assert_eq!(Rgb::from_hex("0A0b0C"), Rgb { r: 10, g: 11, b: 12 });
        assert_eq!(Rgb::from_hex("#zzzzzz"), Rgb::WHITE);
        assert_eq!(Rgb::from_hex("#fff"), Rgb::WHITE);
    }

    #[test]
    fn signed_pairs_and_doubled_hash_are_not_hex() {
        assert_eq!(Rgb::from_hex("#+f+f+f"), Rgb::WHITE);
        assert_eq!(Rgb::from_hex("##ff0000"), Rgb::WHITE);
        assert_eq!(Rgb::from_hex("-1ff00"), Rgb::WHITE);
    }

    #[test]
    fn channels_saturate() {
        assert_eq!(Rgb::saturating(-4, 300, 12), Rgb { r: 0, g: 255, b: 12 });
    }

    #[test]
    fn empty_selection_is_refused() {
        let err = LedConfig::new(&[], Rgb::WHITE, LedMode::Static).unwrap_err();
        assert!(matches!(err, PanelError::NoLedSelected));
        let err = LedConfig::new(&[0, 8], Rgb::WHITE, LedMode::Static).unwrap_err();
        assert!(matches!(err, PanelError::NoLedSelected));
    }

    #[test]
    fn serializes_request_body() {
        let config = LedConfig::new(&[3, 1, 3], Rgb { r: 1, g: 2, b: 3 }, LedMode::Glow).unwrap();
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"leds": [1, 3], "color": {"r": 1, "g": 2, "b": 3}, "mode": "glow"})
        );
    }
}
