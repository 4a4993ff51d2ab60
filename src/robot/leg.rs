use core::fmt::Display;
use core::ops::{Index, IndexMut};
use core::str::FromStr;

use super::state::Vec3;
use crate::error::PanelError;

pub const LEG_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Leg {
    #[default]
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
}

impl Leg {
    pub const ALL: [Leg; LEG_COUNT] = [Leg::One, Leg::Two, Leg::Three, Leg::Four, Leg::Five, Leg::Six];

    /// Identifier the backend expects in calibration commands
    pub fn name(self) -> &'static str {
        match self {
            Leg::One => "one",
            Leg::Two => "two",
            Leg::Three => "three",
            Leg::Four => "four",
            Leg::Five => "five",
            Leg::Six => "six",
        }
    }
}

impl Display for Leg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<usize> for Leg {
    type Error = PanelError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Leg::ALL
            .get(value)
            .copied()
            .ok_or_else(|| PanelError::Parse(format!("leg index {value} out of range")))
    }
}

impl FromStr for Leg {
    type Err = PanelError;

    /// Accepts the backend name (`"three"`) or the 1-based number (`"3"`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(leg) = Leg::ALL.iter().find(|leg| leg.name() == s) {
            return Ok(*leg);
        }
        match s.parse::<usize>() {
            Ok(n) if n >= 1 => Leg::try_from(n - 1),
            _ => Err(PanelError::Parse(format!("unknown leg {s:?}"))),
        }
    }
}

impl Index<Leg> for [Vec3; LEG_COUNT] {
    type Output = Vec3;

    fn index(&self, leg: Leg) -> &Self::Output {
        &self[leg as usize]
    }
}

impl IndexMut<Leg> for [Vec3; LEG_COUNT] {
    fn index_mut(&mut self, leg: Leg) -> &mut Self::Output {
        &mut self[leg as usize]
    }
}
