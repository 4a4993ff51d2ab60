//! Library root for the Spiderbot control panel.
//!
//! The pure input-to-command layer lives in [`kinematics`], [`robot`] and
//! [`panel`]; [`tasks`] talks to the robot web server and [`app`], [`input`]
//! and [`display`] form the terminal front-end used by the binary.
pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod kinematics;
pub mod panel;
pub mod robot;
pub mod tasks;

pub use error::{PanelError, Result};
