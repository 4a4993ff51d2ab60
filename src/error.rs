//! Error types for the control panel

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend answered {status} on {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("malformed backend payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot parse command: {0}")]
    Parse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0} is not supported by this robot")]
    Unsupported(&'static str),

    #[error("robot is not in calibration mode")]
    NotInCalibrationMode,

    #[error("select at least one LED")]
    NoLedSelected,

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("command channel closed")]
    ChannelClosed,
}

impl From<toml::de::Error> for PanelError {
    fn from(e: toml::de::Error) -> Self {
        PanelError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PanelError>;
