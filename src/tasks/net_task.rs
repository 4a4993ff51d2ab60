//! Robot web server client.
//!
//! [`Backend`] is the seam between the panel and the robot: one method per
//! endpoint. [`HttpBackend`] talks to the real server with JSON over HTTP.
//! Failures are returned as [`PanelError`]s and never retried here.
use std::collections::BTreeMap;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::PanelConfig;
use crate::error::{PanelError, Result};
use crate::robot::commands::Command;
use crate::robot::gait::Speed;
use crate::robot::led::LedConfig;
use crate::robot::routine::{Routine, VoiceAction};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ImuReading {
    pub pitch: f64,
    pub roll: f64,
    #[serde(default)]
    pub yaw: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageReply {
    pub status: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl LanguageReply {
    pub fn switched(&self) -> bool {
        self.status == "switched"
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RobotStatus {
    pub tcp_active: bool,
    pub servo_relaxed: bool,
    pub calibration_mode: bool,
    pub motion_state: Value,
    pub sonic_state: Value,
}

#[derive(Deserialize)]
struct CommandReply {
    #[serde(default)]
    result: Value,
}

#[derive(Deserialize)]
struct CalibrationModeReply {
    calibration_mode: bool,
}

#[derive(Deserialize)]
struct VoiceReply {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Deserialize)]
struct SuccessReply {
    #[serde(default)]
    success: bool,
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST /command`, returns the `result` payload
    async fn send_command(&self, cmd: &Command) -> Result<Value>;
    /// `POST /routine`
    async fn run_routine(&self, routine: &Routine) -> Result<Value>;
    /// `POST /voice`, returns the reported status if any
    async fn voice(&self, action: VoiceAction) -> Result<Option<String>>;
    /// `POST /language`
    async fn switch_language(&self, code: &str) -> Result<LanguageReply>;
    /// `GET /imu`
    async fn imu(&self) -> Result<ImuReading>;
    /// `GET /calibration_mode`
    async fn calibration_mode(&self) -> Result<bool>;
    /// `GET /calibration`, one `[x, y, z]` per leg
    async fn calibration(&self) -> Result<Vec<[i32; 3]>>;
    /// `POST /set_speed`
    async fn set_speed(&self, speed: Speed) -> Result<()>;
    /// `POST /led_config`, returns the backend's `success` flag
    async fn led_config(&self, config: &LedConfig) -> Result<bool>;
    /// `POST /led_off`
    async fn led_off(&self) -> Result<bool>;
    /// `GET /status`
    async fn status(&self) -> Result<RobotStatus>;
    /// `GET /load_point_txt`, saved angle per diagnostic servo channel
    async fn load_point_txt(&self) -> Result<BTreeMap<u8, i64>>;
}

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &PanelConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<R: DeserializeOwned>(path: &str, response: Response) -> Result<R> {
        let status = response.status();
        if !status.is_success() {
            return Err(PanelError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        debug!("GET {path}");
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(path, response).await
    }

    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R> {
        debug!("POST {path}");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(path, response).await
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send_command(&self, cmd: &Command) -> Result<Value> {
        let reply: CommandReply = self.post("/command", &json!({ "cmd": cmd.encode() })).await?;
        Ok(reply.result)
    }

    async fn run_routine(&self, routine: &Routine) -> Result<Value> {
        self.post("/routine", &json!({ "routine": routine.name() }))
            .await
    }

    async fn voice(&self, action: VoiceAction) -> Result<Option<String>> {
        let reply: VoiceReply = self
            .post("/voice", &json!({ "action": action.as_str() }))
            .await?;
        Ok(reply.status)
    }

    async fn switch_language(&self, code: &str) -> Result<LanguageReply> {
        // a refused switch comes back as 400 with a JSON reason
        let response = self
            .client
            .post(self.url("/language"))
            .json(&json!({ "language": code }))
            .send()
            .await?;
        if response.status().is_client_error() {
            let bytes = response.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }
        Self::decode("/language", response).await
    }

    async fn imu(&self) -> Result<ImuReading> {
        self.get("/imu").await
    }

    async fn calibration_mode(&self) -> Result<bool> {
        let reply: CalibrationModeReply = self.get("/calibration_mode").await?;
        Ok(reply.calibration_mode)
    }

    async fn calibration(&self) -> Result<Vec<[i32; 3]>> {
        let points: Vec<[f64; 3]> = self.get("/calibration").await?;
        Ok(points
            .into_iter()
            .map(|p| p.map(|v| v.round() as i32))
            .collect())
    }

    async fn set_speed(&self, speed: Speed) -> Result<()> {
        let _: Value = self
            .post("/set_speed", &json!({ "speed": speed.get() }))
            .await?;
        Ok(())
    }

    async fn led_config(&self, config: &LedConfig) -> Result<bool> {
        let reply: SuccessReply = self.post("/led_config", config).await?;
        Ok(reply.success)
    }

    async fn led_off(&self) -> Result<bool> {
        debug!("POST /led_off");
        let response = self.client.post(self.url("/led_off")).send().await?;
        let reply: SuccessReply = Self::decode("/led_off", response).await?;
        Ok(reply.success)
    }

    async fn status(&self) -> Result<RobotStatus> {
        self.get("/status").await
    }

    async fn load_point_txt(&self) -> Result<BTreeMap<u8, i64>> {
        self.get("/load_point_txt").await
    }
}
