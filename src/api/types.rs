// Typed payloads for the digital-human endpoints
//
// The backend speaks PascalCase JSON. These types are optional helpers: every
// action still accepts and returns plain JSON.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Render layout requested when creating a stream task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Large frame with opaque background
    #[default]
    Web,
    /// Small frame with transparent background
    Mobile,
}

impl OutputMode {
    pub fn code(&self) -> u8 {
        match self {
            OutputMode::Web => 1,
            OutputMode::Mobile => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(OutputMode::Web),
            2 => Some(OutputMode::Mobile),
            _ => None,
        }
    }
}

impl Serialize for OutputMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for OutputMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        OutputMode::from_code(code).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Unsigned(code.into()), &"1 (web) or 2 (mobile)")
        })
    }
}

/// Body for `CreateDigitalHumanStreamTask`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateStreamTaskRequest {
    pub user_id: String,
    pub output_mode: OutputMode,
}

impl CreateStreamTaskRequest {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            output_mode: OutputMode::default(),
        }
    }

    pub fn with_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }
}

/// `Data` of a `GetDigitalHumanInfo` response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DigitalHumanInfo {
    pub digital_human_id: String,
    pub name: String,
    pub avatar_url: String,
    pub preview_url: String,
    pub is_public: bool,
    pub app_id: i64,
    /// Token for preloading assets
    pub token: String,
    pub user_id: String,
    /// Token expiry, unix milliseconds
    pub expire_time: i64,
}

/// `Data` of a `CreateDigitalHumanStreamTask` response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateStreamTaskData {
    pub task_id: String,
    pub room_id: String,
    pub stream_id: String,
    /// Encoded player config handed to the rendering SDK
    pub base64_config: String,
    /// Sent as a string by the backend
    pub app_id: String,
    pub token: String,
}

/// `Data` of a `ZegoToken` response; this endpoint uses snake_case keys
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenData {
    pub token: String,
    pub user_id: String,
    /// Unix milliseconds
    pub expire_time: i64,
}
