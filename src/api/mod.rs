// Digital-human API actions
//
// Each action sends a fixed payload to one backend endpoint through
// ApiClient and returns the parsed JSON unchanged. All of them POST except
// the token lookup, which is the backend's only GET route.

mod digital_human;
mod drive;
mod envelope;
mod stream;
mod types;

pub use digital_human::DigitalHumanApi;
pub use drive::DriveApi;
pub use envelope::{ApiEnvelope, StreamTask};
pub use stream::StreamApi;
pub use types::{CreateStreamTaskData, CreateStreamTaskRequest, DigitalHumanInfo, OutputMode, TokenData};

use serde_json::{json, Value};

// Endpoint paths, relative to {base}/api
pub const GET_DIGITAL_HUMAN_INFO: &str = "GetDigitalHumanInfo";
pub const ZEGO_TOKEN: &str = "ZegoToken";
pub const QUERY_STREAM_TASKS: &str = "QueryDigitalHumanStreamTasks";
pub const CREATE_STREAM_TASK: &str = "CreateDigitalHumanStreamTask";
pub const STOP_STREAM_TASK: &str = "StopDigitalHumanStreamTask";
pub const GET_STREAM_TASK_STATUS: &str = "GetDigitalHumanStreamTaskStatus";
pub const DRIVE_BY_TEXT: &str = "DriveByText";
pub const DRIVE_BY_AUDIO: &str = "DriveByAudio";
pub const DRIVE_BY_WS_STREAM_WITH_TTS: &str = "DriveByWsStreamWithTTS";
pub const INTERRUPT_DRIVE_TASK: &str = "InterruptDriveTask";

fn task_payload(task_id: &str) -> Value {
    json!({ "TaskId": task_id })
}
