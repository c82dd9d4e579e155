// Drive and interrupt actions
//
// Only the task id is sent. Text, audio source and TTS settings are chosen
// by the backend.

use serde_json::Value;

use super::{
    task_payload, DRIVE_BY_AUDIO, DRIVE_BY_TEXT, DRIVE_BY_WS_STREAM_WITH_TTS,
    INTERRUPT_DRIVE_TASK,
};
use crate::client::ApiClient;
use crate::errors::ApiError;

pub struct DriveApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DriveApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn drive_by_text(&self, task_id: &str) -> Result<Value, ApiError> {
        self.client.post(DRIVE_BY_TEXT, &task_payload(task_id)).await
    }

    pub async fn drive_by_audio(&self, task_id: &str) -> Result<Value, ApiError> {
        self.client.post(DRIVE_BY_AUDIO, &task_payload(task_id)).await
    }

    /// Drive through the backend's streaming TTS websocket
    pub async fn drive_by_ws_stream_with_tts(&self, task_id: &str) -> Result<Value, ApiError> {
        self.client
            .post(DRIVE_BY_WS_STREAM_WITH_TTS, &task_payload(task_id))
            .await
    }

    /// Stop whatever the digital human is currently saying
    pub async fn interrupt_drive_task(&self, task_id: &str) -> Result<Value, ApiError> {
        self.client
            .post(INTERRUPT_DRIVE_TASK, &task_payload(task_id))
            .await
    }
}
