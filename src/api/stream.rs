// Stream task lifecycle

use serde::Serialize;
use serde_json::{json, Value};

use super::{
    task_payload, CREATE_STREAM_TASK, GET_STREAM_TASK_STATUS, QUERY_STREAM_TASKS,
    STOP_STREAM_TASK,
};
use crate::client::ApiClient;
use crate::errors::ApiError;

pub struct StreamApi<'a> {
    client: &'a ApiClient,
}

impl<'a> StreamApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List every running stream task
    pub async fn query_stream_tasks(&self) -> Result<Value, ApiError> {
        self.client.post(QUERY_STREAM_TASKS, &json!({})).await
    }

    /// Create a stream task; `config` is sent as the request body as-is
    pub async fn create_stream_task<T>(&self, config: &T) -> Result<Value, ApiError>
    where
        T: Serialize + ?Sized,
    {
        self.client.post(CREATE_STREAM_TASK, config).await
    }

    pub async fn stop_stream_task(&self, task_id: &str) -> Result<Value, ApiError> {
        self.client
            .post(STOP_STREAM_TASK, &task_payload(task_id))
            .await
    }

    pub async fn get_stream_task_status(&self, task_id: &str) -> Result<Value, ApiError> {
        self.client
            .post(GET_STREAM_TASK_STATUS, &task_payload(task_id))
            .await
    }
}
