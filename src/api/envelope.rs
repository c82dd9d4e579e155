// Response envelope
//
// The backend wraps results as {Code, Message, Data, RequestId}. Parsing is
// lenient: a missing Code reads as 0, a missing Message as "", and a Data that
// is not an object as {}.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiEnvelope {
    pub code: i64,
    pub message: String,
    pub data: Value,
    pub request_id: Option<String>,
}

/// One entry of a `QueryDigitalHumanStreamTasks` result
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StreamTask {
    pub task_id: String,
    pub room_id: String,
    pub stream_id: String,
    pub user_id: String,
}

impl ApiEnvelope {
    pub fn from_value(value: &Value) -> Self {
        let code = match value.get("Code") {
            Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            _ => None,
        };
        let data = match value.get("Data") {
            Some(data @ Value::Object(_)) => data.clone(),
            _ => Value::Object(Map::new()),
        };

        Self {
            code: code.unwrap_or(0),
            message: value
                .get("Message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            data,
            request_id: value
                .get("RequestId")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }

    /// Tasks listed under `Data.Tasks` or `Data.TaskList`; entries that do not
    /// look like tasks are skipped
    pub fn tasks(&self) -> Vec<StreamTask> {
        let list = ["Tasks", "TaskList"]
            .iter()
            .find_map(|key| self.data.get(*key).and_then(Value::as_array));

        list.map(|items| {
            items
                .iter()
                .filter_map(|item| StreamTask::deserialize(item).ok())
                .collect()
        })
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CreateStreamTaskData, DigitalHumanInfo, TokenData};
    use serde_json::json;

    #[test]
    fn test_full_envelope() {
        let envelope = ApiEnvelope::from_value(&json!({
            "Code": 0,
            "Message": "Success",
            "RequestId": "req-1",
            "Data": {"DigitalHumanId": "dh_1", "AppId": 42}
        }));
        assert!(envelope.is_success());
        assert_eq!(envelope.message, "Success");
        assert_eq!(envelope.request_id.as_deref(), Some("req-1"));

        let info: DigitalHumanInfo = envelope.data_as().unwrap();
        assert_eq!(info.digital_human_id, "dh_1");
        assert_eq!(info.app_id, 42);
    }

    #[test]
    fn test_create_task_envelope() {
        let envelope = ApiEnvelope::from_value(&json!({
            "Code": 0,
            "Message": "Success",
            "RequestId": "req-2",
            "Data": {
                "TaskId": "task_1",
                "RoomId": "test_room_1",
                "StreamId": "stream_1",
                "Base64Config": "eyJ9",
                "AppId": "123456",
                "Token": "04AAA"
            }
        }));
        assert!(envelope.is_success());

        let data: CreateStreamTaskData = envelope.data_as().unwrap();
        assert_eq!(data.task_id, "task_1");
        assert_eq!(data.room_id, "test_room_1");
        assert_eq!(data.base64_config, "eyJ9");
        assert_eq!(data.app_id, "123456");
        assert_eq!(data.token, "04AAA");

        let partial: CreateStreamTaskData =
            ApiEnvelope::from_value(&json!({"Data": {"TaskId": "t"}})).data_as().unwrap();
        assert_eq!(partial.task_id, "t");
        assert_eq!(partial.stream_id, "");
    }

    #[test]
    fn test_token_envelope() {
        let envelope = ApiEnvelope::from_value(&json!({
            "Code": 0,
            "Message": "Generate token success",
            "Data": {"token": "04BBB", "user_id": "user_001", "expire_time": 1700000000000i64}
        }));
        let data: TokenData = envelope.data_as().unwrap();
        assert_eq!(data.token, "04BBB");
        assert_eq!(data.user_id, "user_001");
        assert_eq!(data.expire_time, 1_700_000_000_000);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let envelope = ApiEnvelope::from_value(&json!({"Data": [1, 2]}));
        assert_eq!(envelope.code, 0);
        assert_eq!(envelope.message, "");
        assert_eq!(envelope.data, json!({}));
        assert_eq!(envelope.request_id, None);
    }

    #[test]
    fn test_business_error_code() {
        let envelope = ApiEnvelope::from_value(&json!({"Code": 400, "Message": "TaskId required"}));
        assert!(!envelope.is_success());
        assert_eq!(envelope.code, 400);
    }

    #[test]
    fn test_tasks_from_either_key() {
        let tasks = ApiEnvelope::from_value(&json!({
            "Code": 0,
            "Data": {"Tasks": [{"TaskId": "t1", "RoomId": "r1"}, "garbage"]}
        }))
        .tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task_id, "t1");
        assert_eq!(tasks[0].room_id, "r1");

        let tasks = ApiEnvelope::from_value(&json!({
            "Data": {"TaskList": [{"TaskId": "t2"}]}
        }))
        .tasks();
        assert_eq!(tasks[0].task_id, "t2");

        assert!(ApiEnvelope::from_value(&json!({"Data": {}})).tasks().is_empty());
    }
}
