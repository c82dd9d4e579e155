// Digital-human asset info and RTC tokens

use serde_json::{json, Value};

use super::{GET_DIGITAL_HUMAN_INFO, ZEGO_TOKEN};
use crate::client::ApiClient;
use crate::errors::ApiError;

pub struct DigitalHumanApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DigitalHumanApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetch asset info (and a preload token) for `user_id`
    pub async fn get_digital_human_info(&self, user_id: &str) -> Result<Value, ApiError> {
        self.client
            .post(GET_DIGITAL_HUMAN_INFO, &json!({ "UserId": user_id }))
            .await
    }

    /// Issue an RTC room token for `user_id` (GET, `userId` query parameter)
    pub async fn zego_token(&self, user_id: &str) -> Result<Value, ApiError> {
        self.client.get(ZEGO_TOKEN, &[("userId", user_id)]).await
    }
}
