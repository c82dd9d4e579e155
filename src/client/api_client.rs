// API client implementation
//
// Sends one JSON request per call to `{base}/api/{path}` and hands back the
// parsed response body untouched. No retries, no timeouts.

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, error, info_span, Instrument};

use super::request::{ApiRequest, HttpMethod, JSON_CONTENT_TYPE};
use crate::api::{DigitalHumanApi, DriveApi, StreamApi};
use crate::config::ClientConfig;
use crate::errors::ApiError;

/// HTTP client for the digital-human backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder().build().map_err(ApiError::Client)?;
        Ok(Self::with_http_client(config, client))
    }

    /// Use an existing reqwest client (shared connection pool, custom TLS, ...)
    pub fn with_http_client(config: ClientConfig, client: Client) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn digital_human(&self) -> DigitalHumanApi<'_> {
        DigitalHumanApi::new(self)
    }

    pub fn stream(&self) -> StreamApi<'_> {
        StreamApi::new(self)
    }

    pub fn drive(&self) -> DriveApi<'_> {
        DriveApi::new(self)
    }

    /// POST `data` as JSON to `path`
    pub async fn post<T>(&self, path: &str, data: &T) -> Result<Value, ApiError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_value(data).map_err(ApiError::Encode)?;
        self.request(ApiRequest::post(path, data)).await
    }

    /// GET `path` with `params` as the query string
    pub async fn get<K, V>(&self, path: &str, params: &[(K, V)]) -> Result<Value, ApiError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let params = params
            .iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()));
        self.request(ApiRequest::get(path, params)).await
    }

    /// Send a request and return the parsed JSON body
    pub async fn request(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = request.url(&self.config.api_base_url);
        let span = info_span!("api_request", method = %request.method, path = %request.path);

        async {
            log_request(&request, &url);
            match self.execute(&request, &url).await {
                Ok(value) => Ok(value),
                Err(err) => {
                    log_error(&url, &err);
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, request: &ApiRequest, url: &str) -> Result<Value, ApiError> {
        let mut builder = self
            .client
            .request(request.method.into(), url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(body) = request.body().map_err(ApiError::Encode)? {
            builder = builder.body(body);
        }

        let transport = |source: reqwest::Error| ApiError::Transport {
            url: url.to_string(),
            source,
        };

        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        let headers = header_fields(response.headers());
        let text = response.text().await.map_err(transport)?;
        let parsed = serde_json::from_str::<Value>(&text);

        debug!(
            url = %url,
            status = status.as_u16(),
            status_text = status.canonical_reason().unwrap_or(""),
            headers = ?headers,
            "Received API response"
        );
        match &parsed {
            Ok(body) => debug!(body = %body, "Response body"),
            Err(_) => debug!(body = %text, "Response body (not JSON)"),
        }

        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body: parsed.ok(),
            });
        }

        parsed.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            status: status.as_u16(),
            source,
        })
    }
}

fn log_request(request: &ApiRequest, url: &str) {
    debug!(
        method = %request.method,
        url = %url,
        headers = ?[(CONTENT_TYPE.as_str(), JSON_CONTENT_TYPE)],
        "Sending API request"
    );
    if request.has_payload() {
        match request.method {
            HttpMethod::Get => debug!(params = ?request.params, "Query parameters"),
            HttpMethod::Post => debug!(body = %request.data, "Request body"),
        }
    }
}

fn log_error(url: &str, err: &ApiError) {
    error!(
        url = %url,
        kind = ?err.kind(),
        error = %err,
        chain = ?err.chain(),
        "API request failed"
    );
}

/// Header name to value; repeated headers are joined with ", "
fn header_fields(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut fields: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        fields
            .entry(name.as_str().to_string())
            .and_modify(|joined| {
                joined.push_str(", ");
                joined.push_str(&value);
            })
            .or_insert_with(|| value.to_string());
    }
    fields
}
