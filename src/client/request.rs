// Request descriptors and URL composition
//
// Paths and base URLs are normalized so that every spelling of an endpoint
// ("p", "/p", "api/p", "/api/p") and every spelling of the base ("http://h",
// "http://h/", "http://h/api", "http://h/api/") join to the same URL.

use serde_json::{Map, Value};
use std::fmt;

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// One call to the API, built per request and never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub path: String,
    pub method: HttpMethod,
    /// JSON body, sent only for POST
    pub data: Value,
    /// Query parameters, sent only for GET
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn post(path: impl Into<String>, data: Value) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Post,
            data,
            params: Vec::new(),
        }
    }

    pub fn get<K, V>(path: impl Into<String>, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            path: path.into(),
            method: HttpMethod::Get,
            data: empty_object(),
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Full URL for this request against `base_url`
    pub fn url(&self, base_url: &str) -> String {
        let url = join_url(base_url, &self.path);
        match self.method {
            HttpMethod::Get => format!("{}?{}", url, encode_query(&self.params)),
            HttpMethod::Post => url,
        }
    }

    /// Serialized body; `None` for GET
    pub fn body(&self) -> Result<Option<String>, serde_json::Error> {
        match self.method {
            HttpMethod::Get => Ok(None),
            HttpMethod::Post => serde_json::to_string(&self.data).map(Some),
        }
    }

    /// Whether there is anything worth logging as a body or query
    pub(crate) fn has_payload(&self) -> bool {
        match self.method {
            HttpMethod::Get => !self.params.is_empty(),
            HttpMethod::Post => match &self.data {
                Value::Object(map) => !map.is_empty(),
                Value::Null => false,
                _ => true,
            },
        }
    }
}

pub(crate) fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Strip one leading `/`, then one leading `api/`
pub fn normalize_path(path: &str) -> &str {
    let path = path.strip_prefix('/').unwrap_or(path);
    path.strip_prefix("api/").unwrap_or(path)
}

/// Base URL with exactly one trailing `/api` and no trailing slash
pub fn api_base(base_url: &str) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    if base.ends_with("/api") {
        base.to_string()
    } else {
        format!("{}/api", base)
    }
}

pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", api_base(base_url), normalize_path(path))
}

/// `application/x-www-form-urlencoded` query string, without the leading `?`
pub fn encode_query(params: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}
