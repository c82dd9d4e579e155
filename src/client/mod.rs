// HTTP request wrapper
//
// Provides ApiClient, the single path every API call goes through:
// URL composition, JSON encoding, diagnostics, and status checking.

mod api_client;
mod request;

pub use api_client::ApiClient;
pub use request::{api_base, encode_query, join_url, normalize_path, ApiRequest, HttpMethod};
