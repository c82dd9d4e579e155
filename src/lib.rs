// dhclient - digital-human API client
// Library exports

pub mod api;
pub mod client;
pub mod config;
pub mod errors;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use errors::{ApiError, ErrorKind};
