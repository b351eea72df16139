//! Reqwest-backed adapter for the remote complaints API.

mod dto;
mod http_client;

pub use http_client::HttpComplaintsApi;
