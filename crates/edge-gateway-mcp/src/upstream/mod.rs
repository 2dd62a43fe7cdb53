//! Timed JSON-RPC client for calls to upstream nodes.

pub mod client;
pub mod error;
pub mod event_stream;

pub use client::UpstreamClient;
pub use error::UpstreamError;
