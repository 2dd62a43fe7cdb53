//! Parsing of `text/event-stream` response bodies.
//!
//! Nodes may answer a POST with a stream of events instead of a plain JSON body. Only the
//! last `data:` frame carries the response; earlier frames are progress and are dropped.

use serde_json::Value;

use super::error::UpstreamError;

const DATA_MARKER: &str = "data:";

/// Non-empty payloads of every `data:` line, in order.
pub fn data_frames(body: &str) -> Vec<&str> {
    body.split('\n')
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(DATA_MARKER))
        .map(str::trim)
        .filter(|payload| !payload.is_empty())
        .collect()
}

/// Decode the last data frame of an event-stream body.
pub fn last_data_frame(body: &str) -> Result<Value, UpstreamError> {
    let frame = data_frames(body)
        .pop()
        .ok_or(UpstreamError::EmptyEventStream)?;
    serde_json::from_str(frame).map_err(|e| UpstreamError::InvalidJson(e.to_string()))
}
