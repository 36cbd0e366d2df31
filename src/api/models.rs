//! Wire shapes and response decoding for the recording API
//!
//! Decoding is factored into pure functions over the body text so the
//! shape/validation layer is testable without a live server.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use super::SearchOutcome;
use crate::catalog::RecordingRecord;
use crate::{CallboxError, Result};

const STATUS_SUCCESS: &str = "success";

/// Body of a search request, both bounds `"yyyy-MM-dd HH:mm:ss"` local time
#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest {
    pub start_at: String,
    pub end_at: String,
}

/// Body of a fetch-audio or delete request
#[derive(Debug, Serialize)]
pub(crate) struct IdRequest {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<RecordingObject>>,
}

#[derive(Debug, Deserialize)]
struct RecordingObject {
    id: i64,
    timestamp: String,
    #[serde(default)]
    duration: u32,
    source: Option<Party>,
    destination: Option<Party>,
    // The upstream really does key this field with a trailing '?'.
    #[serde(rename = "recording?", default)]
    has_recording: bool,
    call_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Party {
    name: Option<String>,
}

impl From<RecordingObject> for RecordingRecord {
    fn from(obj: RecordingObject) -> Self {
        Self {
            id: obj.id,
            timestamp: obj.timestamp,
            duration_secs: obj.duration,
            source: obj.source.and_then(|p| p.name),
            destination: obj.destination.and_then(|p| p.name),
            has_recording: obj.has_recording,
            call_type: obj.call_type.unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AudioResponse {
    status: String,
    data: Option<AudioData>,
}

#[derive(Debug, Deserialize)]
struct AudioData {
    file: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
}

/// Decode a search response body into records.
///
/// A missing or null `data` array is a normal empty result, never an error.
pub(crate) fn decode_search(body: &str) -> Result<SearchOutcome> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| CallboxError::Decode(format!("search response: {}", e)))?;

    let records: Vec<RecordingRecord> = response
        .data
        .unwrap_or_default()
        .into_iter()
        .map(RecordingRecord::from)
        .collect();

    if records.is_empty() {
        Ok(SearchOutcome::Empty)
    } else {
        Ok(SearchOutcome::Records(records))
    }
}

/// Decode a fetch-audio response body into raw PCM bytes.
///
/// Validates the status field before touching the payload, so a failed
/// status never reaches the base64 or container stage.
pub(crate) fn decode_audio(body: &str) -> Result<Vec<u8>> {
    let response: AudioResponse = serde_json::from_str(body)
        .map_err(|e| CallboxError::Decode(format!("audio response: {}", e)))?;

    if response.status != STATUS_SUCCESS {
        return Err(CallboxError::ApiStatus(format!(
            "audio fetch returned status '{}'",
            response.status
        )));
    }

    let encoded = response
        .data
        .and_then(|d| d.file)
        .ok_or_else(|| CallboxError::AudioCorrupt("response carried no payload".to_string()))?;

    // The server is known to emit whitespace inside the base64 stream.
    let cleaned: String = encoded
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\n' | '\r'))
        .collect();

    BASE64
        .decode(cleaned.as_bytes())
        .map_err(|e| CallboxError::AudioCorrupt(format!("base64 payload: {}", e)))
}

/// Decode a delete response body; success only on an explicit success status.
pub(crate) fn decode_status(body: &str) -> Result<()> {
    let response: StatusResponse = serde_json::from_str(body)
        .map_err(|e| CallboxError::Decode(format!("status response: {}", e)))?;

    if response.status != STATUS_SUCCESS {
        return Err(CallboxError::ApiStatus(format!(
            "delete returned status '{}'",
            response.status
        )));
    }

    Ok(())
}
