//! HTTP request layer for the recording API

use std::time::Duration;

use chrono::{Days, NaiveDate, NaiveTime};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use async_trait::async_trait;

use super::models::{decode_audio, decode_search, decode_status, IdRequest, SearchRequest};
use super::{AudioSource, Credentials, SearchOutcome, AUTH_SECRET_HEADER, AUTH_TOKEN_HEADER};
use crate::audio::WavEncoder;
use crate::{CallboxError, Result};

const SEARCH_PATH: &str = "/api/v2/logs/search";
const RECORDING_PATH: &str = "/api/v2/logs/recording";
const DELETE_PATH: &str = "/api/v2/logs/delete_recording";

/// Format of the search window bounds, local time, no zone suffix
const WINDOW_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Stateless client for the recording endpoint family.
///
/// Each operation is one independent POST exchange: no retries, no request
/// queue. Cancellation is dropping the future.
pub struct RecordingApiClient {
    http: Client,
    base_url: String,
}

impl RecordingApiClient {
    /// Build a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CallboxError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// List recordings created during one local calendar day.
    ///
    /// The window runs from local midnight of `day` to midnight of the next
    /// day. Zero matches is `SearchOutcome::Empty`, not an error.
    pub async fn search(&self, day: NaiveDate, credentials: &Credentials) -> Result<SearchOutcome> {
        let (start_at, end_at) = day_window(day);
        debug!("Searching recordings from {} to {}", start_at, end_at);

        let body = self
            .exchange(SEARCH_PATH, &SearchRequest { start_at, end_at }, credentials)
            .await?;

        decode_search(&body)
    }

    /// Fetch one recording's audio as a complete playable WAV file.
    ///
    /// The server returns raw base64 PCM and never declares a sample format;
    /// the fixed telephony profile (8kHz mono 16-bit) is assumed
    /// unconditionally and the decoded bytes are wrapped before return.
    pub async fn fetch_audio(&self, id: i64, credentials: &Credentials) -> Result<Vec<u8>> {
        debug!("Fetching audio for recording {}", id);

        let body = self
            .exchange(RECORDING_PATH, &IdRequest { id }, credentials)
            .await?;

        let pcm = decode_audio(&body)?;
        debug!("Decoded {} bytes of PCM for recording {}", pcm.len(), id);

        Ok(WavEncoder::for_telephony().wrap(&pcm))
    }

    /// Delete one recording server-side.
    ///
    /// Success requires an explicit success status; the caller owns any
    /// catalog update that follows.
    pub async fn delete(&self, id: i64, credentials: &Credentials) -> Result<()> {
        debug!("Deleting recording {}", id);

        let body = self
            .exchange(DELETE_PATH, &IdRequest { id }, credentials)
            .await?;

        decode_status(&body)
    }

    /// One authenticated POST exchange, returning the raw body text.
    async fn exchange<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        credentials: &Credentials,
    ) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .post(&url)
            .header(AUTH_TOKEN_HEADER, credentials.token())
            .header(AUTH_SECRET_HEADER, credentials.secret())
            .json(body)
            .send()
            .await
            .map_err(|e| CallboxError::Transport(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| CallboxError::Transport(e.to_string()))?;

        response
            .text()
            .await
            .map_err(|e| CallboxError::Transport(e.to_string()))
    }
}

#[async_trait]
impl AudioSource for RecordingApiClient {
    async fn fetch_audio(&self, id: i64, credentials: &Credentials) -> Result<Vec<u8>> {
        RecordingApiClient::fetch_audio(self, id, credentials).await
    }
}

/// Search bounds for one local calendar day: midnight to next midnight.
fn day_window(day: NaiveDate) -> (String, String) {
    let start = day.and_time(NaiveTime::MIN);
    let end = day
        .checked_add_days(Days::new(1))
        .unwrap_or(day)
        .and_time(NaiveTime::MIN);

    (
        start.format(WINDOW_FORMAT).to_string(),
        end.format(WINDOW_FORMAT).to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_window_spans_one_calendar_day() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
        let (start, end) = day_window(day);
        assert_eq!(start, "2024-03-18 00:00:00");
        assert_eq!(end, "2024-03-19 00:00:00");
    }

    #[test]
    fn day_window_crosses_month_boundary() {
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let (start, end) = day_window(day);
        assert_eq!(start, "2024-02-29 00:00:00");
        assert_eq!(end, "2024-03-01 00:00:00");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client =
            RecordingApiClient::new("https://pbx.example.com/", Duration::from_secs(10)).unwrap();
        assert_eq!(client.base_url, "https://pbx.example.com");
    }
}
