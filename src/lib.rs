//! callbox - Retrieve, play back, and export call recordings from a hosted telephony API
//!
//! The library is the core; the `callbox` binary is a thin CLI over it.

pub mod api;
pub mod audio;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod playback;
pub mod secrets;

use thiserror::Error;

/// Main error type for callbox
#[derive(Error, Debug)]
pub enum CallboxError {
    /// Network-level failure: the server could not be reached or the
    /// exchange broke off before a body arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response body arrived but did not match the expected JSON shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The recording payload was missing or its base64 did not decode.
    #[error("Corrupt audio payload: {0}")]
    AudioCorrupt(String),

    /// The API answered with a non-success status field.
    #[error("API status error: {0}")]
    ApiStatus(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CallboxError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "callbox";
