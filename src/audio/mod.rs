//! Audio container synthesis
//!
//! The telephony API returns raw headerless PCM; this module wraps it into a
//! standard RIFF/WAVE container so any player or file manager can handle it.

mod wav;

pub use wav::WavEncoder;
