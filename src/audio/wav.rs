//! WAV (RIFF/WAVE) container encoder
//!
//! Builds the canonical 44-byte linear-PCM header in front of a raw sample
//! buffer. The upstream API never declares a sample format, so callers almost
//! always use the fixed telephony profile (8 kHz, mono, 16-bit).

/// Size of the RIFF/WAVE header for a single-`data`-chunk PCM file.
const HEADER_LEN: usize = 44;

/// Length of everything after the RIFF size field when the data chunk is empty.
const RIFF_OVERHEAD: u32 = 36;

/// Linear PCM format tag in the `fmt ` chunk.
const FORMAT_PCM: u16 = 1;

/// WAV container encoder for raw PCM buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavEncoder {
    /// Sample rate in Hz
    sample_rate: u32,
    /// Number of channels (1 = mono, 2 = stereo)
    channels: u16,
    /// Bits per sample
    bits_per_sample: u16,
}

impl WavEncoder {
    /// Create an encoder for an arbitrary PCM profile
    pub fn new(sample_rate: u32, channels: u16, bits_per_sample: u16) -> Self {
        Self {
            sample_rate,
            channels,
            bits_per_sample,
        }
    }

    /// Encoder with the fixed profile the telephony API serves (8kHz mono 16-bit)
    pub fn for_telephony() -> Self {
        Self::new(8000, 1, 16)
    }

    /// Bytes of audio consumed per second of playback
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.channels) * u32::from(self.bits_per_sample) / 8
    }

    /// Bytes per sample frame across all channels
    pub fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }

    /// Wrap a raw PCM buffer into a complete playable WAV file.
    ///
    /// Pure and infallible: an empty buffer still yields a structurally valid
    /// zero-length-audio file. The PCM bytes are appended unmodified.
    pub fn wrap(&self, pcm: &[u8]) -> Vec<u8> {
        let data_len = pcm.len() as u32;
        let mut out = Vec::with_capacity(HEADER_LEN + pcm.len());

        // RIFF chunk descriptor
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(RIFF_OVERHEAD + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVE");

        // fmt subchunk
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
        out.extend_from_slice(&self.channels.to_le_bytes());
        out.extend_from_slice(&self.sample_rate.to_le_bytes());
        out.extend_from_slice(&self.byte_rate().to_le_bytes());
        out.extend_from_slice(&self.block_align().to_le_bytes());
        out.extend_from_slice(&self.bits_per_sample.to_le_bytes());

        // data subchunk
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        out.extend_from_slice(pcm);

        out
    }
}

impl Default for WavEncoder {
    fn default() -> Self {
        Self::for_telephony()
    }
}
