use anyhow::Result;
use tempfile::tempdir;

use callbox::audio::WavEncoder;

#[test]
fn wrapped_buffer_round_trips_through_a_file() -> Result<()> {
    // One second of silence at the telephony profile.
    let pcm = vec![0u8; 16_000];
    let wav = WavEncoder::for_telephony().wrap(&pcm);

    let tmp = tempdir()?;
    let path = tmp.path().join("call.wav");
    std::fs::write(&path, &wav)?;

    let read_back = std::fs::read(&path)?;
    assert_eq!(read_back.len(), 44 + pcm.len());
    assert_eq!(&read_back[..4], b"RIFF");
    assert_eq!(&read_back[8..12], b"WAVE");
    assert_eq!(&read_back[44..], &pcm[..]);

    Ok(())
}

#[test]
fn duration_implied_by_header_matches_profile() {
    // 16000 bytes at 8kHz mono 16-bit is exactly one second.
    let enc = WavEncoder::for_telephony();
    assert_eq!(enc.byte_rate(), 16_000);

    let wav = enc.wrap(&vec![0u8; 16_000]);
    let data_len = u32::from_le_bytes(wav[40..44].try_into().unwrap());
    assert_eq!(data_len / enc.byte_rate(), 1);
}
