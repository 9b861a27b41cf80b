use super::error::{DecodeError, EncodeError};
use super::pcm::DecodedAudioBuffer;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::Cursor;

pub const WAV_BITS_PER_SAMPLE: u16 = 16;

/// Encode bytes with the standard alphabet, padded, no line breaks.
pub fn bytes_to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a standard base64 string. Non-alphabet characters and bad padding are rejected.
pub fn base64_to_bytes(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(STANDARD.decode(encoded)?)
}

/// Concatenate buffers in order. An empty sequence yields an empty buffer.
pub fn concatenate_bytes<B: AsRef<[u8]>>(buffers: &[B]) -> Vec<u8> {
    let total: usize = buffers.iter().map(|b| b.as_ref().len()).sum();
    let mut merged = Vec::with_capacity(total);
    for buffer in buffers {
        merged.extend_from_slice(buffer.as_ref());
    }
    merged
}

/// Scale a float sample in [-1, 1] to a signed 16-bit sample, clamping out-of-range input.
fn to_i16(sample: f32) -> i16 {
    let clamped = if sample.is_nan() { 0.0 } else { sample.clamp(-1.0, 1.0) };
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}

/// Encode a decoded buffer as a 16-bit PCM WAV file held in memory.
///
/// Channels are interleaved frame by frame. All channels must have the same length.
pub fn encode_wav(buffer: &DecodedAudioBuffer) -> Result<Vec<u8>, EncodeError> {
    let channels = buffer.channels();
    let first = channels.first().ok_or(EncodeError::NoChannels)?;
    let frames = first.len();

    for (index, channel) in channels.iter().enumerate() {
        if channel.len() != frames {
            return Err(EncodeError::ChannelLengthMismatch {
                channel: index,
                expected: frames,
                actual: channel.len(),
            });
        }
    }

    let spec = hound::WavSpec {
        channels: channels.len() as u16,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: WAV_BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + frames * channels.len() * 2));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for frame in 0..frames {
            for channel in channels {
                writer.write_sample(to_i16(channel[frame]))?;
            }
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}
