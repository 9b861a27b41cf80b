use super::codec::base64_to_bytes;
use super::error::DecodeError;

/// Sample rate the speech collaborator returns audio at.
pub const TTS_SAMPLE_RATE: u32 = 24000;
/// Channel count the speech collaborator returns audio with.
pub const TTS_CHANNELS: u16 = 1;

const I16_SCALE: f32 = 32768.0;

/// Payload accepted by [`decode_pcm`]: either transport-encoded or already raw.
#[derive(Debug, Clone, Copy)]
pub enum PcmPayload<'a> {
    Base64(&'a str),
    Raw(&'a [u8]),
}

impl<'a> From<&'a [u8]> for PcmPayload<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        PcmPayload::Raw(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for PcmPayload<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        PcmPayload::Raw(bytes.as_slice())
    }
}

impl<'a> From<&'a str> for PcmPayload<'a> {
    fn from(encoded: &'a str) -> Self {
        PcmPayload::Base64(encoded)
    }
}

/// Decoded, immutable audio: one float sample array per channel plus the sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudioBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl DecodedAudioBuffer {
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self, DecodeError> {
        if sample_rate == 0 {
            return Err(DecodeError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn number_of_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Samples per channel (frames).
    pub fn len(&self) -> usize {
        self.channels.first().map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }
}

/// Decode little-endian signed 16-bit mono PCM into a float buffer.
///
/// Each sample is divided by 32768. A trailing odd byte is rejected.
pub fn decode_pcm<'a, P>(payload: P, sample_rate: u32) -> Result<DecodedAudioBuffer, DecodeError>
where
    P: Into<PcmPayload<'a>>,
{
    if sample_rate == 0 {
        return Err(DecodeError::InvalidSampleRate(sample_rate));
    }

    let owned;
    let bytes: &[u8] = match payload.into() {
        PcmPayload::Raw(bytes) => bytes,
        PcmPayload::Base64(encoded) => {
            owned = base64_to_bytes(encoded)?;
            &owned
        }
    };

    if bytes.len() % 2 != 0 {
        return Err(DecodeError::OddLength(bytes.len()));
    }

    let samples = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / I16_SCALE)
        .collect();

    DecodedAudioBuffer::new(vec![samples], sample_rate)
}
