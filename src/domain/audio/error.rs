#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("PCM payload has an odd number of bytes ({0})")]
    OddLength(usize),
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("audio buffer has no channels")]
    NoChannels,
    #[error("channel {channel} has {actual} samples, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },
    #[error("wav writer error: {0}")]
    Wav(#[from] hound::Error),
}
