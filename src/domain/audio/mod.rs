pub mod codec;
pub mod error;
pub mod pcm;
pub mod waveform;

pub use codec::{base64_to_bytes, bytes_to_base64, concatenate_bytes, encode_wav};
pub use error::{DecodeError, EncodeError};
pub use pcm::{decode_pcm, DecodedAudioBuffer, PcmPayload, TTS_CHANNELS, TTS_SAMPLE_RATE};
pub use waveform::{render_ascii, render_columns, WaveformColumn};
