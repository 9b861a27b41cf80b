pub mod audio;
pub mod audiobook;
pub mod document;
pub mod translation;
pub mod tts;
