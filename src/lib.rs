//! Turns documents into narrated audiobooks.
//!
//! Text is extracted from a PDF, DOCX or plain text file, optionally translated, read aloud
//! chunk by chunk by a remote speech model and decoded into a playable buffer that can be
//! exported as WAV.

pub mod domain;
pub mod error;
pub mod infrastructure;
