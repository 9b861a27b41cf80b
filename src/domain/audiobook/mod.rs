pub mod model;
pub mod service;
pub mod session;

pub use model::{Audiobook, AudiobookOptions};
pub use service::AudiobookService;
pub use session::{DisplayStep, Session, SessionState};
