pub mod error;
pub mod model;
pub mod service;

pub use error::ExtractionError;
pub use model::{mime_type_for, Document, DocumentFile};
pub use service::{clean_text, DocumentService, DocumentServiceApi, CLEANING_INSTRUCTION};
