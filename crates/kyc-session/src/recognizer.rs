//! The seam to the external OCR capability. The engine itself is a black
//! box; hosts inject an implementation and the session layer owns timeout
//! and cancellation.

use async_trait::async_trait;
use kyc_types::{MediaType, RawDocument, RecognizedText};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognitionError {
    #[error("unsupported media type: {0}")]
    Unsupported(MediaType),

    #[error("recognition exceeded its time budget")]
    Timeout,

    #[error("recognition engine failed: {0}")]
    EngineFailure(String),
}

/// An OCR capability. Implementations must be safe to call from a spawned
/// task; cancellation happens by aborting that task, so no partial result
/// must be observable outside the returned value.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, document: &RawDocument)
        -> Result<RecognizedText, RecognitionError>;

    /// Media types this engine can handle. Checked at submission so an
    /// unsupported upload fails synchronously instead of burning a
    /// recognition pass.
    fn supports(&self, media_type: MediaType) -> bool {
        let _ = media_type;
        true
    }
}
