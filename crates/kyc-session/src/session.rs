//! The per-upload state machine. Transitions are synchronous and pure; the
//! service layer drives them and owns every async concern.

use kyc_types::{RawDocument, RecognizedText, VerificationRecord};
use verify_engine::Verification;

use crate::error::ServiceError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    Recognizing,
    Parsing,
    Validating,
    Scored,
    Confirmed,
    Rejected,
    Failed,
}

impl SessionState {
    /// Terminal states accept no further operations except `reupload` from
    /// Failed.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Confirmed | SessionState::Rejected | SessionState::Failed
        )
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Recognizing => write!(f, "recognizing"),
            SessionState::Parsing => write!(f, "parsing"),
            SessionState::Validating => write!(f, "validating"),
            SessionState::Scored => write!(f, "scored"),
            SessionState::Confirmed => write!(f, "confirmed"),
            SessionState::Rejected => write!(f, "rejected"),
            SessionState::Failed => write!(f, "failed"),
        }
    }
}

/// One verification attempt. Owns the raw document until recognition
/// completes, the recognized text afterwards, and the verification once
/// scored. Exactly one document/text pair is live at a time.
#[derive(Debug, Default)]
pub struct VerificationSession {
    state: SessionState,
    document: Option<RawDocument>,
    text: Option<RecognizedText>,
    verification: Option<Verification>,
}

impl VerificationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    fn invalid(&self, operation: &'static str) -> ServiceError {
        ServiceError::InvalidTransition {
            from: self.state,
            operation,
        }
    }

    /// Idle → Recognizing. The session takes ownership of the document for
    /// the duration of the recognition pass.
    pub fn upload(&mut self, document: RawDocument) -> Result<(), ServiceError> {
        if self.state != SessionState::Idle {
            return Err(self.invalid("upload"));
        }
        self.document = Some(document);
        self.state = SessionState::Recognizing;
        Ok(())
    }

    /// Hand the document to the recognition task. The session keeps no copy;
    /// the document is released when the task drops it.
    pub fn take_document(&mut self) -> Option<RawDocument> {
        self.document.take()
    }

    /// Recognizing → Parsing, on recognition success.
    pub fn begin_parsing(&mut self, text: RecognizedText) -> Result<(), ServiceError> {
        if self.state != SessionState::Recognizing {
            return Err(self.invalid("parse"));
        }
        self.document = None;
        self.text = Some(text);
        self.state = SessionState::Parsing;
        Ok(())
    }

    pub fn recognized_text(&self) -> Option<&RecognizedText> {
        self.text.as_ref()
    }

    /// Parsing → Validating. Parsing itself never fails; absence is encoded
    /// as empty fields.
    pub fn begin_validating(&mut self) -> Result<(), ServiceError> {
        if self.state != SessionState::Parsing {
            return Err(self.invalid("validate"));
        }
        self.state = SessionState::Validating;
        Ok(())
    }

    /// Validating → Scored.
    pub fn complete(&mut self, verification: Verification) -> Result<(), ServiceError> {
        if self.state != SessionState::Validating {
            return Err(self.invalid("score"));
        }
        self.verification = Some(verification);
        self.state = SessionState::Scored;
        Ok(())
    }

    /// Recognizing → Failed. Drops the document; the failure record stands
    /// in for a verification.
    pub fn fail(&mut self) -> Result<(), ServiceError> {
        if self.state != SessionState::Recognizing {
            return Err(self.invalid("fail"));
        }
        self.document = None;
        self.text = None;
        self.state = SessionState::Failed;
        Ok(())
    }

    /// Scored → Confirmed (terminal).
    pub fn confirm(&mut self) -> Result<(), ServiceError> {
        if self.state != SessionState::Scored {
            return Err(self.invalid("confirm"));
        }
        self.state = SessionState::Confirmed;
        Ok(())
    }

    /// Scored → Rejected (terminal).
    pub fn reject(&mut self) -> Result<(), ServiceError> {
        if self.state != SessionState::Scored {
            return Err(self.invalid("reject"));
        }
        self.state = SessionState::Rejected;
        Ok(())
    }

    /// Scored | Failed → Idle: clear everything for a fresh upload.
    pub fn reset(&mut self) -> Result<(), ServiceError> {
        if !matches!(self.state, SessionState::Scored | SessionState::Failed) {
            return Err(self.invalid("reupload"));
        }
        self.document = None;
        self.text = None;
        self.verification = None;
        self.state = SessionState::Idle;
        Ok(())
    }

    /// The record surfaced to the host: present from Scored onward, and the
    /// canned failure record in Failed.
    pub fn record(&self) -> Option<VerificationRecord> {
        match self.state {
            SessionState::Failed => Some(VerificationRecord::document_failure()),
            _ => self.verification.as_ref().map(Verification::record),
        }
    }
}
