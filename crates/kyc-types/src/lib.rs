pub mod config;
pub mod types;

pub use config::{RiskThresholds, RiskWeights, VerificationConfig};
pub use types::{
    DocumentType, ExtractedField, FieldKind, FieldValue, MediaType, RawDocument, RecognizedText,
    RiskLevel, RiskResult, Severity, TextLine, ValidationFinding, VerificationRecord,
};
