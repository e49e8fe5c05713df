//! Field extraction, validation, and risk scoring over recognized document
//! text. The three stages are pure and synchronous; the session layer drives
//! them in order and owns all async concerns.

pub mod checksum;
pub mod extractors;
pub mod parser;
pub mod patterns;
pub mod rules;
pub mod scorer;

use std::collections::BTreeMap;

use chrono::Utc;
use kyc_types::{
    DocumentType, ExtractedField, FieldKind, FieldValue, RecognizedText, RiskResult,
    ValidationFinding, VerificationConfig, VerificationRecord,
};

pub use parser::Extraction;

/// The fully verified document: selected fields, inferred document type, and
/// the scored risk.
#[derive(Debug, Clone)]
pub struct Verification {
    pub document_type: DocumentType,
    pub fields: BTreeMap<FieldKind, ExtractedField>,
    pub risk: RiskResult,
}

impl Verification {
    /// The record surfaced to the presentation layer.
    pub fn record(&self) -> VerificationRecord {
        VerificationRecord {
            document_type: self.document_type,
            fields: self
                .fields
                .iter()
                .map(|(kind, field)| (*kind, FieldValue::from(field)))
                .collect(),
            risk: self.risk.clone(),
        }
    }
}

/// Engine entry point. Holds the configuration; all state lives in the
/// arguments, so one engine serves any number of concurrent sessions.
#[derive(Debug, Clone, Default)]
pub struct VerificationEngine {
    config: VerificationConfig,
}

impl VerificationEngine {
    pub fn new(config: VerificationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Stage 1: pattern rules and candidate selection. Never fails.
    pub fn parse(&self, text: &RecognizedText) -> Extraction {
        parser::parse(text, &self.config)
    }

    /// Stage 2: one finding per field, canonicalizing normalized values in
    /// place. Never fails.
    pub fn validate(&self, extraction: &mut Extraction) -> Vec<ValidationFinding> {
        let today = Utc::now().date_naive();
        extraction
            .fields
            .values_mut()
            .map(|field| rules::check_field(field, today))
            .collect()
    }

    /// Stage 3: weighted aggregation into a RiskResult.
    pub fn score(&self, findings: Vec<ValidationFinding>) -> RiskResult {
        scorer::score(findings, &self.config.weights, &self.config.thresholds)
    }

    /// All three stages over one recognition result.
    pub fn verify_text(&self, text: &RecognizedText) -> Verification {
        let mut extraction = self.parse(text);
        let findings = self.validate(&mut extraction);
        let risk = self.score(findings);
        Verification {
            document_type: extraction.document_type,
            fields: extraction.fields,
            risk,
        }
    }
}
