use std::collections::BTreeMap;

/// The five identity attributes the pipeline extracts. Declaration order is
/// the canonical field order used for record layout and finding sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum FieldKind {
    Name,
    DateOfBirth,
    Gender,
    IdNumber,
    Address,
}

impl FieldKind {
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Name,
        FieldKind::DateOfBirth,
        FieldKind::Gender,
        FieldKind::IdNumber,
        FieldKind::Address,
    ];

    /// Mandatory fields fail validation outright when absent.
    pub fn is_mandatory(self) -> bool {
        matches!(
            self,
            FieldKind::Name | FieldKind::DateOfBirth | FieldKind::IdNumber
        )
    }

    /// Human-readable label used in finding messages.
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::DateOfBirth => "date of birth",
            FieldKind::Gender => "gender",
            FieldKind::IdNumber => "ID number",
            FieldKind::Address => "address",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Pdf,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Image => write!(f, "image"),
            MediaType::Pdf => write!(f, "pdf"),
        }
    }
}

/// Immutable upload payload. Owned by one verification session for the
/// duration of a single recognition pass.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub media_type: MediaType,
}

impl RawDocument {
    pub fn new(bytes: Vec<u8>, media_type: MediaType) -> Self {
        Self { bytes, media_type }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One recognized line with the engine-reported confidence in [0.0, 1.0].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextLine {
    pub text: String,
    pub confidence: f32,
}

impl TextLine {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Output of one recognition pass, immutable thereafter.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecognizedText {
    pub lines: Vec<TextLine>,
}

impl RecognizedText {
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self { lines }
    }

    /// For engines that report a single opaque string without per-line
    /// confidence: split on newlines, confidence 1.0.
    pub fn from_plain_text(text: &str) -> Self {
        Self {
            lines: text
                .lines()
                .map(|line| TextLine::new(line, 1.0))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.text.trim().is_empty())
    }
}

/// A field value as parsed out of the recognized text. `normalized_value`
/// stays `None` until a validation rule canonicalizes it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExtractedField {
    pub kind: FieldKind,
    pub raw_value: String,
    pub normalized_value: Option<String>,
    pub source_confidence: f32,
}

impl ExtractedField {
    pub fn new(kind: FieldKind, raw_value: impl Into<String>, source_confidence: f32) -> Self {
        Self {
            kind,
            raw_value: raw_value.into(),
            normalized_value: None,
            source_confidence: source_confidence.clamp(0.0, 1.0),
        }
    }

    /// Placeholder for a field no rule matched.
    pub fn absent(kind: FieldKind) -> Self {
        Self {
            kind,
            raw_value: String::new(),
            normalized_value: None,
            source_confidence: 0.0,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.raw_value.trim().is_empty()
    }
}

/// Which identity document the ID number pattern matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DocumentType {
    Aadhaar,
    Pan,
    Unknown,
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::Aadhaar => write!(f, "Aadhaar Card"),
            DocumentType::Pan => write!(f, "PAN Card"),
            DocumentType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Declared worst-first so the derived ordering sorts Fail before Warning
/// before Pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Fail,
    Warning,
    Pass,
}

/// A single validation outcome. `kind` is `None` only for the document-level
/// failure finding produced when recognition itself fails.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationFinding {
    pub kind: Option<FieldKind>,
    pub severity: Severity,
    pub message: String,
}

impl ValidationFinding {
    pub fn pass(kind: FieldKind, message: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            severity: Severity::Pass,
            message: message.into(),
        }
    }

    pub fn warning(kind: FieldKind, message: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn fail(kind: FieldKind, message: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            severity: Severity::Fail,
            message: message.into(),
        }
    }

    /// The single finding attached to a recognition failure.
    pub fn document_failure() -> Self {
        Self {
            kind: None,
            severity: Severity::Fail,
            message: "document could not be processed".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Aggregate risk for one document. Always replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RiskResult {
    pub score: u8,
    pub level: RiskLevel,
    pub findings: Vec<ValidationFinding>,
}

impl RiskResult {
    /// The result published when recognition fails: score 100, one
    /// document-level Fail finding.
    pub fn document_failure() -> Self {
        Self {
            score: 100,
            level: RiskLevel::High,
            findings: vec![ValidationFinding::document_failure()],
        }
    }
}

/// Raw plus normalized value for one field, as surfaced to the host.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldValue {
    pub raw_value: String,
    pub normalized_value: Option<String>,
}

impl From<&ExtractedField> for FieldValue {
    fn from(field: &ExtractedField) -> Self {
        Self {
            raw_value: field.raw_value.clone(),
            normalized_value: field.normalized_value.clone(),
        }
    }
}

/// The only data the presentation layer may render. The host must not
/// re-derive scoring from it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VerificationRecord {
    pub document_type: DocumentType,
    pub fields: BTreeMap<FieldKind, FieldValue>,
    pub risk: RiskResult,
}

impl VerificationRecord {
    /// The record published alongside the Failed state so hosts render
    /// failures through the same path as scored documents.
    pub fn document_failure() -> Self {
        Self {
            document_type: DocumentType::Unknown,
            fields: BTreeMap::new(),
            risk: RiskResult::document_failure(),
        }
    }
}
