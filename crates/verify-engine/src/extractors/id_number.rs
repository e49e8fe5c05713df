//! ID number classification. Aadhaar vs PAN is a tagged variant decided by
//! which structural pattern the token matches.

use crate::patterns;
use kyc_types::DocumentType;

/// A structurally recognized ID number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdPattern {
    /// Twelve digits with any block grouping removed.
    Aadhaar(String),
    /// Five letters, four digits, one letter, uppercased.
    Pan(String),
}

impl IdPattern {
    pub fn document_type(&self) -> DocumentType {
        match self {
            IdPattern::Aadhaar(_) => DocumentType::Aadhaar,
            IdPattern::Pan(_) => DocumentType::Pan,
        }
    }

    /// The canonical rendition used as the normalized field value.
    pub fn canonical(&self) -> &str {
        match self {
            IdPattern::Aadhaar(digits) => digits,
            IdPattern::Pan(code) => code,
        }
    }
}

/// Classify a raw token. Returns `None` when neither structural pattern
/// holds; format validity beyond structure (the Verhoeff check) is the
/// validator's job.
pub fn classify_id(raw: &str) -> Option<IdPattern> {
    let trimmed = raw.trim();

    let digits: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() == 12 && digits.chars().all(|c| c.is_ascii_digit()) {
        return Some(IdPattern::Aadhaar(digits));
    }

    let upper = trimmed.to_uppercase();
    if patterns::PAN_NUMBER.is_match(&upper) && upper.len() == 10 {
        return Some(IdPattern::Pan(upper));
    }

    None
}
