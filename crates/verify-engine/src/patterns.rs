//! Compiled pattern tables shared by every parse call.

use lazy_static::lazy_static;
use regex::Regex;

/// Specificity of a labeled "Name:" line.
pub const NAME_LABEL_SPECIFICITY: f32 = 1.0;
/// Specificity of the top-of-document alphabetic-line fallback.
pub const NAME_HEURISTIC_SPECIFICITY: f32 = 0.5;
/// Specificity of a DD/MM/YYYY or DD-MM-YYYY token.
pub const DATE_SPECIFICITY: f32 = 1.0;
/// Specificity of a spelled-out gender token (Male/Female/Other).
pub const GENDER_WORD_SPECIFICITY: f32 = 1.0;
/// Specificity of a single-letter gender token (M/F).
pub const GENDER_LETTER_SPECIFICITY: f32 = 0.7;
/// Specificity of an Aadhaar- or PAN-shaped ID number.
pub const ID_NUMBER_SPECIFICITY: f32 = 1.0;
/// Specificity of the trailing address block.
pub const ADDRESS_SPECIFICITY: f32 = 0.6;

lazy_static! {
    /// Labeled name line, English or Hindi label.
    pub static ref NAME_LABEL: Regex =
        Regex::new(r"(?i)^\s*(?:name|नाम)\s*[:\-]\s*(\S.*?)\s*$").unwrap();

    /// DD/MM/YYYY or DD-MM-YYYY, consistent separator.
    pub static ref DATE_TOKEN: Regex =
        Regex::new(r"\b(\d{2})/(\d{2})/(\d{4})\b|\b(\d{2})-(\d{2})-(\d{4})\b").unwrap();

    /// Spelled-out gender tokens.
    pub static ref GENDER_WORD: Regex =
        Regex::new(r"(?i)\b(male|female|other)\b").unwrap();

    /// Single-letter gender tokens.
    pub static ref GENDER_LETTER: Regex =
        Regex::new(r"(?i)\b(m|f)\b").unwrap();

    /// Twelve digits, optionally grouped in blocks of four.
    pub static ref AADHAAR_NUMBER: Regex =
        Regex::new(r"\b\d{4}\s?\d{4}\s?\d{4}\b").unwrap();

    /// Five letters, four digits, one letter.
    pub static ref PAN_NUMBER: Regex =
        Regex::new(r"\b[A-Z]{5}[0-9]{4}[A-Z]\b").unwrap();

    /// Leading address label, stripped from the collected block.
    pub static ref ADDRESS_LABEL: Regex =
        Regex::new(r"(?i)^\s*address\s*[:\-]\s*").unwrap();

    /// A line made of 2-4 purely alphabetic words, the name fallback shape.
    pub static ref ALPHABETIC_LINE: Regex =
        Regex::new(r"^\s*\p{Alphabetic}+(?:\s+\p{Alphabetic}+){1,3}\s*$").unwrap();
}
