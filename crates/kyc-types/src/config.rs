//! Pipeline configuration. Risk weights and level boundaries are deliberately
//! configuration rather than constants; the defaults mirror the reference
//! deployment.

use crate::types::{FieldKind, RiskLevel};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Upper bound on an uploaded document, in bytes.
    pub max_document_bytes: usize,
    /// Time budget for one recognition pass.
    pub recognition_timeout_ms: u64,
    /// Cap on the number of lines collected into the address block.
    pub max_address_lines: usize,
    pub weights: RiskWeights,
    pub thresholds: RiskThresholds,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: 10 * 1024 * 1024,
            recognition_timeout_ms: 30_000,
            max_address_lines: 4,
            weights: RiskWeights::default(),
            thresholds: RiskThresholds::default(),
        }
    }
}

impl VerificationConfig {
    pub fn recognition_timeout(&self) -> Duration {
        Duration::from_millis(self.recognition_timeout_ms)
    }
}

/// Fail contribution per field; Warning contributes half, Pass nothing.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub name: u32,
    pub date_of_birth: u32,
    pub gender: u32,
    pub id_number: u32,
    pub address: u32,
    /// Weight of the document-level failure finding.
    pub document: u32,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            name: 20,
            date_of_birth: 25,
            gender: 10,
            id_number: 30,
            address: 5,
            document: 100,
        }
    }
}

impl RiskWeights {
    pub fn fail_weight(&self, kind: Option<FieldKind>) -> u32 {
        match kind {
            Some(FieldKind::Name) => self.name,
            Some(FieldKind::DateOfBirth) => self.date_of_birth,
            Some(FieldKind::Gender) => self.gender,
            Some(FieldKind::IdNumber) => self.id_number,
            Some(FieldKind::Address) => self.address,
            None => self.document,
        }
    }

    pub fn warning_weight(&self, kind: Option<FieldKind>) -> u32 {
        self.fail_weight(kind) / 2
    }
}

/// Score boundaries for the risk levels. Both bounds are inclusive: a score
/// of exactly `low_max` is still Low.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub low_max: u8,
    pub medium_max: u8,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_max: 30,
            medium_max: 70,
        }
    }
}

impl RiskThresholds {
    pub fn level_for(&self, score: u8) -> RiskLevel {
        if score <= self.low_max {
            RiskLevel::Low
        } else if score <= self.medium_max {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}
