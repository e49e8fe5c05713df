//! Weighted aggregation of findings into a RiskResult.

use kyc_types::{RiskResult, RiskThresholds, RiskWeights, Severity, ValidationFinding};

/// Build a RiskResult from findings. Fail contributes the field's configured
/// weight, Warning half of it, Pass nothing; the total is clamped to 100.
/// Findings come back sorted Fail before Warning before Pass, then by field
/// declaration order (document-level findings ahead of per-field ones).
pub fn score(
    mut findings: Vec<ValidationFinding>,
    weights: &RiskWeights,
    thresholds: &RiskThresholds,
) -> RiskResult {
    findings.sort_by(|a, b| a.severity.cmp(&b.severity).then(a.kind.cmp(&b.kind)));

    let total: u32 = findings
        .iter()
        .map(|finding| match finding.severity {
            Severity::Fail => weights.fail_weight(finding.kind),
            Severity::Warning => weights.warning_weight(finding.kind),
            Severity::Pass => 0,
        })
        .sum();
    let score = total.min(100) as u8;

    RiskResult {
        score,
        level: thresholds.level_for(score),
        findings,
    }
}
