//! MedSense Risk — rule-based risk scoring.
//!
//! A pure function of the mapped symptoms: no state, no failure modes.
//! Score formula and tier thresholds are the tunable heart of the
//! safety triage, so they live in one place with exact boundary tests.

use serde::Serialize;

use medsense_nlp::SymptomMatch;

/// Discrete risk tier derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    Elevated,
    High,
}

impl RiskLevel {
    /// Tier thresholds: <25 Low, <50 Medium, <75 Elevated, else High.
    pub fn from_score(score: i64) -> Self {
        if score < 25 {
            Self::Low
        } else if score < 50 {
            Self::Medium
        } else if score < 75 {
            Self::Elevated
        } else {
            Self::High
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RiskAssessment {
    pub risk_score: i64,
    pub risk_level: RiskLevel,
}

/// Compute a bounded risk score from the mapped symptoms.
///
/// Empty input scores 0/Low. Otherwise `min(100, total*10 + max*5)`
/// over the match severities, integer arithmetic throughout.
///
/// Severities are taken as-is; the vocabulary loader is responsible for
/// supplying non-negative values, and a negative severity here would
/// break the monotonicity of the score.
pub fn compute(matches: &[SymptomMatch]) -> RiskAssessment {
    if matches.is_empty() {
        return RiskAssessment { risk_score: 0, risk_level: RiskLevel::Low };
    }

    let total: i64 = matches.iter().map(|m| m.severity).sum();
    let max_sev: i64 = matches.iter().map(|m| m.severity).max().unwrap_or(1);

    let risk_score = (total * 10 + max_sev * 5).min(100);
    RiskAssessment { risk_score, risk_level: RiskLevel::from_score(risk_score) }
}
