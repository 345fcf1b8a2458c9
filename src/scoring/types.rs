use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::enums::{RcriItem, RiskCategory, StopBangItem};
use crate::models::Patient;

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// The four numeric indices, computed independently of one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scores {
    /// ASA physical status, 1-4.
    pub asa: u8,
    /// STOP-Bang, 0-6.
    pub stop_bang: u8,
    /// RCRI, 0-4.
    pub rcri: u8,
    /// Functional capacity bucket: 0, 2 or 4.
    pub mets: u8,
}

// ---------------------------------------------------------------------------
// RiskAssessment
// ---------------------------------------------------------------------------

/// Engine output. Carries no identity of its own; it is always merged onto
/// (or shown next to) the patient snapshot it was computed from.
///
/// Score fields are `None` only in the no-patient result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskAssessment {
    pub asa_score: Option<u8>,
    pub stop_bang_score: Option<u8>,
    pub rcri_score: Option<u8>,
    pub mets_score: Option<u8>,
    pub risk_category: Option<RiskCategory>,
    pub critical_alerts: Vec<String>,
    pub pre_op_recommendations: Vec<String>,
}

impl RiskAssessment {
    /// Result for "no patient supplied": every score unknown, no findings.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        scores: Scores,
        findings: Findings,
        risk_category: RiskCategory,
    ) -> Self {
        Self {
            asa_score: Some(scores.asa),
            stop_bang_score: Some(scores.stop_bang),
            rcri_score: Some(scores.rcri),
            mets_score: Some(scores.mets),
            risk_category: Some(risk_category),
            critical_alerts: findings.critical_alerts,
            pre_op_recommendations: findings.pre_op_recommendations,
        }
    }

    pub fn is_high_risk(&self) -> bool {
        self.risk_category == Some(RiskCategory::High)
    }
}

// ---------------------------------------------------------------------------
// Findings
// ---------------------------------------------------------------------------

/// Alerts and recommended tests produced by the second rule pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub critical_alerts: Vec<String>,
    pub pre_op_recommendations: Vec<String>,
}

impl Findings {
    pub(crate) fn alert(&mut self, message: impl Into<String>) {
        push_unique(&mut self.critical_alerts, message.into());
    }

    pub(crate) fn recommend(&mut self, test: &str) {
        push_unique(&mut self.pre_op_recommendations, test.to_string());
    }
}

/// Append unless an identical string is already present.
fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}

// ---------------------------------------------------------------------------
// ScoreBreakdown
// ---------------------------------------------------------------------------

/// Which rule items fired, for showing a clinician why a score is what it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub age: Option<u32>,
    pub asa_score: u8,
    pub stop_bang_items: Vec<StopBangItem>,
    pub rcri_items: Vec<RcriItem>,
    pub mets_score: u8,
}

impl ScoreBreakdown {
    pub fn stop_bang_score(&self) -> u8 {
        self.stop_bang_items.len() as u8
    }

    pub fn rcri_score(&self) -> u8 {
        self.rcri_items.len() as u8
    }
}

// ---------------------------------------------------------------------------
// RiskEvaluator trait
// ---------------------------------------------------------------------------

/// A stateless scorer. `now` is always explicit so results are reproducible.
pub trait RiskEvaluator: Sync {
    /// Score one patient snapshot.
    fn evaluate(&self, patient: &Patient, now: DateTime<Utc>) -> RiskAssessment;

    /// Explain the STOP-Bang and RCRI items behind a score.
    fn explain(&self, patient: &Patient, now: DateTime<Utc>) -> ScoreBreakdown;

    /// Score a patient that may be missing entirely.
    fn evaluate_optional(
        &self,
        patient: Option<&Patient>,
        now: DateTime<Utc>,
    ) -> RiskAssessment {
        match patient {
            Some(p) => self.evaluate(p, now),
            None => RiskAssessment::unknown(),
        }
    }

    /// Score many patients in parallel. Output order matches input order.
    fn evaluate_batch(&self, patients: &[Patient], now: DateTime<Utc>) -> Vec<RiskAssessment> {
        patients.par_iter().map(|p| self.evaluate(p, now)).collect()
    }
}
