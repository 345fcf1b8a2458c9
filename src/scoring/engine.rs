use std::sync::LazyLock;

use chrono::{DateTime, Utc};

use crate::error::RiskError;
use crate::models::Patient;

use super::age::age_in_years;
use super::alerts::derive_findings;
use super::calculators::{asa_score, mets_score, rcri_items, stop_bang_items};
use super::category::categorize;
use super::keywords::EngineConfig;
use super::matcher::{ClinicalText, TextMatcher};
use super::types::{RiskAssessment, RiskEvaluator, ScoreBreakdown, Scores};

/// Default implementation of the risk engine.
/// Holds only read-only configuration and its compiled matcher; every call
/// is an isolated computation.
#[derive(Debug, Clone, Default)]
pub struct DefaultRiskEngine {
    config: EngineConfig,
    matcher: TextMatcher,
}

impl DefaultRiskEngine {
    /// Compile the keyword lists for the configured match mode. A list that
    /// fails to compile is reported here, never as a missed match later.
    pub fn new(config: EngineConfig) -> Result<Self, RiskError> {
        let matcher = TextMatcher::compile(config.match_mode, config.keywords.lists())?;
        tracing::info!(match_mode = config.match_mode.as_str(), "Risk engine ready");
        Ok(Self { config, matcher })
    }

    /// Engine configured from `$PERIOP_KEYWORDS`, or the parity defaults.
    pub fn from_env() -> Result<Self, RiskError> {
        Self::new(EngineConfig::from_env()?)
    }

    fn text_for(&self, patient: &Patient) -> ClinicalText {
        ClinicalText::new(patient, self.matcher.clone())
    }

    /// Run the four calculators. None of them reads another's output.
    fn breakdown(&self, patient: &Patient, text: &ClinicalText, age: Option<u32>) -> ScoreBreakdown {
        let kw = &self.config.keywords;
        ScoreBreakdown {
            age,
            asa_score: asa_score(patient, text, kw),
            stop_bang_items: stop_bang_items(text, age, kw),
            rcri_items: rcri_items(text, kw),
            mets_score: mets_score(text, kw),
        }
    }
}

impl RiskEvaluator for DefaultRiskEngine {
    fn evaluate(&self, patient: &Patient, now: DateTime<Utc>) -> RiskAssessment {
        let age = age_in_years(patient.date_of_birth.as_deref(), now);
        let text = self.text_for(patient);
        let breakdown = self.breakdown(patient, &text, age);

        let scores = Scores {
            asa: breakdown.asa_score,
            stop_bang: breakdown.stop_bang_score(),
            rcri: breakdown.rcri_score(),
            mets: breakdown.mets_score,
        };

        let findings = derive_findings(patient, &text, &scores, age, &self.config.keywords);
        let category = categorize(&scores, findings.critical_alerts.len());

        tracing::debug!(
            asa = scores.asa,
            stop_bang = scores.stop_bang,
            rcri = scores.rcri,
            mets = scores.mets,
            alerts = findings.critical_alerts.len(),
            recommendations = findings.pre_op_recommendations.len(),
            category = category.as_str(),
            "Risk assessment computed"
        );

        RiskAssessment::from_parts(scores, findings, category)
    }

    fn explain(&self, patient: &Patient, now: DateTime<Utc>) -> ScoreBreakdown {
        let age = age_in_years(patient.date_of_birth.as_deref(), now);
        let text = self.text_for(patient);
        self.breakdown(patient, &text, age)
    }
}

static DEFAULT_ENGINE: LazyLock<DefaultRiskEngine> = LazyLock::new(DefaultRiskEngine::default);

/// Score a patient with the built-in keyword lists and substring matching.
pub fn evaluate(patient: &Patient, now: DateTime<Utc>) -> RiskAssessment {
    DEFAULT_ENGINE.evaluate(patient, now)
}

/// Like [`evaluate`], returning the all-unknown result when `patient` is `None`.
pub fn evaluate_optional(patient: Option<&Patient>, now: DateTime<Utc>) -> RiskAssessment {
    DEFAULT_ENGINE.evaluate_optional(patient, now)
}

/// Score many patients in parallel with the default engine.
pub fn evaluate_batch(patients: &[Patient], now: DateTime<Utc>) -> Vec<RiskAssessment> {
    DEFAULT_ENGINE.evaluate_batch(patients, now)
}

/// Per-item breakdown with the default engine.
pub fn explain(patient: &Patient, now: DateTime<Utc>) -> ScoreBreakdown {
    DEFAULT_ENGINE.explain(patient, now)
}
