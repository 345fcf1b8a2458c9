use crate::config::{
    HIGH_ASA, HIGH_METS_BELOW, HIGH_RCRI, HIGH_STOP_BANG, MODERATE_ASA, MODERATE_METS_BELOW,
    MODERATE_RCRI, MODERATE_STOP_BANG,
};
use crate::models::enums::RiskCategory;

use super::types::Scores;

/// Collapse the four scores and the alert count into one category.
///
/// High is checked first, then Moderate. Any critical alert alone forces High,
/// whatever the numeric scores say.
pub fn categorize(scores: &Scores, alert_count: usize) -> RiskCategory {
    if scores.asa >= HIGH_ASA
        || alert_count > 0
        || scores.stop_bang >= HIGH_STOP_BANG
        || scores.rcri >= HIGH_RCRI
        || scores.mets < HIGH_METS_BELOW
    {
        RiskCategory::High
    } else if scores.asa >= MODERATE_ASA
        || scores.stop_bang >= MODERATE_STOP_BANG
        || scores.rcri >= MODERATE_RCRI
        || scores.mets < MODERATE_METS_BELOW
    {
        RiskCategory::Moderate
    } else {
        RiskCategory::Low
    }
}
