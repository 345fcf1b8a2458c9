use crate::config::AGE_RISK_THRESHOLD;
use crate::models::enums::{RcriItem, StopBangItem};
use crate::models::Patient;

use super::keywords::KeywordSets;
use super::matcher::ClinicalText;

// ---------------------------------------------------------------------------
// ASA physical status
// ---------------------------------------------------------------------------

/// ASA class, 1-4. Starts at 1 and rises to the highest tier whose keywords
/// match; the tiers only ever raise the floor, so order of checks is irrelevant.
pub fn asa_score(patient: &Patient, text: &ClinicalText, kw: &KeywordSets) -> u8 {
    let mut score = 1;
    if text.history_has(&kw.asa_mild_systemic) || !patient.surgical_history.is_empty() {
        score = score.max(2);
    }
    if text.history_has(&kw.asa_severe_systemic) {
        score = score.max(3);
    }
    if text.history_has(&kw.asa_life_threatening) {
        score = score.max(4);
    }
    score
}

// ---------------------------------------------------------------------------
// STOP-Bang
// ---------------------------------------------------------------------------

/// STOP-Bang items that fired. Each is independent; no early exit.
///
/// Neck circumference and sex are not in the patient model, so those two
/// canonical items are never counted.
pub fn stop_bang_items(text: &ClinicalText, age: Option<u32>, kw: &KeywordSets) -> Vec<StopBangItem> {
    let checks = [
        (StopBangItem::Snoring, text.history_has(&kw.snoring)),
        (StopBangItem::Tiredness, text.history_has(&kw.tiredness)),
        (StopBangItem::ObservedApnea, text.history_has(&kw.observed_apnea)),
        (StopBangItem::Pressure, text.history_has(&kw.high_blood_pressure)),
        (StopBangItem::Bmi, text.history_has(&kw.morbid_obesity)),
        (
            StopBangItem::Age,
            age.is_some_and(|a| a > AGE_RISK_THRESHOLD),
        ),
    ];
    checks
        .into_iter()
        .filter_map(|(item, hit)| hit.then_some(item))
        .collect()
}

/// STOP-Bang score, 0-6.
pub fn stop_bang_score(text: &ClinicalText, age: Option<u32>, kw: &KeywordSets) -> u8 {
    stop_bang_items(text, age, kw).len() as u8
}

// ---------------------------------------------------------------------------
// RCRI
// ---------------------------------------------------------------------------

/// RCRI criteria that fired. Elevated creatinine is not counted: the patient
/// model carries no lab values.
pub fn rcri_items(text: &ClinicalText, kw: &KeywordSets) -> Vec<RcriItem> {
    let checks = [
        (
            RcriItem::IschemicHeartDisease,
            text.history_has(&kw.ischemic_heart_disease),
        ),
        (RcriItem::HeartFailure, text.history_has(&kw.heart_failure)),
        (
            RcriItem::CerebrovascularDisease,
            text.history_has(&kw.cerebrovascular_disease),
        ),
        (RcriItem::Insulin, text.medication_has(&kw.insulin)),
    ];
    checks
        .into_iter()
        .filter_map(|(item, hit)| hit.then_some(item))
        .collect()
}

/// RCRI score, 0-4.
pub fn rcri_score(text: &ClinicalText, kw: &KeywordSets) -> u8 {
    rcri_items(text, kw).len() as u8
}

// ---------------------------------------------------------------------------
// METs
// ---------------------------------------------------------------------------

/// Functional capacity bucket. First match wins:
/// 0 (very poor), 2 (limited), otherwise 4 (assumed adequate).
pub fn mets_score(text: &ClinicalText, kw: &KeywordSets) -> u8 {
    if text.history_has(&kw.poor_functional_capacity) {
        0
    } else if text.history_has(&kw.limited_functional_capacity) {
        2
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::matcher::TextMatcher;

    fn text_for(patient: &Patient) -> ClinicalText {
        ClinicalText::new(patient, TextMatcher::default())
    }

    fn history(items: &[&str]) -> Patient {
        Patient::default().with_history(items.iter().copied())
    }

    // --- ASA ---

    #[test]
    fn asa_healthy_is_one() {
        let p = Patient::default();
        assert_eq!(asa_score(&p, &text_for(&p), &KeywordSets::default()), 1);
    }

    #[test]
    fn asa_surgical_history_alone_is_two() {
        let p = Patient::default().with_surgical_history(["Appendectomy 2001"]);
        assert_eq!(asa_score(&p, &text_for(&p), &KeywordSets::default()), 2);
    }

    #[test]
    fn asa_takes_highest_matched_tier() {
        let kw = KeywordSets::default();
        let p = history(&["CHF", "Hypertension"]);
        assert_eq!(asa_score(&p, &text_for(&p), &kw), 4);

        let p = history(&["Asthma"]);
        assert_eq!(asa_score(&p, &text_for(&p), &kw), 3);

        let p = history(&["Smoker"]);
        assert_eq!(asa_score(&p, &text_for(&p), &kw), 2);
    }

    // --- STOP-Bang ---

    #[test]
    fn stop_bang_sleep_apnea_hits_three_items() {
        let p = history(&["Sleep apnea"]);
        let items = stop_bang_items(&text_for(&p), None, &KeywordSets::default());
        assert_eq!(
            items,
            vec![
                StopBangItem::Snoring,
                StopBangItem::Tiredness,
                StopBangItem::ObservedApnea
            ]
        );
    }

    #[test]
    fn stop_bang_age_item_requires_known_age_over_fifty() {
        let kw = KeywordSets::default();
        let p = Patient::default();
        let text = text_for(&p);
        assert_eq!(stop_bang_score(&text, None, &kw), 0);
        assert_eq!(stop_bang_score(&text, Some(50), &kw), 0);
        assert_eq!(stop_bang_score(&text, Some(51), &kw), 1);
    }

    #[test]
    fn stop_bang_max_is_six() {
        let p = history(&["Sleep apnea", "Hypertension", "Morbid obesity"]);
        assert_eq!(
            stop_bang_score(&text_for(&p), Some(70), &KeywordSets::default()),
            6
        );
    }

    // --- RCRI ---

    #[test]
    fn rcri_insulin_comes_from_medications() {
        let kw = KeywordSets::default();
        let p = Patient::default().with_medications(["Insulin glargine 20 units"]);
        assert_eq!(rcri_items(&text_for(&p), &kw), vec![RcriItem::Insulin]);

        let p = history(&["Insulin resistance"]);
        assert_eq!(rcri_score(&text_for(&p), &kw), 0);
    }

    #[test]
    fn rcri_counts_each_criterion_once() {
        let p = Patient::default()
            .with_history(["CAD", "Congestive heart failure", "TIA 2022"])
            .with_medications(["Insulin"]);
        assert_eq!(rcri_score(&text_for(&p), &KeywordSets::default()), 4);
    }

    // --- METs ---

    #[test]
    fn mets_first_bucket_wins() {
        let kw = KeywordSets::default();
        let p = history(&["Stable angina", "Severe COPD"]);
        assert_eq!(mets_score(&text_for(&p), &kw), 0);

        let p = history(&["Moderate COPD"]);
        assert_eq!(mets_score(&text_for(&p), &kw), 2);

        let p = history(&["Hypertension"]);
        assert_eq!(mets_score(&text_for(&p), &kw), 4);
    }
}
