use crate::config::{AGE_RISK_THRESHOLD, MALLAMPATI_ALERT_THRESHOLD, STOP_BANG_OSA_THRESHOLD};
use crate::models::Patient;

use super::keywords::KeywordSets;
use super::matcher::ClinicalText;
use super::types::{Findings, Scores};

pub const ALERT_ANTICOAGULANTS: &str = "Active anticoagulants";
pub const ALERT_SEVERE_ALLERGIES: &str = "Severe allergies";
pub const ALERT_OSA: &str = "Diagnosed Obstructive Sleep Apnea (OSA)";
pub const ALERT_UNCONTROLLED_HYPERTENSION: &str = "Uncontrolled Hypertension";
pub const ALERT_UNCONTROLLED_DIABETES: &str = "Uncontrolled Diabetes";
pub const ALERT_RECENT_MI_CVA: &str = "Recent MI/CVA";
pub const ALERT_PREGNANT: &str = "Patient is pregnant";

pub const REC_INR_PTT: &str = "INR/PTT check";
pub const REC_SLEEP_STUDY: &str = "Sleep Study (if not recent)";
pub const REC_BP_OPTIMIZATION: &str = "BP optimization";
pub const REC_GLUCOSE_OPTIMIZATION: &str = "HbA1c, Glucose optimization";
pub const REC_CARDIAC_NEURO_CONSULT: &str = "Cardiac/Neurology consult";
pub const REC_OB_CLEARANCE: &str = "OB clearance";
pub const REC_EKG: &str = "EKG";
pub const REC_CBC: &str = "CBC";
pub const REC_HBA1C: &str = "HbA1c";
pub const REC_CMP: &str = "CMP";

/// Airway alert text, with the exam class interpolated.
pub fn airway_alert(mallampati: u8) -> String {
    format!("Significant airway issue (Mallampati Score {mallampati})")
}

/// Second rule pass: critical alerts, then recommended pre-operative tests.
///
/// Rules are independent and always all evaluated; their order only fixes
/// the output order and which rule "owns" a recommendation first.
pub fn derive_findings(
    patient: &Patient,
    text: &ClinicalText,
    scores: &Scores,
    age: Option<u32>,
    kw: &KeywordSets,
) -> Findings {
    let mut out = Findings::default();

    // [1] Critical alerts

    if text.medication_has(&kw.anticoagulants) {
        out.alert(ALERT_ANTICOAGULANTS);
        out.recommend(REC_INR_PTT);
    }

    if text.allergy_has(&kw.severe_allergy) {
        out.alert(ALERT_SEVERE_ALLERGIES);
    }

    if scores.stop_bang >= STOP_BANG_OSA_THRESHOLD || text.history_has(&kw.diagnosed_osa) {
        out.alert(ALERT_OSA);
        out.recommend(REC_SLEEP_STUDY);
    }

    if let Some(mallampati) = patient.mallampati_score {
        if mallampati >= MALLAMPATI_ALERT_THRESHOLD {
            out.alert(airway_alert(mallampati));
        }
    }

    if text.history_has(&kw.uncontrolled_hypertension) {
        out.alert(ALERT_UNCONTROLLED_HYPERTENSION);
        out.recommend(REC_BP_OPTIMIZATION);
    }

    if text.history_has(&kw.uncontrolled_diabetes) {
        out.alert(ALERT_UNCONTROLLED_DIABETES);
        out.recommend(REC_GLUCOSE_OPTIMIZATION);
    }

    if text.history_has(&kw.recent_cardiac_event) {
        out.alert(ALERT_RECENT_MI_CVA);
        out.recommend(REC_CARDIAC_NEURO_CONSULT);
    }

    if text.history_has(&kw.pregnancy) {
        out.alert(ALERT_PREGNANT);
        out.recommend(REC_OB_CLEARANCE);
    }

    // [2] General pre-operative tests

    let older_with_risk_factor = age.is_some_and(|a| a > AGE_RISK_THRESHOLD)
        && text.history_has(&kw.ekg_age_conditions);
    if scores.asa >= 3 || scores.rcri >= 1 || older_with_risk_factor {
        out.recommend(REC_EKG);
    }

    if text.history_has(&kw.cbc_conditions) {
        out.recommend(REC_CBC);
    }

    if text.history_has(&kw.hba1c_conditions) {
        out.recommend(REC_HBA1C);
    }

    if text.history_has(&kw.cmp_conditions) {
        out.recommend(REC_CMP);
    }

    out
}
