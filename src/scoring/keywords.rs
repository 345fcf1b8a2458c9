use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::RiskError;
use crate::models::enums::MatchMode;

/// Keyword lists behind every text-triggered rule.
///
/// Rule logic only ever refers to these lists by name, so the vocabulary can
/// be tightened (or localized) from a JSON file without touching the rules.
/// A file may override any subset; missing lists keep their built-in values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordSets {
    // ASA tiers (medical history)
    pub asa_mild_systemic: Vec<String>,
    pub asa_severe_systemic: Vec<String>,
    pub asa_life_threatening: Vec<String>,

    // STOP-Bang (medical history)
    pub snoring: Vec<String>,
    pub tiredness: Vec<String>,
    pub observed_apnea: Vec<String>,
    pub high_blood_pressure: Vec<String>,
    pub morbid_obesity: Vec<String>,

    // RCRI
    pub ischemic_heart_disease: Vec<String>,
    pub heart_failure: Vec<String>,
    pub cerebrovascular_disease: Vec<String>,
    /// Matched against medications, not history.
    pub insulin: Vec<String>,

    // METs buckets (medical history)
    pub poor_functional_capacity: Vec<String>,
    pub limited_functional_capacity: Vec<String>,

    // Critical alerts
    /// Matched against medications.
    pub anticoagulants: Vec<String>,
    /// Matched against allergies.
    pub severe_allergy: Vec<String>,
    pub diagnosed_osa: Vec<String>,
    pub uncontrolled_hypertension: Vec<String>,
    pub uncontrolled_diabetes: Vec<String>,
    pub recent_cardiac_event: Vec<String>,
    pub pregnancy: Vec<String>,

    // General pre-operative tests (medical history)
    pub ekg_age_conditions: Vec<String>,
    pub cbc_conditions: Vec<String>,
    pub hba1c_conditions: Vec<String>,
    pub cmp_conditions: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self {
            asa_mild_systemic: words(&["hypertension", "diabetes", "obesity", "smoker", "alcohol"]),
            asa_severe_systemic: words(&[
                "poorly controlled hypertension",
                "poorly controlled diabetes",
                "stable angina",
                "prior mi",
                "prior cva",
                "morbid obesity",
                "chronic renal failure",
                "moderate copd",
                "asthma",
            ]),
            asa_life_threatening: words(&[
                "unstable angina",
                "severe copd",
                "chf",
                "recent mi",
                "recent cva",
                "end-stage renal disease",
            ]),

            snoring: words(&["snoring", "sleep apnea", "osa"]),
            tiredness: words(&["tiredness", "fatigue", "sleepy", "sleep apnea"]),
            observed_apnea: words(&["observed apnea", "sleep apnea", "osa"]),
            high_blood_pressure: words(&["hypertension", "high blood pressure"]),
            morbid_obesity: words(&["morbid obesity"]),

            ischemic_heart_disease: words(&["ischemic heart disease", "mi", "angina", "cad"]),
            heart_failure: words(&["congestive heart failure", "chf"]),
            cerebrovascular_disease: words(&["cerebrovascular disease", "cva", "tia"]),
            insulin: words(&["insulin"]),

            poor_functional_capacity: words(&[
                "chf",
                "severe copd",
                "unstable angina",
                "end-stage renal disease",
            ]),
            limited_functional_capacity: words(&[
                "moderate copd",
                "stable angina",
                "prior mi",
                "prior cva",
            ]),

            anticoagulants: words(&[
                "warfarin",
                "heparin",
                "rivaroxaban",
                "apixaban",
                "dabigatran",
                "edoxaban",
            ]),
            severe_allergy: words(&["anaphylaxis", "severe allergy"]),
            diagnosed_osa: words(&["obstructive sleep apnea", "osa"]),
            uncontrolled_hypertension: words(&["uncontrolled hypertension", "hypertensive crisis"]),
            uncontrolled_diabetes: words(&["uncontrolled diabetes", "diabetic ketoacidosis"]),
            recent_cardiac_event: words(&["recent mi", "recent cva"]),
            pregnancy: words(&["pregnancy"]),

            ekg_age_conditions: words(&["hypertension", "diabetes"]),
            cbc_conditions: words(&["anemia", "bleeding disorder"]),
            hba1c_conditions: words(&["diabetes"]),
            cmp_conditions: words(&["renal failure", "liver disease", "electrolyte imbalance"]),
        }
    }
}

/// Read and parse a JSON reference file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RiskError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| RiskError::ReferenceDataLoad(path.display().to_string(), e.to_string()))?;
    let parsed = serde_json::from_str(&raw)
        .map_err(|e| RiskError::ReferenceDataParse(path.display().to_string(), e.to_string()))?;

    tracing::info!(path = %path.display(), "Loaded keyword reference data");
    Ok(parsed)
}

impl KeywordSets {
    /// Load keyword lists from a JSON file.
    pub fn load(path: &Path) -> Result<Self, RiskError> {
        read_json(path)
    }

    /// Load from `$PERIOP_KEYWORDS` when set, otherwise the built-in lists.
    pub fn from_env() -> Result<Self, RiskError> {
        match config::keywords_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Every list with its field name, in declaration order.
    pub fn lists(&self) -> [(&'static str, &[String]); 25] {
        [
            ("asa_mild_systemic", self.asa_mild_systemic.as_slice()),
            ("asa_severe_systemic", self.asa_severe_systemic.as_slice()),
            ("asa_life_threatening", self.asa_life_threatening.as_slice()),
            ("snoring", self.snoring.as_slice()),
            ("tiredness", self.tiredness.as_slice()),
            ("observed_apnea", self.observed_apnea.as_slice()),
            ("high_blood_pressure", self.high_blood_pressure.as_slice()),
            ("morbid_obesity", self.morbid_obesity.as_slice()),
            ("ischemic_heart_disease", self.ischemic_heart_disease.as_slice()),
            ("heart_failure", self.heart_failure.as_slice()),
            ("cerebrovascular_disease", self.cerebrovascular_disease.as_slice()),
            ("insulin", self.insulin.as_slice()),
            ("poor_functional_capacity", self.poor_functional_capacity.as_slice()),
            ("limited_functional_capacity", self.limited_functional_capacity.as_slice()),
            ("anticoagulants", self.anticoagulants.as_slice()),
            ("severe_allergy", self.severe_allergy.as_slice()),
            ("diagnosed_osa", self.diagnosed_osa.as_slice()),
            ("uncontrolled_hypertension", self.uncontrolled_hypertension.as_slice()),
            ("uncontrolled_diabetes", self.uncontrolled_diabetes.as_slice()),
            ("recent_cardiac_event", self.recent_cardiac_event.as_slice()),
            ("pregnancy", self.pregnancy.as_slice()),
            ("ekg_age_conditions", self.ekg_age_conditions.as_slice()),
            ("cbc_conditions", self.cbc_conditions.as_slice()),
            ("hba1c_conditions", self.hba1c_conditions.as_slice()),
            ("cmp_conditions", self.cmp_conditions.as_slice()),
        ]
    }
}

/// Everything that parameterizes an engine instance.
///
/// The file form is flat: keyword lists plus an optional `match_mode` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    #[serde(flatten)]
    pub keywords: KeywordSets,
    pub match_mode: MatchMode,
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, RiskError> {
        read_json(path)
    }

    /// Load from `$PERIOP_KEYWORDS` when set, otherwise the parity defaults.
    pub fn from_env() -> Result<Self, RiskError> {
        match config::keywords_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}
