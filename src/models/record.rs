use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::patient::{list_field, Patient};
use crate::scoring::RiskAssessment;

/// A stored patient: intake fields, the latest assessment, and the
/// clinician-maintained checklist of completed recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub intake: Patient,
    #[serde(default)]
    pub airway_exam_findings: Option<String>,
    #[serde(default)]
    pub clinician_notes: Option<String>,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
    /// Owned by the clinician; the engine never reads or writes it.
    #[serde(default)]
    pub completed_recommendations: Vec<String>,
    pub last_modified: DateTime<Utc>,
    pub modified_by: String,
}

impl PatientRecord {
    pub fn new(
        name: impl Into<String>,
        intake: Patient,
        now: DateTime<Utc>,
        modified_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            intake,
            airway_exam_findings: None,
            clinician_notes: None,
            assessment: RiskAssessment::unknown(),
            completed_recommendations: Vec::new(),
            last_modified: now,
            modified_by: modified_by.into(),
        }
    }

    /// Replace the assessment fields. `completed_recommendations` is untouched.
    pub fn apply_assessment(&mut self, assessment: RiskAssessment) {
        self.assessment = assessment;
    }

    /// Apply a field-level update. Only supplied fields change.
    pub fn apply_update(&mut self, update: PatientUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(dob) = update.date_of_birth {
            self.intake.date_of_birth = Some(dob);
        }
        if let Some(items) = update.medical_history {
            self.intake.medical_history = items;
        }
        if let Some(items) = update.medications {
            self.intake.medications = items;
        }
        if let Some(items) = update.allergies {
            self.intake.allergies = items;
        }
        if let Some(items) = update.surgical_history {
            self.intake.surgical_history = items;
        }
        if let Some(mallampati) = update.mallampati_score {
            self.intake.mallampati_score = mallampati;
        }
        if let Some(findings) = update.airway_exam_findings {
            self.airway_exam_findings = Some(findings);
        }
        if let Some(notes) = update.clinician_notes {
            self.clinician_notes = Some(notes);
        }
        if let Some(done) = update.completed_recommendations {
            self.completed_recommendations = done;
        }
    }

    /// Stamp audit fields. The caller supplies who made the change.
    pub fn touch(&mut self, now: DateTime<Utc>, modified_by: impl Into<String>) {
        self.last_modified = now;
        self.modified_by = modified_by.into();
    }

    /// Recommendations not yet checked off.
    pub fn outstanding_recommendations(&self) -> Vec<&str> {
        self.assessment
            .pre_op_recommendations
            .iter()
            .filter(|r| !self.completed_recommendations.contains(*r))
            .map(String::as_str)
            .collect()
    }
}

/// A partial update; `None` leaves the stored value as it is.
///
/// `mallampati_score: Some(None)` clears the exam class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientUpdate {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    #[serde(deserialize_with = "list_field::deserialize_option")]
    pub medical_history: Option<Vec<String>>,
    #[serde(deserialize_with = "list_field::deserialize_option")]
    pub medications: Option<Vec<String>>,
    #[serde(deserialize_with = "list_field::deserialize_option")]
    pub allergies: Option<Vec<String>>,
    #[serde(deserialize_with = "list_field::deserialize_option")]
    pub surgical_history: Option<Vec<String>>,
    pub mallampati_score: Option<Option<u8>>,
    pub airway_exam_findings: Option<String>,
    pub clinician_notes: Option<String>,
    pub completed_recommendations: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::enums::RiskCategory;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap()
    }

    fn record() -> PatientRecord {
        PatientRecord::new(
            "Jane Roe",
            Patient::default().with_history(["Hypertension"]),
            now(),
            "dr.smith",
        )
    }

    #[test]
    fn apply_assessment_keeps_completed_recommendations() {
        let mut rec = record();
        rec.completed_recommendations = vec!["EKG".into()];

        rec.apply_assessment(RiskAssessment {
            asa_score: Some(3),
            risk_category: Some(RiskCategory::Moderate),
            pre_op_recommendations: vec!["EKG".into(), "CBC".into()],
            ..RiskAssessment::default()
        });

        assert_eq!(rec.assessment.asa_score, Some(3));
        assert_eq!(rec.completed_recommendations, vec!["EKG".to_string()]);
        assert_eq!(rec.outstanding_recommendations(), vec!["CBC"]);
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let mut rec = record();
        rec.intake.mallampati_score = Some(2);
        rec.apply_update(PatientUpdate {
            medications: Some(vec!["Warfarin".into()]),
            ..PatientUpdate::default()
        });

        assert_eq!(rec.name, "Jane Roe");
        assert_eq!(rec.intake.medical_history, vec!["Hypertension".to_string()]);
        assert_eq!(rec.intake.medications, vec!["Warfarin".to_string()]);
        assert_eq!(rec.intake.mallampati_score, Some(2));
    }

    #[test]
    fn update_can_clear_mallampati() {
        let mut rec = record();
        rec.intake.mallampati_score = Some(3);
        rec.apply_update(PatientUpdate {
            mallampati_score: Some(None),
            ..PatientUpdate::default()
        });
        assert_eq!(rec.intake.mallampati_score, None);
    }

    #[test]
    fn update_deserializes_comma_separated_lists() {
        let update: PatientUpdate =
            serde_json::from_str(r#"{"allergies": "Latex, Penicillin", "name": "J. Roe"}"#)
                .unwrap();
        assert_eq!(
            update.allergies,
            Some(vec!["Latex".to_string(), "Penicillin".to_string()])
        );
        assert_eq!(update.name.as_deref(), Some("J. Roe"));
        assert_eq!(update.medications, None);
    }

    #[test]
    fn record_serializes_flat_camel_case() {
        let rec = record();
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["name"], "Jane Roe");
        assert_eq!(json["medicalHistory"][0], "Hypertension");
        assert!(json.get("asaScore").is_some());
        assert_eq!(json["modifiedBy"], "dr.smith");

        let back: PatientRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn touch_stamps_audit_fields() {
        let mut rec = record();
        let later = Utc.with_ymd_and_hms(2026, 1, 11, 8, 0, 0).unwrap();
        rec.touch(later, "nurse.lee");
        assert_eq!(rec.last_modified, later);
        assert_eq!(rec.modified_by, "nurse.lee");
    }
}
