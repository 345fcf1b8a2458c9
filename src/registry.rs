use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::RiskError;
use crate::models::{Patient, PatientRecord, PatientUpdate};
use crate::scoring::{DefaultRiskEngine, RiskEvaluator};

/// In-memory patient store that re-scores on every write.
///
/// Each create and update runs the engine over the whole record, never
/// incrementally. The write lock is held across merge + evaluate so two
/// concurrent updates to one patient can't interleave.
pub struct PatientRegistry<E: RiskEvaluator = DefaultRiskEngine> {
    engine: E,
    records: RwLock<Vec<PatientRecord>>,
}

impl Default for PatientRegistry<DefaultRiskEngine> {
    fn default() -> Self {
        Self::new(DefaultRiskEngine::default())
    }
}

impl<E: RiskEvaluator> PatientRegistry<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Add a patient, score it, and stamp the audit fields.
    pub fn create(
        &self,
        name: &str,
        intake: Patient,
        now: DateTime<Utc>,
        modified_by: &str,
    ) -> Result<PatientRecord, RiskError> {
        let mut record = PatientRecord::new(name, intake, now, modified_by);
        record.apply_assessment(self.engine.evaluate(&record.intake, now));

        let mut records = self.records.write().map_err(|_| RiskError::LockFailed)?;
        records.push(record.clone());

        tracing::info!(
            patient_id = %record.id,
            category = record.assessment.risk_category.map(|c| c.as_str()),
            high_risk = record.assessment.is_high_risk(),
            "Patient created"
        );
        Ok(record)
    }

    /// Merge a field-level update and re-score the full record.
    /// `completed_recommendations` survives unless the update replaces it.
    pub fn update(
        &self,
        id: &Uuid,
        update: PatientUpdate,
        now: DateTime<Utc>,
        modified_by: &str,
    ) -> Result<PatientRecord, RiskError> {
        let mut records = self.records.write().map_err(|_| RiskError::LockFailed)?;
        let record = records
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or(RiskError::PatientNotFound(*id))?;

        record.apply_update(update);
        record.touch(now, modified_by);
        record.apply_assessment(self.engine.evaluate(&record.intake, now));

        tracing::info!(
            patient_id = %record.id,
            category = record.assessment.risk_category.map(|c| c.as_str()),
            high_risk = record.assessment.is_high_risk(),
            "Patient updated"
        );
        Ok(record.clone())
    }

    pub fn get(&self, id: &Uuid) -> Result<PatientRecord, RiskError> {
        let records = self.records.read().map_err(|_| RiskError::LockFailed)?;
        records
            .iter()
            .find(|r| r.id == *id)
            .cloned()
            .ok_or(RiskError::PatientNotFound(*id))
    }

    /// All records in insertion order.
    pub fn list(&self) -> Result<Vec<PatientRecord>, RiskError> {
        let records = self.records.read().map_err(|_| RiskError::LockFailed)?;
        Ok(records.clone())
    }

    pub fn delete(&self, id: &Uuid) -> Result<(), RiskError> {
        let mut records = self.records.write().map_err(|_| RiskError::LockFailed)?;
        let before = records.len();
        records.retain(|r| r.id != *id);
        if records.len() == before {
            return Err(RiskError::PatientNotFound(*id));
        }

        tracing::info!(patient_id = %id, "Patient deleted");
        Ok(())
    }

    /// Re-score every stored record against `now`, e.g. after a keyword
    /// change or when patients may have crossed an age threshold.
    /// Audit fields are left alone: no user edited the records.
    pub fn rescore_all(&self, now: DateTime<Utc>) -> Result<usize, RiskError> {
        let mut records = self.records.write().map_err(|_| RiskError::LockFailed)?;
        let intakes: Vec<Patient> = records.iter().map(|r| r.intake.clone()).collect();
        let assessments = self.engine.evaluate_batch(&intakes, now);

        let mut changed = 0;
        for (record, assessment) in records.iter_mut().zip(assessments) {
            if record.assessment != assessment {
                record.apply_assessment(assessment);
                changed += 1;
            }
        }

        tracing::info!(total = records.len(), changed, "Rescored all patients");
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::TimeZone;

    use super::*;
    use crate::models::enums::RiskCategory;
    use crate::scoring::{RiskAssessment, ScoreBreakdown};

    fn t(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, day, 10, 0, 0).unwrap()
    }

    fn new_registry() -> PatientRegistry {
        PatientRegistry::default()
    }

    #[test]
    fn create_scores_and_stamps() {
        let registry = new_registry();
        let rec = registry
            .create(
                "John Doe",
                Patient::default().with_history(["CHF"]),
                t(1),
                "dr.a",
            )
            .unwrap();

        assert_eq!(rec.assessment.asa_score, Some(4));
        assert_eq!(rec.assessment.risk_category, Some(RiskCategory::High));
        assert!(rec.completed_recommendations.is_empty());
        assert_eq!(rec.modified_by, "dr.a");
        assert_eq!(rec.last_modified, t(1));
        assert_eq!(registry.get(&rec.id).unwrap(), rec);
    }

    #[test]
    fn update_rescores_and_preserves_checklist() {
        let registry = new_registry();
        let rec = registry
            .create("John Doe", Patient::default().with_history(["Asthma"]), t(1), "dr.a")
            .unwrap();
        assert_eq!(rec.assessment.pre_op_recommendations, vec!["EKG"]);

        registry
            .update(
                &rec.id,
                PatientUpdate {
                    completed_recommendations: Some(vec!["EKG".into()]),
                    ..PatientUpdate::default()
                },
                t(2),
                "dr.a",
            )
            .unwrap();

        let updated = registry
            .update(
                &rec.id,
                PatientUpdate {
                    medications: Some(vec!["Warfarin".into()]),
                    ..PatientUpdate::default()
                },
                t(3),
                "nurse.b",
            )
            .unwrap();

        assert_eq!(updated.completed_recommendations, vec!["EKG".to_string()]);
        assert_eq!(
            updated.assessment.critical_alerts,
            vec!["Active anticoagulants".to_string()]
        );
        assert_eq!(updated.outstanding_recommendations(), vec!["INR/PTT check"]);
        assert_eq!(updated.modified_by, "nurse.b");
        assert_eq!(updated.last_modified, t(3));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let registry = new_registry();
        let id = Uuid::new_v4();
        assert!(matches!(registry.get(&id), Err(RiskError::PatientNotFound(_))));
        assert!(matches!(registry.delete(&id), Err(RiskError::PatientNotFound(_))));
        assert!(matches!(
            registry.update(&id, PatientUpdate::default(), t(1), "x"),
            Err(RiskError::PatientNotFound(_))
        ));
    }

    #[test]
    fn delete_removes_record() {
        let registry = new_registry();
        let a = registry.create("A", Patient::default(), t(1), "x").unwrap();
        let b = registry.create("B", Patient::default(), t(1), "x").unwrap();
        registry.delete(&a.id).unwrap();

        let remaining = registry.list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
    }

    #[test]
    fn rescore_picks_up_birthday() {
        let registry = new_registry();
        let intake = Patient::default()
            .with_date_of_birth("1975-04-02")
            .with_history(["Hypertension"]);
        let rec = registry.create("C", intake, t(1), "x").unwrap();
        // Age 50 on April 1st: only the hypertension item counts.
        assert_eq!(rec.assessment.stop_bang_score, Some(1));

        assert_eq!(registry.rescore_all(t(2)).unwrap(), 1);
        let after = registry.get(&rec.id).unwrap();
        assert_eq!(after.assessment.stop_bang_score, Some(2));
        assert_eq!(after.last_modified, t(1));
    }

    /// Counts calls to verify the registry re-invokes the engine on every write.
    struct CountingEngine {
        calls: AtomicUsize,
    }

    impl RiskEvaluator for CountingEngine {
        fn evaluate(&self, _patient: &Patient, _now: DateTime<Utc>) -> RiskAssessment {
            self.calls.fetch_add(1, Ordering::SeqCst);
            RiskAssessment::unknown()
        }

        fn explain(&self, _patient: &Patient, _now: DateTime<Utc>) -> ScoreBreakdown {
            ScoreBreakdown {
                age: None,
                asa_score: 1,
                stop_bang_items: vec![],
                rcri_items: vec![],
                mets_score: 4,
            }
        }
    }

    #[test]
    fn every_write_re_evaluates() {
        let registry = PatientRegistry::new(CountingEngine {
            calls: AtomicUsize::new(0),
        });
        let rec = registry.create("D", Patient::default(), t(1), "x").unwrap();
        registry
            .update(&rec.id, PatientUpdate::default(), t(2), "x")
            .unwrap();
        registry
            .update(
                &rec.id,
                PatientUpdate {
                    clinician_notes: Some("ok".into()),
                    ..PatientUpdate::default()
                },
                t(3),
                "x",
            )
            .unwrap();

        assert_eq!(registry.engine().calls.load(Ordering::SeqCst), 3);
    }
}
