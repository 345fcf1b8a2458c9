use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced around the engine: configuration loading, engine
/// construction and the in-memory patient registry. Scoring itself never fails.
#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Reference data load failed ({0}): {1}")]
    ReferenceDataLoad(String, String),

    #[error("Reference data parse failed ({0}): {1}")]
    ReferenceDataParse(String, String),

    #[error("Keyword list {0} does not compile: {1}")]
    KeywordPattern(String, String),

    #[error("Invalid {field} value: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Patient not found: {0}")]
    PatientNotFound(Uuid),

    #[error("Internal lock failed")]
    LockFailed,
}
