//! Perioperative risk scoring.
//!
//! Data flow is one-directional:
//! patient → {age, clinical text} → ASA / STOP-Bang / RCRI / METs
//! → alerts & recommended tests → risk category.
//!
//! Everything here is a pure function of `(patient, now)`.

pub mod age;
pub mod alerts;
pub mod calculators;
pub mod category;
pub mod engine;
pub mod keywords;
pub mod matcher;
pub mod types;

pub use engine::{evaluate, evaluate_batch, evaluate_optional, explain, DefaultRiskEngine};
pub use keywords::{EngineConfig, KeywordSets};
pub use matcher::{has_any, TextMatcher};
pub use types::{RiskAssessment, RiskEvaluator, ScoreBreakdown, Scores};
