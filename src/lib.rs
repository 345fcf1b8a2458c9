pub mod config;
pub mod error;
pub mod models;
pub mod registry; // in-memory collaborator: create/update re-score
pub mod scoring; // ASA, STOP-Bang, RCRI, METs, alerts, category

pub use error::RiskError;
pub use models::enums::{MatchMode, RcriItem, RiskCategory, StopBangItem};
pub use models::{Patient, PatientRecord, PatientUpdate};
pub use registry::PatientRegistry;
pub use scoring::{
    evaluate, evaluate_batch, evaluate_optional, explain, DefaultRiskEngine, EngineConfig,
    KeywordSets, RiskAssessment, RiskEvaluator, ScoreBreakdown,
};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. `RUST_LOG` wins over the default
/// filter; calling this more than once is harmless.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} v{} tracing initialized", config::APP_NAME, config::APP_VERSION);
    }
}
