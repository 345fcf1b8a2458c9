/// Application-level constants
pub const APP_NAME: &str = "Periop";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming an optional keyword override file (JSON).
pub const KEYWORDS_ENV: &str = "PERIOP_KEYWORDS";

/// Mallampati class at or above which an airway alert is raised.
pub const MALLAMPATI_ALERT_THRESHOLD: u8 = 3;

/// Age (exclusive) above which the STOP-Bang age item and the EKG age rule apply.
pub const AGE_RISK_THRESHOLD: u32 = 50;

/// STOP-Bang score at or above which OSA is presumed.
pub const STOP_BANG_OSA_THRESHOLD: u8 = 3;

// Risk categorizer cut-offs.
pub const HIGH_ASA: u8 = 4;
pub const HIGH_STOP_BANG: u8 = 5;
pub const HIGH_RCRI: u8 = 3;
pub const HIGH_METS_BELOW: u8 = 2;
pub const MODERATE_ASA: u8 = 3;
pub const MODERATE_STOP_BANG: u8 = 3;
pub const MODERATE_RCRI: u8 = 1;
pub const MODERATE_METS_BELOW: u8 = 4;

/// Default `tracing` filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "periop=debug"
    } else {
        "periop=info"
    }
}

/// Path of the keyword override file, if one is configured.
pub fn keywords_path() -> Option<std::path::PathBuf> {
    std::env::var_os(KEYWORDS_ENV)
        .filter(|v| !v.is_empty())
        .map(std::path::PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_periop() {
        assert_eq!(APP_NAME, "Periop");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn log_filter_targets_crate() {
        assert!(default_log_filter().starts_with("periop="));
    }

    #[test]
    fn high_thresholds_sit_above_moderate() {
        assert!(HIGH_ASA > MODERATE_ASA);
        assert!(HIGH_STOP_BANG > MODERATE_STOP_BANG);
        assert!(HIGH_RCRI > MODERATE_RCRI);
        assert!(HIGH_METS_BELOW < MODERATE_METS_BELOW);
    }
}
