use crate::error::RiskError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form doubles as the serde representation.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = RiskError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(RiskError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(
    /// Overall perioperative risk. Declaration order gives `Low < Moderate < High`.
    RiskCategory {
        Low => "Low",
        Moderate => "Moderate",
        High => "High",
    }
);

str_enum!(
    /// How keywords are matched against free text.
    MatchMode {
        Substring => "substring",
        WordBoundary => "word_boundary",
    }
);

impl Default for MatchMode {
    fn default() -> Self {
        Self::Substring
    }
}

str_enum!(
    /// STOP-Bang items the patient model can express. Neck circumference and
    /// sex are not captured, so the score tops out at 6 instead of 8.
    StopBangItem {
        Snoring => "snoring",
        Tiredness => "tiredness",
        ObservedApnea => "observed_apnea",
        Pressure => "pressure",
        Bmi => "bmi",
        Age => "age",
    }
);

str_enum!(
    /// RCRI criteria the patient model can express. Serum creatinine is not
    /// captured, so the score tops out at 4.
    RcriItem {
        IschemicHeartDisease => "ischemic_heart_disease",
        HeartFailure => "heart_failure",
        CerebrovascularDisease => "cerebrovascular_disease",
        Insulin => "insulin",
    }
);
