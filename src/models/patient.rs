use serde::{Deserialize, Deserializer, Serialize};

/// Patient intake fields consumed by the risk engine.
///
/// List fields default to empty and scalars to `None`, never to zero, so an
/// absent value can't be read as a negative finding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Patient {
    /// ISO 8601 date (a full timestamp is tolerated).
    pub date_of_birth: Option<String>,
    #[serde(deserialize_with = "list_field::deserialize")]
    pub medical_history: Vec<String>,
    #[serde(deserialize_with = "list_field::deserialize")]
    pub medications: Vec<String>,
    #[serde(deserialize_with = "list_field::deserialize")]
    pub allergies: Vec<String>,
    #[serde(deserialize_with = "list_field::deserialize")]
    pub surgical_history: Vec<String>,
    /// Airway classification, 1-4.
    pub mallampati_score: Option<u8>,
}

impl Patient {
    pub fn with_date_of_birth(mut self, dob: impl Into<String>) -> Self {
        self.date_of_birth = Some(dob.into());
        self
    }

    pub fn with_history<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.medical_history = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_medications<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.medications = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_allergies<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergies = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_surgical_history<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.surgical_history = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mallampati(mut self, score: u8) -> Self {
        self.mallampati_score = Some(score);
        self
    }
}

/// Free-text list fields arrive either as a JSON array or as one
/// comma-separated string ("Hypertension, Asthma"). Null means empty.
pub(crate) mod list_field {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrCsv {
        List(Vec<String>),
        Csv(String),
    }

    impl ListOrCsv {
        fn into_items(self) -> Vec<String> {
            match self {
                Self::List(items) => items,
                Self::Csv(raw) => split_csv(&raw),
            }
        }
    }

    pub fn split_csv(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<ListOrCsv> = Option::deserialize(deserializer)?;
        Ok(value.map(ListOrCsv::into_items).unwrap_or_default())
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<ListOrCsv> = Option::deserialize(deserializer)?;
        Ok(value.map(ListOrCsv::into_items))
    }
}
