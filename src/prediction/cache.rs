//! Read-only category → text cache

use super::CategoryKey;
use crate::store::KeyValueStore;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Store key holding the serialized prediction blob
pub const PREDICTION_KEY: &str = "prediction";

/// Text returned for a category with no cached prediction
pub const FALLBACK_TEXT: &str = "The cosmos remains silent for now.";

/// Reasons a prediction blob is rejected
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Prediction blob is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Prediction blob is not a JSON object")]
    NotAnObject,
    #[error("Prediction for '{0}' is not a string")]
    NonStringValue(String),
}

/// Validated, possibly partial mapping of category to prediction text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionMap {
    entries: BTreeMap<CategoryKey, String>,
}

impl PredictionMap {
    /// Parse and validate a persisted blob.
    ///
    /// The blob must be a JSON object whose values are all strings.
    /// Keys outside the category set and blank texts are dropped.
    pub fn parse(blob: &str) -> Result<Self, PredictionError> {
        let Value::Object(object) = serde_json::from_str::<Value>(blob)? else {
            return Err(PredictionError::NotAnObject);
        };

        let mut entries = BTreeMap::new();
        for (key, value) in object {
            let Value::String(text) = value else {
                return Err(PredictionError::NonStringValue(key));
            };
            match CategoryKey::from_key(&key) {
                Some(_) if text.trim().is_empty() => {
                    tracing::debug!(key = %key, "Ignoring blank prediction");
                }
                Some(category) => {
                    entries.insert(category, text);
                }
                None => tracing::debug!(key = %key, "Ignoring unknown prediction category"),
            }
        }
        Ok(Self { entries })
    }

    /// Serialize back to the persisted blob format
    pub fn to_blob(&self) -> String {
        let object: serde_json::Map<String, Value> = self
            .entries
            .iter()
            .map(|(key, text)| (key.as_str().to_string(), Value::String(text.clone())))
            .collect();
        Value::Object(object).to_string()
    }

    pub fn get(&self, category: CategoryKey) -> Option<&str> {
        self.entries.get(&category).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(CategoryKey, String)> for PredictionMap {
    fn from_iter<I: IntoIterator<Item = (CategoryKey, String)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .filter(|(_, text)| !text.trim().is_empty())
                .collect(),
        }
    }
}

/// Category predictions loaded once per view.
///
/// Loading never fails: an absent, unreadable or malformed blob yields an
/// empty cache, and every lookup then returns [`FALLBACK_TEXT`].
#[derive(Debug, Clone, Default)]
pub struct ContentCache {
    predictions: PredictionMap,
}

impl ContentCache {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let predictions = match store.get(PREDICTION_KEY) {
            Ok(Some(blob)) => PredictionMap::parse(&blob).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding unreadable prediction cache");
                PredictionMap::default()
            }),
            Ok(None) => {
                tracing::debug!("No prediction cache stored");
                PredictionMap::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prediction cache unavailable");
                PredictionMap::default()
            }
        };

        tracing::info!(categories = predictions.len(), "Prediction cache loaded");
        Self { predictions }
    }

    #[cfg(test)]
    pub fn from_map(predictions: PredictionMap) -> Self {
        Self { predictions }
    }

    /// Cached text for `category`, or the fixed fallback
    pub fn get(&self, category: CategoryKey) -> &str {
        self.predictions.get(category).unwrap_or(FALLBACK_TEXT)
    }

    pub fn contains(&self, category: CategoryKey) -> bool {
        self.predictions.get(category).is_some()
    }
}
