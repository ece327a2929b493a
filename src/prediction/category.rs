//! The closed set of prediction categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prediction topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Personality,
    Health,
    Money,
    Career,
    Love,
    Miscellaneous,
}

impl CategoryKey {
    /// Every category, in display order
    pub const ALL: [CategoryKey; 6] = [
        CategoryKey::Personality,
        CategoryKey::Health,
        CategoryKey::Money,
        CategoryKey::Career,
        CategoryKey::Love,
        CategoryKey::Miscellaneous,
    ];

    /// Key used in the persisted blob
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKey::Personality => "personality",
            CategoryKey::Health => "health",
            CategoryKey::Money => "money",
            CategoryKey::Career => "career",
            CategoryKey::Love => "love",
            CategoryKey::Miscellaneous => "miscellaneous",
        }
    }

    /// Exact match against the persisted key
    pub fn from_key(key: &str) -> Option<Self> {
        CategoryKey::ALL
            .into_iter()
            .find(|category| category.as_str() == key)
    }

    pub fn title(self) -> &'static str {
        match self {
            CategoryKey::Personality => "Personality",
            CategoryKey::Health => "Health",
            CategoryKey::Money => "Money",
            CategoryKey::Career => "Career",
            CategoryKey::Love => "Love",
            CategoryKey::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for CategoryKey {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        CategoryKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
