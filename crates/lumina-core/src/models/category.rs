use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// One of the five life domains scored by the questionnaire.
///
/// Variants are declared in canonical order. `Ord` follows that order, so
/// every `BTreeMap<Category, _>` iterates the same way [`Category::ALL`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Category {
    Energetico,
    Emocional,
    Mental,
    Fisico,
    Espiritual,
}

impl Category {
    /// Canonical iteration order for scoring, comparison and display.
    pub const ALL: [Category; 5] = [
        Category::Energetico,
        Category::Emocional,
        Category::Mental,
        Category::Fisico,
        Category::Espiritual,
    ];

    /// Storage key, also the question id prefix (`energetico_1`).
    pub fn key(self) -> &'static str {
        match self {
            Category::Energetico => "energetico",
            Category::Emocional => "emocional",
            Category::Mental => "mental",
            Category::Fisico => "fisico",
            Category::Espiritual => "espiritual",
        }
    }

    /// Display label used on charts and reports.
    pub fn label(self) -> &'static str {
        match self {
            Category::Energetico => "Energético",
            Category::Emocional => "Emocional",
            Category::Mental => "Mental",
            Category::Fisico => "Físico",
            Category::Espiritual => "Espiritual",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }

    /// The category named by a question id's prefix, if any.
    pub fn from_question_id(question_id: &str) -> Option<Category> {
        let (prefix, _) = question_id.split_once('_')?;
        Category::from_key(prefix)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_key(s).ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Normalized percentage per category.
///
/// Scores produced by the scorer always hold all five categories. Records
/// read back from storage may carry a partial or empty map, which is why
/// lookups return `Option` rather than defaulting to zero.
///
/// Deserialization is lenient: unknown category keys and non-numeric values
/// are dropped, and fractional values are rounded half-up and clamped to
/// `0..=100`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct CategoryScores(BTreeMap<Category, u8>);

impl CategoryScores {
    /// Build a complete score set from values given in canonical order.
    pub fn from_canonical(values: [u8; 5]) -> Self {
        Self(Category::ALL.into_iter().zip(values).collect())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<u8> {
        self.0.get(&category).copied()
    }

    pub fn insert(&mut self, category: Category, value: u8) {
        self.0.insert(category, value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when every canonical category has a value.
    pub fn is_complete(&self) -> bool {
        Category::ALL.iter().all(|c| self.0.contains_key(c))
    }

    /// Recorded entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u8)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }

    /// True when every recorded value is zero (or nothing is recorded).
    pub fn all_zero(&self) -> bool {
        self.0.values().all(|v| *v == 0)
    }

    /// Mean of the recorded percentages, rounded half-up.
    ///
    /// Operates on the already-rounded per-category values.
    pub fn average(&self) -> Option<u8> {
        if self.0.is_empty() {
            return None;
        }
        let sum: u32 = self.0.values().map(|v| u32::from(*v)).sum();
        let n = self.0.len() as u32;
        Some(((sum * 2 + n) / (2 * n)) as u8)
    }

    /// Reject empty, incomplete or out-of-range score sets.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.0.is_empty() {
            return Err(CoreError::EmptyCategories);
        }
        if let Some(missing) = Category::ALL.into_iter().find(|c| !self.0.contains_key(c)) {
            return Err(CoreError::MissingCategory(missing));
        }
        if let Some((category, value)) = self.iter().find(|(_, v)| *v > 100) {
            return Err(CoreError::ScoreOutOfRange { category, value });
        }
        Ok(())
    }
}

impl FromIterator<(Category, u8)> for CategoryScores {
    fn from_iter<I: IntoIterator<Item = (Category, u8)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for CategoryScores {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StoredValue {
            Number(f64),
            Other(serde::de::IgnoredAny),
        }

        let raw = BTreeMap::<String, StoredValue>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| {
                let category = Category::from_key(&key)?;
                match value {
                    StoredValue::Number(n) if n.is_finite() => {
                        Some((category, (n + 0.5).floor().clamp(0.0, 100.0) as u8))
                    }
                    _ => None,
                }
            })
            .collect())
    }
}
