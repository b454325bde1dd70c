use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single questionnaire response as it arrives from a form.
///
/// Forms submit either numbers or numeric strings; unanswered questions may
/// be sent as `""` or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Empty,
}

/// Outcome of coercing an [`AnswerValue`] to an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coerced {
    /// Falsy input (`0`, `""`, `null`). Contributes nothing.
    Blank,
    Value(i64),
    /// Text with no leading integer.
    NotANumber,
}

impl AnswerValue {
    /// Integer coercion: numbers truncate toward zero, text parses a leading
    /// optionally-signed integer and ignores whatever follows it.
    pub fn coerce(&self) -> Coerced {
        match self {
            AnswerValue::Empty => Coerced::Blank,
            AnswerValue::Number(n) if !n.is_finite() => Coerced::NotANumber,
            AnswerValue::Number(n) if *n == 0.0 => Coerced::Blank,
            AnswerValue::Number(n) => Coerced::Value(n.trunc() as i64),
            AnswerValue::Text(s) => parse_leading_int(s),
        }
    }
}

fn parse_leading_int(text: &str) -> Coerced {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Coerced::Blank;
    }

    let (negative, digits) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return Coerced::NotANumber;
    }

    match digits[..end].parse::<i64>() {
        Ok(v) => Coerced::Value(if negative { -v } else { v }),
        Err(_) => Coerced::NotANumber,
    }
}

impl From<i64> for AnswerValue {
    fn from(v: i64) -> Self {
        AnswerValue::Number(v as f64)
    }
}

impl From<i32> for AnswerValue {
    fn from(v: i32) -> Self {
        AnswerValue::Number(f64::from(v))
    }
}

impl From<&str> for AnswerValue {
    fn from(v: &str) -> Self {
        AnswerValue::Text(v.to_string())
    }
}

/// Question id → response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct AnswerSet(BTreeMap<String, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_id: impl Into<String>, value: impl Into<AnswerValue>) {
        self.0.insert(question_id.into(), value.into());
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.0.get(question_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
