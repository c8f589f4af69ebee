//! # Domain Models
//!
//! The two word lists, the verdict returned by the scorer and the record
//! persisted for every evaluation.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AppError, Result};

/// Report body returned when no evaluation has been logged yet.
pub const EMPTY_LOG_REPORT: &str = "No log entries yet.";

/// Highest profanity score the rubric allows.
pub const MAX_PROFANITY_SCORE: u8 = 5;

/// Identity of one of the two word lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListName {
    Blacklist,
    Whitelist,
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListName::Blacklist => f.write_str("blacklist"),
            ListName::Whitelist => f.write_str("whitelist"),
        }
    }
}

/// Snapshot of both lists. Always persisted and replaced as a pair.
///
/// A missing or `null` field deserializes as an empty list, so `{}` is a valid snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordLists {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub blacklist: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub whitelist: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl WordLists {
    fn list_mut(&mut self, name: ListName) -> &mut Vec<String> {
        match name {
            ListName::Blacklist => &mut self.blacklist,
            ListName::Whitelist => &mut self.whitelist,
        }
    }

    /// Normalizes `raw` and appends it unless already present.
    /// Returns `Ok(true)` when the list changed.
    pub fn add_word(&mut self, name: ListName, raw: &str) -> Result<bool> {
        let word = normalize_word(raw)
            .ok_or_else(|| AppError::ValidationError("word must not be empty".into()))?;
        let list = self.list_mut(name);
        if list.contains(&word) {
            return Ok(false);
        }
        list.push(word);
        Ok(true)
    }

    /// Removes every entry equal to `word` as given or in its normalized form.
    /// Returns whether anything was removed.
    pub fn remove_word(&mut self, name: ListName, word: &str) -> bool {
        let normalized = normalize_word(word);
        let list = self.list_mut(name);
        let before = list.len();
        list.retain(|w| w != word && Some(w) != normalized.as_ref());
        list.len() != before
    }
}

/// Trims and case-folds a word. `None` when nothing is left.
pub fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_lowercase();
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

/// Structured scoring result for one evaluated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_valid: bool,
    pub profanity_score: u8,
    pub censored_text: String,
}

impl Verdict {
    pub fn validate(&self) -> Result<()> {
        if self.profanity_score > MAX_PROFANITY_SCORE {
            return Err(AppError::ValidationError(format!(
                "profanityScore must be between 0 and {MAX_PROFANITY_SCORE}, got {}",
                self.profanity_score
            )));
        }
        Ok(())
    }
}

/// One immutable entry of the evaluation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub verdict: Verdict,
}

impl EvaluationRecord {
    pub fn new(text: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            timestamp: Utc::now(),
            text: text.into(),
            verdict,
        }
    }

    /// Renders the record as one log line, newline included.
    ///
    /// `[2024-05-01T12:00:00.000Z] | TEXT: "..." | IS_VALID: true | SCORE: 0 | CENSORED: "..."`
    ///
    /// CR and LF inside the texts are written as `\r` and `\n`.
    pub fn to_log_line(&self) -> String {
        format!(
            "[{}] | TEXT: \"{}\" | IS_VALID: {} | SCORE: {} | CENSORED: \"{}\"\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            single_line(&self.text),
            self.verdict.is_valid,
            self.verdict.profanity_score,
            single_line(&self.verdict.censored_text),
        )
    }
}

fn single_line(text: &str) -> Cow<'_, str> {
    if text.contains(['\r', '\n']) {
        Cow::Owned(text.replace('\r', "\\r").replace('\n', "\\n"))
    } else {
        Cow::Borrowed(text)
    }
}
