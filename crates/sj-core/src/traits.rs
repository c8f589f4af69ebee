//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{EvaluationRecord, Verdict, WordLists};

/// Durable snapshot of the blacklist/whitelist pair.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Returns the last saved snapshot, or two empty lists if none exists yet.
    async fn read(&self) -> Result<WordLists>;

    /// Replaces the whole snapshot. Readers observe either the old or the new pair.
    ///
    /// Input is stored as-is; normalization and dedup are the caller's job.
    async fn write(&self, lists: &WordLists) -> Result<()>;
}

/// Append-only history of evaluations.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait EvaluationLog: Send + Sync {
    /// Timestamps and appends one record after every earlier one.
    async fn append(&self, text: &str, verdict: &Verdict) -> Result<EvaluationRecord>;

    /// Every record in append order, or [`crate::EMPTY_LOG_REPORT`] if there are none.
    async fn read_all(&self) -> Result<String>;
}

/// Remote profanity judge.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(&self, text: &str, lists: &WordLists) -> Result<Verdict>;
}
