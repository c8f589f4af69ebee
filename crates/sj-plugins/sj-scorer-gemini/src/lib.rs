//! # sj-scorer-gemini
//!
//! Google Gemini implementation of `Scorer`.
//! Sends the moderation prompt to `generateContent` and extracts the verdict
//! from the first candidate's text.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sj_core::scoring::{build_prompt, parse_verdict};
use sj_core::{AppError, Result, Scorer, Verdict, WordLists};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
    }
}

pub struct GeminiScorer {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

impl GeminiScorer {
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            api_key,
        }
    }

    /// Points the client at another host (proxy, regional endpoint, test double).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Raw text of the first candidate.
    ///
    /// The key travels in the query string, so reqwest errors are stripped
    /// of their URL before they reach any message.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.expose_secret())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::RemoteScoring(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::RemoteScoring(format!("API Error: {status}")));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| {
                AppError::RemoteScoring(format!("unreadable response: {}", e.without_url()))
            })?;

        body.into_first_text()
            .ok_or_else(|| AppError::RemoteScoring("response contained no candidate text".into()))
    }
}

#[async_trait]
impl Scorer for GeminiScorer {
    async fn score(&self, text: &str, lists: &WordLists) -> Result<Verdict> {
        let answer = self.generate(&build_prompt(text, lists)).await?;
        let verdict = parse_verdict(&answer)?;
        log::debug!(
            "{} scored text at {} (valid: {})",
            self.model,
            verdict.profanity_score,
            verdict.is_valid
        );
        Ok(verdict)
    }
}
