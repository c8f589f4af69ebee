//! # Scoring contract
//!
//! Prompt construction and verdict extraction shared by every [`crate::Scorer`]
//! backend. The model is asked for a bare JSON object but tends to wrap it in
//! prose or code fences, so only the outermost `{...}` span is parsed.

use crate::error::{AppError, Result};
use crate::models::{Verdict, WordLists};

/// Builds the moderation prompt for `text` with the current lists embedded.
pub fn build_prompt(text: &str, lists: &WordLists) -> String {
    format!(
        r#"You are a content moderation expert. Your task is to analyze the following text and determine its profanity level.
You must follow these rules strictly:
1. **Blacklist**: If a word from the text is in the following list of forbidden words, the text is automatically invalid and must be censored. Blacklist: [{blacklist}]
2. **Whitelist**: If a word from the text is on this list, it is considered acceptable and should not be flagged as profanity, even if it seems offensive. Whitelist: [{whitelist}]
3. **Contextual Analysis**: If there are no blacklisted words, use your judgment to evaluate the text's intent and context.
4. **Scoring**: Assign a profanity score from 0 to 5:
    - 0: Totally acceptable and respectful.
    - 1: Slightly inappropriate or ambiguous.
    - 2: Clearly rude but low-impact (e.g., "silly", "dumb").
    - 3: Offensive and vulgar.
    - 4: Contains strong insults or blacklisted words.
    - 5: Hate speech, direct threats, or extremely toxic content.
5. **Censoring**: Replace each letter of the words you consider profane (especially those from the blacklist) with an asterisk (*).

The text to analyze is: "{text}"

Your response MUST be only a valid JSON object with the following structure, with no additional text before or after:
{{
  "isValid": boolean,
  "profanityScore": number,
  "censoredText": "string"
}}
"#,
        blacklist = lists.blacklist.join(", "),
        whitelist = lists.whitelist.join(", "),
        text = text,
    )
}

/// Slice from the first `{` through the last `}`; the whole input if either is missing.
pub fn extract_json_span(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start <= end => &raw[start..=end],
        _ => raw,
    }
}

/// Parses a model answer into a range-checked [`Verdict`].
pub fn parse_verdict(raw: &str) -> Result<Verdict> {
    let verdict: Verdict = serde_json::from_str(extract_json_span(raw))
        .map_err(|e| AppError::RemoteScoring(format!("unparsable verdict: {e}")))?;
    verdict
        .validate()
        .map_err(|e| AppError::RemoteScoring(e.to_string()))?;
    Ok(verdict)
}
