//! crates/journal_core/src/schema.rs
//!
//! Turns raw model output into a validated `EntryAnalysis`.
//!
//! This is deliberately split into two steps: extraction (peel off any
//! markdown fencing the model wrapped the payload in) and validation
//! (strict structural parse). Each step is testable on its own and they
//! are never merged.

use regex::Regex;

use crate::domain::EntryAnalysis;

/// The model output did not match the required schema.
///
/// Malformed JSON, wrong types, unknown or missing fields, and out-of-range
/// sentiment values all collapse into this one kind; callers never need to
/// distinguish the sub-causes.
#[derive(Debug, thiserror::Error)]
#[error("model output failed schema validation: {0}")]
pub struct ValidationError(String);

/// Returns the interior of a fenced ```json block if the text contains one,
/// otherwise the input unmodified.
///
/// The prompt forbids fencing, but models add it anyway often enough that
/// tolerating it here is cheaper than failing the whole analysis.
fn extract_json(text: &str) -> &str {
    let text = text.trim();
    let fence = Regex::new(r"(?s)```(?:json)?\s*(\{.*\})\s*```").unwrap();
    match fence.captures(text) {
        Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(text),
        None => text,
    }
}

/// Parses raw model output text into an `EntryAnalysis`.
///
/// The surviving text must be a JSON object with exactly the fields
/// `sentiment`, `summary`, and `topics`; extra keys are rejected to guard
/// against prompt drift. Topic count is not checked (the prompt asks for
/// 2-4 but the bound is soft).
pub fn parse_analysis(raw: &str) -> Result<EntryAnalysis, ValidationError> {
    let payload = extract_json(raw);
    serde_json::from_str(payload).map_err(|e| ValidationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sentiment;

    const VALID: &str = r#"{"sentiment":"positive","summary":"Good day. More tomorrow.","topics":["work","planning"]}"#;

    #[test]
    fn accepts_plain_json() {
        let analysis = parse_analysis(VALID).unwrap();
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert_eq!(analysis.topics, vec!["work", "planning"]);
    }

    #[test]
    fn fenced_and_unfenced_parse_identically() {
        let fenced = format!("```json\n{}\n```", VALID);
        let from_fenced = parse_analysis(&fenced).unwrap();
        let from_plain = parse_analysis(VALID).unwrap();
        assert_eq!(from_fenced.summary, from_plain.summary);
        assert_eq!(from_fenced.sentiment, from_plain.sentiment);
        assert_eq!(from_fenced.topics, from_plain.topics);
    }

    #[test]
    fn accepts_fence_without_language_tag() {
        let fenced = format!("```\n{}\n```", VALID);
        assert!(parse_analysis(&fenced).is_ok());
    }

    #[test]
    fn accepts_fence_with_surrounding_prose() {
        let wrapped = format!("Here is the analysis:\n```json\n{}\n```\nHope that helps!", VALID);
        assert!(parse_analysis(&wrapped).is_ok());
    }

    #[test]
    fn rejects_extra_field() {
        let extra = r#"{"sentiment":"neutral","summary":"Fine.","topics":["a","b"],"confidence":0.9}"#;
        assert!(parse_analysis(extra).is_err());
    }

    #[test]
    fn rejects_missing_field() {
        let missing = r#"{"sentiment":"neutral","topics":["a","b"]}"#;
        assert!(parse_analysis(missing).is_err());
    }

    #[test]
    fn rejects_unknown_sentiment() {
        let mixed = r#"{"sentiment":"mixed","summary":"Hard to say.","topics":["a","b"]}"#;
        assert!(parse_analysis(mixed).is_err());
    }

    #[test]
    fn rejects_non_string_topics() {
        let bad = r#"{"sentiment":"negative","summary":"Rough.","topics":[1,2,3]}"#;
        assert!(parse_analysis(bad).is_err());
    }

    #[test]
    fn rejects_prose_with_no_json() {
        assert!(parse_analysis("The entry sounds upbeat overall.").is_err());
    }

    #[test]
    fn topic_count_outside_two_to_four_still_accepted() {
        let five = r#"{"sentiment":"positive","summary":"Busy. Very busy.","topics":["a","b","c","d","e"]}"#;
        assert!(parse_analysis(five).is_ok());
    }
}
