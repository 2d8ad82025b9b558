//! JSON parsing helpers for summarizer responses
//!
//! Models often wrap the JSON payload in prose or code fences, so the
//! outermost `{...}` is extracted before parsing.

use crate::error::{Error, Result};

use super::types::AiSummary;

/// Longest raw excerpt carried in an error message
const MAX_RAW_EXCERPT: usize = 200;

/// Parse a summary from a model response
pub fn parse_summary(response: &str) -> Result<AiSummary> {
    let json_str = extract_json_object(response)?;
    serde_json::from_str(json_str).map_err(|e| {
        Error::InvalidData(format!(
            "Invalid summary JSON from AI: {} | Raw: {}",
            e,
            truncate(json_str)
        ))
    })
}

/// Slice from the first `{` to the last `}`
pub fn extract_json_object(response: &str) -> Result<&str> {
    let response = response.trim();
    match (response.find('{'), response.rfind('}')) {
        (Some(s), Some(e)) if s < e => Ok(&response[s..=e]),
        _ => Err(Error::InvalidData(format!(
            "No JSON found in AI response | Raw: {}",
            truncate(response)
        ))),
    }
}

fn truncate(s: &str) -> String {
    if s.chars().count() > MAX_RAW_EXCERPT {
        let cut: String = s.chars().take(MAX_RAW_EXCERPT).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Trend;

    #[test]
    fn test_parse_plain_json() {
        let response = r#"{"summary": "Solid month.", "highlights": ["Saved 40%"], "recommendations": [], "trend": "improving"}"#;
        let summary = parse_summary(response).unwrap();
        assert_eq!(summary.summary, "Solid month.");
        assert_eq!(summary.highlights, vec!["Saved 40%"]);
        assert_eq!(summary.trend, Trend::Improving);
    }

    #[test]
    fn test_parse_json_wrapped_in_prose() {
        let response = "Sure! Here is the summary:\n```json\n{\"summary\": \"Tight month.\", \"trend\": \"concerning\"}\n```\nLet me know.";
        let summary = parse_summary(response).unwrap();
        assert_eq!(summary.trend, Trend::Concerning);
    }

    #[test]
    fn test_no_json_is_invalid_data() {
        let result = parse_summary("I cannot help with that.");
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_wrong_shape_is_invalid_data() {
        let result = parse_summary(r#"{"message": "hello"}"#);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_long_raw_is_truncated() {
        let long = "x".repeat(1_000);
        let Err(Error::InvalidData(msg)) = parse_summary(&long) else {
            panic!("expected InvalidData");
        };
        assert!(msg.len() < 300);
        assert!(msg.ends_with("..."));
    }
}
