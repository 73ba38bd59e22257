//! Response parsing for the rewrite gateway.
//!
//! Providers wrap the JSON in prose or code fences often enough that the
//! response is scanned for the first balanced top-level `{...}` block rather
//! than parsed whole.

use serde::Deserialize;

use crate::error::{RewriteError, RewriteResult};
use crate::types::listing::RewrittenListing;

/// Raw provider payload. Every field optional so absence is reported as a
/// missing field rather than a generic decode error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RewritePayload {
    title: Option<String>,
    bullet_points: Option<Vec<String>>,
    description: Option<String>,
    keywords: Option<Vec<String>>,
}

/// Return the first balanced top-level brace block in `text`.
///
/// Braces inside JSON string literals are ignored. `None` when there is no
/// opening brace or the first block never closes.
pub fn find_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse provider text into a complete [`RewrittenListing`].
///
/// Partial payloads are failures: every field must be present and non-null,
/// and `title`/`description` must be non-empty. Bullet and keyword counts
/// are not checked.
pub fn parse_rewrite_response(text: &str) -> RewriteResult<RewrittenListing> {
    let block = find_json_block(text).ok_or(RewriteError::NoStructuredPayload)?;
    let payload: RewritePayload = serde_json::from_str(block)?;

    let title = payload
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or(RewriteError::MissingField { field: "title" })?;
    let bullet_points = payload
        .bullet_points
        .ok_or(RewriteError::MissingField { field: "bulletPoints" })?;
    let description = payload
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or(RewriteError::MissingField { field: "description" })?;
    let keywords = payload
        .keywords
        .ok_or(RewriteError::MissingField { field: "keywords" })?;

    Ok(RewrittenListing {
        title,
        bullet_points,
        description,
        keywords,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETE: &str = r#"{
        "title": "Acme Silent Wireless Mouse",
        "bulletPoints": ["A", "B", "C", "D", "E"],
        "description": "Long copy.",
        "keywords": ["mouse", "wireless", "silent"]
    }"#;

    #[test]
    fn test_block_inside_prose_and_fences() {
        let text = format!("Sure! Here you go:\n```json\n{}\n```\nHope that helps {{:}}", COMPLETE);
        let listing = parse_rewrite_response(&text).unwrap();

        assert_eq!(listing.title, "Acme Silent Wireless Mouse");
        assert_eq!(listing.bullet_points.len(), 5);
        assert_eq!(listing.keywords, vec!["mouse", "wireless", "silent"]);
    }

    #[test]
    fn test_braces_inside_strings_do_not_close_block() {
        let text = r#"{"title": "Mug } {", "bulletPoints": [], "description": "Say \"}\"", "keywords": []} trailing }"#;
        let block = find_json_block(text).unwrap();
        assert!(block.ends_with("\"keywords\": []}"));

        let listing = parse_rewrite_response(text).unwrap();
        assert_eq!(listing.title, "Mug } {");
        assert_eq!(listing.description, "Say \"}\"");
    }

    #[test]
    fn test_nested_objects_stay_in_block() {
        assert_eq!(find_json_block(r#"x {"a": {"b": 1}} y"#), Some(r#"{"a": {"b": 1}}"#));
    }

    #[test]
    fn test_no_block() {
        assert!(matches!(
            parse_rewrite_response("I cannot help with that."),
            Err(RewriteError::NoStructuredPayload)
        ));
        assert!(matches!(
            parse_rewrite_response(r#"{"title": "never closed""#),
            Err(RewriteError::NoStructuredPayload)
        ));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert!(matches!(
            parse_rewrite_response("{title: bare words}"),
            Err(RewriteError::Malformed(_))
        ));
        assert!(matches!(
            parse_rewrite_response(
                r#"{"title": "T", "bulletPoints": "not a list", "description": "D", "keywords": []}"#
            ),
            Err(RewriteError::Malformed(_))
        ));
    }

    #[test]
    fn test_each_missing_field_fails() {
        let cases = [
            (r#"{"bulletPoints": [], "description": "D", "keywords": []}"#, "title"),
            (r#"{"title": "T", "description": "D", "keywords": []}"#, "bulletPoints"),
            (r#"{"title": "T", "bulletPoints": [], "keywords": []}"#, "description"),
            (r#"{"title": "T", "bulletPoints": [], "description": "D"}"#, "keywords"),
            (r#"{"title": "", "bulletPoints": [], "description": "D", "keywords": []}"#, "title"),
            (r#"{"title": "T", "bulletPoints": [], "description": null, "keywords": []}"#, "description"),
        ];

        for (text, expected) in cases {
            match parse_rewrite_response(text) {
                Err(RewriteError::MissingField { field }) => assert_eq!(field, expected, "{}", text),
                other => panic!("expected missing {}, got {:?}", expected, other),
            }
        }
    }
}
