//! Selector strategies and the ordered-fallback combinator.

use scraper::{ElementRef, Html, Selector};

use crate::error::{ExtractionError, Result};

/// A named CSS selector, compiled once.
#[derive(Debug)]
pub(crate) struct Strategy {
    pub name: &'static str,
    selector: Selector,
}

impl Strategy {
    pub fn compile(name: &'static str, css: &str) -> Result<Self> {
        Ok(Self {
            name,
            selector: compile_selector(css)?,
        })
    }

    /// Concatenated text of every matching node, trimmed. `None` when empty.
    pub fn joined_text(&self, document: &Html) -> Option<String> {
        let text: String = document
            .select(&self.selector)
            .flat_map(|el| el.text())
            .collect();
        non_empty(text.trim())
    }

    /// Trimmed text of each matching node in document order, skipping empty
    /// nodes and nodes `reject` refuses.
    pub fn each_text(&self, document: &Html, reject: impl Fn(&str) -> bool) -> Vec<String> {
        document
            .select(&self.selector)
            .map(|el| element_text(&el))
            .filter(|text| !text.is_empty() && !reject(text))
            .collect()
    }
}

/// Run strategies in order; the first one producing a value wins.
///
/// Strategies never see each other's output.
pub(crate) fn first_match<'a, T>(
    strategies: &'a [Strategy],
    mut run: impl FnMut(&'a Strategy) -> Option<T>,
) -> Option<(&'static str, T)> {
    strategies
        .iter()
        .find_map(|strategy| run(strategy).map(|value| (strategy.name, value)))
}

pub(crate) fn compile_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ExtractionError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Concatenated descendant text of `el`, trimmed.
pub(crate) fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Concatenated text of every descendant of `el` matching `selector`, trimmed.
pub(crate) fn scoped_text(el: &ElementRef<'_>, selector: &Selector) -> String {
    el.select(selector)
        .flat_map(|child| child.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_text_concatenates_all_matches() {
        let doc = Html::parse_document("<p class='x'> one </p><div><p class='x'>two </p></div>");
        let strategy = Strategy::compile("x", "p.x").unwrap();
        assert_eq!(strategy.joined_text(&doc).as_deref(), Some("one two"));
    }

    #[test]
    fn test_joined_text_empty_is_none() {
        let doc = Html::parse_document("<p class='x'>   </p>");
        let strategy = Strategy::compile("x", "p.x").unwrap();
        assert_eq!(strategy.joined_text(&doc), None);
    }

    #[test]
    fn test_first_match_skips_empty_strategies() {
        let doc = Html::parse_document("<h1 id='b'>Found</h1>");
        let strategies = vec![
            Strategy::compile("a", "#a").unwrap(),
            Strategy::compile("b", "#b").unwrap(),
        ];

        let hit = first_match(&strategies, |s| s.joined_text(&doc));
        assert_eq!(hit, Some(("b", "Found".to_string())));
    }

    #[test]
    fn test_invalid_selector_is_error() {
        let err = Strategy::compile("bad", "li[").unwrap_err();
        assert!(matches!(err, ExtractionError::Selector { .. }));
    }
}
