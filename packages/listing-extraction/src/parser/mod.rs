//! Listing parser: storefront HTML → [`ListingData`].
//!
//! The same product detail appears in different DOM layouts depending on
//! category, region and template version. Each field therefore runs an
//! ordered list of independent strategies:
//!
//! | field       | combinator                     |
//! |-------------|--------------------------------|
//! | title       | first non-empty, else sentinel |
//! | bullets     | first non-empty list           |
//! | details     | merge of all layouts           |
//! | description | first non-empty, else sentinel |
//!
//! Parsing never fails. A field whose strategies all miss degrades to its
//! sentinel or to an empty collection.

mod details;
mod strategy;

use scraper::Html;
use tracing::debug;

use crate::error::Result;
use crate::types::listing::{
    ListingData, ProductDetails, DESCRIPTION_NOT_AVAILABLE, MAX_DESCRIPTION_CHARS,
    TITLE_NOT_FOUND,
};
use details::DetailLayout;
use strategy::{first_match, Strategy};

/// Bullet text containing any of these is page chrome, not product copy.
pub const BOILERPLATE_PHRASES: &[&str] = &["See more product details"];

/// Compiled extraction strategies for every listing field.
#[derive(Debug)]
pub struct ListingParser {
    title: Vec<Strategy>,
    bullets: Vec<Strategy>,
    details: Vec<DetailLayout>,
    description: Vec<Strategy>,
}

impl ListingParser {
    /// Compile all strategies.
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: vec![
                Strategy::compile("product-title", "#productTitle")?,
                Strategy::compile("title-word-break", "#title .product-title-word-break")?,
            ],
            bullets: vec![
                Strategy::compile(
                    "spaced-list",
                    "ul.a-unordered-list.a-vertical.a-spacing-small li span.a-list-item",
                )?,
                Strategy::compile(
                    "vertical-list",
                    "ul.a-unordered-list.a-vertical li span.a-list-item",
                )?,
                Strategy::compile("feature-bullets", "#feature-bullets ul li span.a-list-item")?,
            ],
            // Merge order doubles as precedence: table > colon list > two-column.
            details: vec![
                DetailLayout::two_column()?,
                DetailLayout::colon_list()?,
                DetailLayout::table()?,
            ],
            description: vec![
                Strategy::compile("description-paragraphs", "#productDescription p")?,
                Strategy::compile("description-container", "#productDescription")?,
                Strategy::compile("small-section", ".a-section.a-spacing-small")?,
            ],
        })
    }

    /// Parse a full HTML document.
    pub fn parse(&self, html: &str) -> ListingData {
        let document = Html::parse_document(html);

        ListingData {
            title: self.title(&document),
            bullet_points: self.bullet_points(&document),
            product_details: self.product_details(&document),
            description: self.description(&document),
        }
    }

    fn title(&self, document: &Html) -> String {
        match first_match(&self.title, |s| s.joined_text(document)) {
            Some((strategy, title)) => {
                debug!(strategy, "title matched");
                title
            }
            None => TITLE_NOT_FOUND.to_string(),
        }
    }

    fn bullet_points(&self, document: &Html) -> Vec<String> {
        let hit = first_match(&self.bullets, |s| {
            let items = s.each_text(document, is_boilerplate);
            (!items.is_empty()).then_some(items)
        });

        match hit {
            Some((strategy, items)) => {
                debug!(strategy, count = items.len(), "bullet points matched");
                items
            }
            None => Vec::new(),
        }
    }

    fn product_details(&self, document: &Html) -> ProductDetails {
        let mut details = ProductDetails::new();
        for layout in &self.details {
            let written = layout.collect_into(document, &mut details);
            if written > 0 {
                debug!(layout = layout.name(), written, "product details merged");
            }
        }
        details
    }

    fn description(&self, document: &Html) -> String {
        match first_match(&self.description, |s| s.joined_text(document)) {
            Some((strategy, text)) => {
                debug!(strategy, "description matched");
                truncate_chars(&text, MAX_DESCRIPTION_CHARS)
            }
            None => DESCRIPTION_NOT_AVAILABLE.to_string(),
        }
    }
}

fn is_boilerplate(text: &str) -> bool {
    BOILERPLATE_PHRASES.iter().any(|phrase| text.contains(phrase))
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
