//! Listing records passed between extractor, rewrite gateway and storage.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::AsinError;

/// Sentinel title when no title strategy matched.
pub const TITLE_NOT_FOUND: &str = "Title not found";

/// Sentinel description when no description strategy matched.
pub const DESCRIPTION_NOT_AVAILABLE: &str = "Description not available";

/// Maximum description length (in characters) kept at extraction time.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Ordered attribute-name → value mapping.
pub type ProductDetails = IndexMap<String, String>;

/// Canonical catalog identifier.
///
/// Stored upper-cased so lookups are case-insensitive for callers while the
/// store compares keys exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asin(String);

impl Asin {
    /// Length of every ASIN.
    pub const LEN: usize = 10;

    /// Validate and canonicalise a raw identifier.
    pub fn parse(raw: &str) -> Result<Self, AsinError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AsinError::Missing);
        }
        if trimmed.len() != Self::LEN || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AsinError::Malformed(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Asin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Asin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Listing content as scraped from the storefront.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingData {
    /// Never empty; [`TITLE_NOT_FOUND`] when extraction found nothing.
    pub title: String,

    /// Document order.
    pub bullet_points: Vec<String>,

    /// Merged from every detail layout; later sources win on collision.
    pub product_details: ProductDetails,

    /// At most [`MAX_DESCRIPTION_CHARS`] characters.
    pub description: String,
}

impl ListingData {
    /// The fallback-to-original rewrite: fields copied verbatim, no keywords.
    pub fn as_fallback_rewrite(&self) -> RewrittenListing {
        RewrittenListing {
            title: self.title.clone(),
            bullet_points: self.bullet_points.clone(),
            description: self.description.clone(),
            keywords: Vec::new(),
        }
    }
}

/// Listing content produced by the rewrite provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewrittenListing {
    pub title: String,
    pub bullet_points: Vec<String>,
    pub description: String,
    pub keywords: Vec<String>,
}

impl RewrittenListing {
    /// Treat a previous rewrite as the baseline listing for another pass.
    pub fn into_baseline(self, product_details: ProductDetails) -> ListingData {
        ListingData {
            title: self.title,
            bullet_points: self.bullet_points,
            product_details,
            description: self.description,
        }
    }
}
