//! Product Listing Extraction Library
//!
//! Turns a storefront product identifier into structured listing content and
//! rewrites that content through a text-generation provider.
//!
//! # Design Philosophy
//!
//! - Extraction degrades, it never fails: a field whose selectors all miss
//!   becomes a sentinel or an empty collection
//! - Only the page fetch is fatal on the extraction path
//! - The rewrite gateway accepts complete payloads only; the caller owns the
//!   fallback policy
//!
//! # Usage
//!
//! ```rust,ignore
//! use listing_extraction::{Asin, HttpPageSource, ListingExtractor, RewriteGateway};
//! use listing_extraction::ai::GeminiAI;
//!
//! let extractor = ListingExtractor::new(Arc::new(HttpPageSource::new()?))?;
//! let gateway = RewriteGateway::new(Arc::new(GeminiAI::from_env()?));
//!
//! let listing = extractor.extract(&Asin::parse("B08N5WRWNW")?).await?;
//! let optimized = gateway.rewrite(&listing).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Seams for page retrieval and text generation
//! - [`types`] - Listing records and the ASIN identifier
//! - [`parser`] - Fallback-strategy HTML parser
//! - [`sources`] - Page source implementations (HTTP, mock)
//! - [`rewrite`] - Prompt construction and response validation
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod extractor;
pub mod parser;
pub mod rewrite;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "gemini")]
pub mod ai;

// Re-export core types at crate root
pub use error::{AsinError, ExtractionError, FetchError, RewriteError};
pub use extractor::ListingExtractor;
pub use parser::{ListingParser, BOILERPLATE_PHRASES};
pub use rewrite::{
    build_rewrite_prompt, find_json_block, parse_rewrite_response, RewriteGateway,
    BULLET_COUNT, TITLE_MAX_CHARS,
};
pub use sources::{HttpPageSource, MockPageSource, DEFAULT_STOREFRONT, FETCH_TIMEOUT};
pub use testing::MockAI;
pub use traits::{ai::AI, page_source::PageSource};
pub use types::listing::{
    Asin, ListingData, ProductDetails, RewrittenListing, DESCRIPTION_NOT_AVAILABLE,
    MAX_DESCRIPTION_CHARS, TITLE_NOT_FOUND,
};
