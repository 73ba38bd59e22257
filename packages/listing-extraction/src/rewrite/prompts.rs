//! Rewrite prompt template.
//!
//! Output-shape limits are instructions to the provider only; the parser
//! checks nothing beyond the presence of the four fields.

use crate::types::listing::ListingData;

/// Title length the provider is asked to stay under.
pub const TITLE_MAX_CHARS: usize = 200;

/// Number of bullet points requested.
pub const BULLET_COUNT: usize = 5;

/// Render the rewrite prompt for `listing`.
pub fn build_rewrite_prompt(listing: &ListingData) -> String {
    let bullet_points = listing
        .bullet_points
        .iter()
        .enumerate()
        .map(|(i, bp)| format!("{}. {}", i + 1, bp))
        .collect::<Vec<_>>()
        .join("\n");

    // A string-keyed map always serializes.
    let product_details =
        serde_json::to_string(&listing.product_details).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"You are an expert Amazon product listing optimizer. Optimize the following product listing for better visibility, conversion, and SEO.

ORIGINAL LISTING:
Title: {title}

Bullet Points:
{bullet_points}

Description: {description}

Product Details: {product_details}

TASK:
1. Create an IMPROVED TITLE that is:
   - Keyword-rich and SEO-optimized
   - Clear and readable (max {title_max} characters)
   - Includes brand, product type, key features
   - Follows Amazon best practices

2. Rewrite BULLET POINTS (exactly {bullet_count} points) that are:
   - Clear, concise, and benefit-focused
   - Highlight key features and advantages
   - Start with a capital letter
   - Each 150-200 characters max

3. Create an ENHANCED DESCRIPTION that is:
   - Persuasive and compelling
   - Highlights unique selling points
   - 200-300 words
   - Professional and compliant with Amazon policies

4. Suggest 3-5 RELEVANT KEYWORDS for SEO optimization

IMPORTANT: Respond ONLY with valid JSON in this exact format (no markdown, no extra text):
{{
  "title": "optimized title here",
  "bulletPoints": ["point 1", "point 2", "point 3", "point 4", "point 5"],
  "description": "optimized description here",
  "keywords": ["keyword1", "keyword2", "keyword3", "keyword4", "keyword5"]
}}"#,
        title = listing.title,
        bullet_points = bullet_points,
        description = listing.description,
        product_details = product_details,
        title_max = TITLE_MAX_CHARS,
        bullet_count = BULLET_COUNT,
    )
}
