//! Product-detail layouts.
//!
//! Unlike the other fields, details are accumulated from every layout
//! present on the page. Layouts are applied in a fixed order and later ones
//! overwrite earlier ones on key collision.

use scraper::{Html, Selector};

use super::strategy::{compile_selector, element_text, scoped_text};
use crate::error::Result;
use crate::types::listing::ProductDetails;

/// One of the page layouts carrying attribute-name/value pairs.
#[derive(Debug)]
pub(crate) enum DetailLayout {
    /// Rows with a left label column and a right value column.
    TwoColumn {
        row: Selector,
        label: Selector,
        value: Selector,
    },
    /// List items of the form `Label : Value`.
    ColonList { item: Selector },
    /// Table rows with a `th` label and a `td` value.
    Table {
        row: Selector,
        label: Selector,
        value: Selector,
    },
}

impl DetailLayout {
    pub fn two_column() -> Result<Self> {
        Ok(Self::TwoColumn {
            row: compile_selector(".product-facts-detail")?,
            label: compile_selector(".a-col-left .a-color-base")?,
            value: compile_selector(".a-col-right .a-color-base")?,
        })
    }

    pub fn colon_list() -> Result<Self> {
        Ok(Self::ColonList {
            item: compile_selector("#detailBullets_feature_div ul li")?,
        })
    }

    pub fn table() -> Result<Self> {
        Ok(Self::Table {
            row: compile_selector("#productDetails_detailBullets_sections1 tr")?,
            label: compile_selector("th")?,
            value: compile_selector("td")?,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TwoColumn { .. } => "two-column",
            Self::ColonList { .. } => "colon-list",
            Self::Table { .. } => "table",
        }
    }

    /// Insert every pair this layout finds into `details`. Returns the
    /// number of pairs written.
    pub fn collect_into(&self, document: &Html, details: &mut ProductDetails) -> usize {
        let mut written = 0;
        match self {
            Self::TwoColumn { row, label, value } | Self::Table { row, label, value } => {
                for el in document.select(row) {
                    let key = clean(&scoped_text(&el, label));
                    let val = clean(&scoped_text(&el, value));
                    if !key.is_empty() && !val.is_empty() {
                        details.insert(key, val);
                        written += 1;
                    }
                }
            }
            Self::ColonList { item } => {
                for el in document.select(item) {
                    if let Some((key, val)) = split_label_value(&element_text(&el)) {
                        details.insert(key, val);
                        written += 1;
                    }
                }
            }
        }
        written
    }
}

/// Split `Label : Value` on the first colon only.
///
/// The label has whitespace runs collapsed; empty halves are rejected.
pub(crate) fn split_label_value(text: &str) -> Option<(String, String)> {
    let (raw_key, raw_value) = text.split_once(':')?;
    let key = collapse_whitespace(&clean(raw_key));
    let value = clean(raw_value);
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Strip bidi marks the storefront sprinkles around labels, then trim.
fn clean(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\u{200e}' | '\u{200f}'))
        .collect::<String>()
        .trim()
        .to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_first_colon_only() {
        assert_eq!(
            split_label_value("Date First Available : 12:30 PM, 1 Jan"),
            Some(("Date First Available".into(), "12:30 PM, 1 Jan".into()))
        );
    }

    #[test]
    fn test_split_collapses_label_whitespace() {
        assert_eq!(
            split_label_value("Item\n      model   number\u{200f} : \u{200e}MX-1"),
            Some(("Item model number".into(), "MX-1".into()))
        );
    }

    #[test]
    fn test_split_rejects_missing_halves() {
        assert_eq!(split_label_value("No colon here"), None);
        assert_eq!(split_label_value(" : value"), None);
        assert_eq!(split_label_value("Label :   "), None);
    }

    #[test]
    fn test_table_layout() {
        let doc = Html::parse_document(
            r#"<table id="productDetails_detailBullets_sections1">
                <tr><th> Brand </th><td> Acme </td></tr>
                <tr><th>Colour</th><td></td></tr>
            </table>"#,
        );
        let mut details = ProductDetails::new();
        let written = DetailLayout::table().unwrap().collect_into(&doc, &mut details);

        assert_eq!(written, 1);
        assert_eq!(details.get("Brand").map(String::as_str), Some("Acme"));
        assert!(!details.contains_key("Colour"));
    }

    #[test]
    fn test_two_column_layout() {
        let doc = Html::parse_document(
            r#"<div class="product-facts-detail">
                 <div class="a-col-left"><span class="a-color-base">Material</span></div>
                 <div class="a-col-right"><span class="a-color-base">Plastic</span></div>
               </div>"#,
        );
        let mut details = ProductDetails::new();
        DetailLayout::two_column().unwrap().collect_into(&doc, &mut details);
        assert_eq!(details.get("Material").map(String::as_str), Some("Plastic"));
    }
}
