//! Canned storefront pages and provider replies.

pub const MOUSE_ASIN: &str = "B0TESTMOUS";
pub const LAMP_ASIN: &str = "B0TESTLAMP";

/// Primary layout: spaced bullet list, detail table, description paragraphs.
pub fn mouse_page() -> String {
    mouse_page_with_brand("Acme")
}

/// The mouse page as re-scraped after the seller changed the brand.
pub fn mouse_page_with_brand(brand: &str) -> String {
    format!(
        r#"<html><body>
      <span id="productTitle">Wireless Mouse</span>
      <ul class="a-unordered-list a-vertical a-spacing-small">
        <li><span class="a-list-item">2.4 GHz wireless connection</span></li>
        <li><span class="a-list-item">Silent clicks</span></li>
      </ul>
      <table id="productDetails_detailBullets_sections1">
        <tr><th>Brand</th><td>{}</td></tr>
      </table>
      <div id="productDescription"><p>A compact wireless mouse.</p></div>
    </body></html>"#,
        brand
    )
}

pub fn lamp_page() -> String {
    r#"<html><body>
      <span id="productTitle">Desk Lamp</span>
      <div id="feature-bullets"><ul><li><span class="a-list-item">Dimmable</span></li></ul></div>
    </body></html>"#
        .to_string()
}

/// A complete provider reply wrapped in prose, the way models often answer.
pub fn rewrite_reply(title: &str) -> String {
    format!(
        r#"Here is your optimized listing:
```json
{{
  "title": "{}",
  "bulletPoints": ["One", "Two", "Three", "Four", "Five"],
  "description": "Optimized description.",
  "keywords": ["wireless mouse", "silent mouse", "acme"]
}}
```"#,
        title
    )
}

/// A reply missing `keywords`; the gateway must reject it.
pub fn partial_reply() -> String {
    r#"{"title": "Half done", "bulletPoints": [], "description": "x"}"#.to_string()
}
