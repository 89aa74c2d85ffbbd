//! HTML title extraction

use crate::output::NO_TITLE;
use scraper::{Html, Selector};

/// Extracts the text of the first `<title>` element, trimmed
///
/// Returns `None` when the document has no title or the title is blank.
///
/// # Example
///
/// ```
/// use searchmaster::fetch::extract_title;
///
/// let html = "<html><head><title> Index of /backup </title></head></html>";
/// assert_eq!(extract_title(html), Some("Index of /backup".to_string()));
/// ```
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts the page title, falling back to the "No Title" sentinel
pub fn title_or_default(html: &str) -> String {
    extract_title(html).unwrap_or_else(|| NO_TITLE.to_string())
}
