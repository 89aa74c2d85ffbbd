//! Query construction
//!
//! Combines a dork template with the user's search term. The resulting string
//! is opaque search syntax: nothing is escaped or validated here.

/// Dork templates used when no configuration overrides them
pub const DEFAULT_DORKS: [&str; 5] = [
    r#"intitle:"index of" "parent directory""#,
    r#"filetype:sql "password""#,
    r#"inurl:admin "login""#,
    r#"intitle:"login" "username""#,
    "inurl:php?id=",
];

/// Builds the query sent to the search provider
///
/// Without a template (normal scan) the term is returned unchanged,
/// otherwise the template and term are joined by a single space.
///
/// # Example
///
/// ```
/// use searchmaster::query::build_query;
///
/// assert_eq!(build_query(None, "acme"), "acme");
/// assert_eq!(build_query(Some("inurl:admin"), "acme"), "inurl:admin acme");
/// ```
pub fn build_query(template: Option<&str>, term: &str) -> String {
    match template {
        Some(template) => format!("{} {}", template, term),
        None => term.to_string(),
    }
}
