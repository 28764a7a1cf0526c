//! Address handling for the scraper
//!
//! Index pages live at `<base>/page/<n>`; links found on them may be relative
//! and are resolved against the same base.

use url::{ParseError, Url};

/// Parses the configured base address
pub fn parse_base(base: &str) -> Result<Url, ParseError> {
    Url::parse(base.trim())
}

/// Builds the address of index page `page`
///
/// The page path is appended to the base as text, so a base with a path
/// prefix keeps it (`https://host/app` gives `https://host/app/page/2`).
///
/// # Examples
///
/// ```
/// use ssr_scraper::url::{index_url, parse_base};
///
/// let base = parse_base("https://ssr1.scrape.center").unwrap();
/// let url = index_url(&base, 2).unwrap();
/// assert_eq!(url.as_str(), "https://ssr1.scrape.center/page/2");
/// ```
pub fn index_url(base: &Url, page: u32) -> Result<Url, ParseError> {
    let root = base.as_str().trim_end_matches('/');
    Url::parse(&format!("{}/page/{}", root, page))
}

/// Resolves an href against the base address
///
/// Absolute hrefs are returned as-is; relative ones follow RFC 3986
/// reference resolution. Returns `None` when the href cannot be resolved.
pub fn resolve_address(base: &Url, href: &str) -> Option<Url> {
    base.join(href.trim()).ok()
}
