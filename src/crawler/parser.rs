//! Index page parser
//!
//! Detail links are found by textual pattern search over the raw markup, not
//! by building a DOM. The pattern tolerates broken markup but depends on
//! attribute order: the `href` must come before `class="name"` on the same
//! line, otherwise the entry is not seen.

use crate::url::resolve_address;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Title link of a listing entry; `.` does not cross line breaks
static TITLE_LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<a.*?href="(.*?)".*?class="name">"#).expect("valid title link pattern"));

/// Lazy sequence of detail addresses found on an index page
///
/// Scans the document only as far as needed for the next link. Cloning the
/// iterator, or calling [`parse_index`] again on the same text, restarts the
/// sequence from the same point.
#[derive(Debug, Clone)]
pub struct IndexLinks<'a> {
    document: &'a str,
    position: usize,
    base: Url,
}

impl Iterator for IndexLinks<'_> {
    type Item = Url;

    fn next(&mut self) -> Option<Url> {
        loop {
            if self.position > self.document.len() {
                return None;
            }

            let captures = TITLE_LINK_REGEX.captures_at(self.document, self.position)?;
            // the pattern never matches empty text, so this always advances
            self.position = captures.get(0).map_or(self.document.len() + 1, |m| m.end());

            let Some(href) = captures.get(1) else {
                continue;
            };

            match resolve_address(&self.base, href.as_str()) {
                Some(url) => {
                    tracing::info!("detail url {}", url);
                    return Some(url);
                }
                None => {
                    tracing::warn!("Skipping unresolvable detail link '{}'", href.as_str());
                }
            }
        }
    }
}

/// Parses an index document into the detail addresses it links to
///
/// An absent document, or one without title links, gives an empty sequence.
///
/// # Example
///
/// ```
/// use ssr_scraper::crawler::parse_index;
/// use url::Url;
///
/// let base = Url::parse("https://ssr1.scrape.center").unwrap();
/// let html = r#"<a href="/detail/1" class="name"><h2>X</h2></a>"#;
/// let links: Vec<Url> = parse_index(Some(html), &base).collect();
/// assert_eq!(links[0].as_str(), "https://ssr1.scrape.center/detail/1");
/// ```
pub fn parse_index<'a>(document: Option<&'a str>, base: &Url) -> IndexLinks<'a> {
    let document = document.unwrap_or("");
    IndexLinks {
        document,
        position: 0,
        base: base.clone(),
    }
}
