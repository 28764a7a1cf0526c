//! Detail page field extraction
//!
//! Each field has its own pattern applied to the raw markup. Rules are
//! independent: one failing to match leaves that field absent and has no
//! effect on the others. Like the index parser these patterns are sensitive
//! to attribute order and element layout of the source pages.

use crate::record::ItemRecord;
use once_cell::sync::Lazy;
use regex::Regex;

/// Marker that follows the release date on detail pages
pub const RELEASE_MARKER: &str = "上映";

static COVER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<img.*?src="(.*?)".*?class="cover""#).expect("valid cover pattern"));

static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<h2.*?>(.*?)</h2>").expect("valid name pattern"));

static CATEGORY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<button.*?category.*?<span>(.*?)</span>.*?</button>")
        .expect("valid category pattern")
});

static PUBLISHED_AT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(\d{{4}}-\d{{2}}-\d{{2}})\s?{}", RELEASE_MARKER))
        .expect("valid release date pattern")
});

static DRAMA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)drama.*?<p.*?>(.*?)</p>").expect("valid drama pattern"));

static SCORE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<p.*?score.*?>(.*?)</p>").expect("valid score pattern"));

/// Extracts an item record from a detail document
///
/// Total over its input: an absent document yields a record with every
/// field absent. Captures are trimmed; nothing else is validated, so a
/// release date like `2024-13-45` is kept as-is.
///
/// # Example
///
/// ```
/// use ssr_scraper::crawler::parse_detail;
///
/// let record = parse_detail(Some("<h2 class=\"m-b-sm\">Psycho</h2>"));
/// assert_eq!(record.name.as_deref(), Some("Psycho"));
/// assert!(record.score.is_none());
/// ```
pub fn parse_detail(document: Option<&str>) -> ItemRecord {
    let Some(html) = document else {
        return ItemRecord::default();
    };

    ItemRecord {
        cover: first_capture(&COVER_REGEX, html),
        name: first_capture(&NAME_REGEX, html),
        categories: all_captures(&CATEGORY_REGEX, html),
        published_at: first_capture(&PUBLISHED_AT_REGEX, html),
        drama: first_capture(&DRAMA_REGEX, html),
        score: first_capture(&SCORE_REGEX, html),
    }
}

/// Trimmed first capture group of the first match
fn first_capture(regex: &Regex, html: &str) -> Option<String> {
    regex
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Trimmed first capture group of every match, in document order
fn all_captures(regex: &Regex, html: &str) -> Vec<String> {
    regex
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}
