use serde::Deserialize;

/// Listing site scraped when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://ssr1.scrape.center";

/// Number of index pages scraped when none is configured
pub const DEFAULT_TOTAL_PAGES: u32 = 3;

/// Directory records are written to when none is configured
pub const DEFAULT_RESULTS_DIR: &str = "./results";

/// Main configuration structure for the scraper
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Scraping behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Base address every index page and relative link is resolved against
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Index pages `1..=total_pages` are scraped
    #[serde(rename = "total-pages", default = "default_total_pages")]
    pub total_pages: u32,

    /// Worker pool size (host parallelism when unset)
    #[serde(default)]
    pub workers: Option<usize>,

    /// Keep going after an item fails to persist instead of aborting its page
    #[serde(rename = "isolate-item-failures", default)]
    pub isolate_item_failures: bool,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives one JSON file per item
    #[serde(rename = "results-dir", default = "default_results_dir")]
    pub results_dir: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            total_pages: default_total_pages(),
            workers: None,
            isolate_item_failures: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
        }
    }
}

impl ScraperConfig {
    /// Worker count actually used by the scheduler
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_total_pages() -> u32 {
    DEFAULT_TOTAL_PAGES
}

fn default_results_dir() -> String {
    DEFAULT_RESULTS_DIR.to_string()
}
