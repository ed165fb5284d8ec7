use std::path::PathBuf;

use tracing::{debug, info};
use url::Url;

/// Production endpoint queried when no `--url` override is given.
pub const DEFAULT_ENDPOINT_BASE: &str = "https://wordpress.org/wp-json/wp/v2/";

/// Taxonomies fetched by default.
pub const DEFAULT_TAXONOMIES: &[&str] = &["post_tag", "category"];

/// Post types fetched by default.
pub const DEFAULT_POST_TYPES: &[&str] = &["post", "page"];

/// Textdomain attached to every generated `_x()` call by default.
pub const DEFAULT_TEXTDOMAIN: &str = "wporg";

/// Destination of the generated file.
pub const DEFAULT_OUTPUT_PATH: &str = "extra/translation-strings.php";

/// Records requested per page of a paginated collection.
pub const PER_PAGE: u32 = 100;

/// Immutable run configuration, fully derived from CLI input before any
/// network traffic happens.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the content API, always ending in `/`.
    pub endpoint_base: Url,
    /// Allow-list of taxonomy slugs; empty means taxonomies are skipped.
    pub taxonomies: Vec<String>,
    /// Allow-list of post type slugs; empty means post types are skipped.
    pub post_types: Vec<String>,
    /// Textdomain embedded in every generated marker.
    pub textdomain: String,
    /// Where the generated file is written.
    pub output_path: PathBuf,
}

impl Config {
    /// URL of a non-paginated collection endpoint such as `taxonomies`.
    pub fn collection_url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint_base, path)
    }

    /// URL of a paginated collection endpoint with the page size applied.
    pub fn paged_collection_url(&self, rest_base: &str) -> String {
        format!("{}{}?per_page={}", self.endpoint_base, rest_base, PER_PAGE)
    }

    pub fn trace_loaded(&self) {
        info!(
            endpoint_base = %self.endpoint_base,
            taxonomies = ?self.taxonomies,
            post_types = ?self.post_types,
            textdomain = %self.textdomain,
            output_path = %self.output_path.display(),
            "Loaded Config"
        );
        debug!(?self, "Config loaded (full debug)");
    }
}
