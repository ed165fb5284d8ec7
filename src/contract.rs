//! # contract: transport and progress seams for the extraction pipeline
//!
//! This module defines the two traits the pipeline is written against and the
//! typed error it surfaces:
//!
//! - [`Transport`]: one async `get`, returning the response envelope the
//!   fetch layer needs ([`ApiPage`]). The production implementation wraps a
//!   `reqwest` client; tests substitute a generated mock.
//! - [`Progress`]: presentation hooks fired at well-defined pipeline points
//!   (collection started, page fetched, run complete). Implementations must
//!   not influence control flow; the CLI prints operator feedback, the
//!   library default is silent.
//! - [`FetchError`]: the typed outcome of any failed fetch, carrying the
//!   affected slug so callers can report which collection broke. The
//!   orchestration layer decides whether to terminate; nothing here exits
//!   the process.
//!
//! ## Mocking & Testing
//! Both traits are annotated for `mockall` so consumers can generate
//! deterministic mocks for unit/integration tests (enabled under `test` or
//! the `test-export-mocks` feature).

use async_trait::async_trait;

use mockall::automock;

/// Error type for Transport implementations (simple boxed error).
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// One HTTP response as seen by the fetch layer.
#[derive(Debug, Clone)]
pub struct ApiPage {
    /// HTTP status code.
    pub status: u16,
    /// Total page count advertised by the collection, when present and
    /// numeric (`X-WP-TotalPages`).
    pub total_pages: Option<u32>,
    /// Raw `Link` header, when present.
    pub link: Option<String>,
    /// Response body.
    pub body: String,
}

/// Trait for issuing read-only collection requests.
/// Implemented by the real HTTP client and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET against an absolute URL and return the response envelope.
    async fn get(&self, url: &str) -> Result<ApiPage, TransportError>;
}

/// Presentation hooks fired at fixed points of a run.
///
/// Replaces ad-hoc "is this a terminal" branching: the pipeline reports what
/// it is doing, the implementation decides what (if anything) to show.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait Progress: Send + Sync {
    /// The taxonomies list is about to be fetched.
    fn retrieving_taxonomies(&self);
    /// Term collection is starting across the retained taxonomies.
    fn retrieving_terms(&self);
    /// A single taxonomy or post type starts fetching; `label` is its
    /// display name.
    fn collection_started(&self, label: &str);
    /// A page of a paginated collection was received.
    fn page_fetched(&self, page: u32);
    /// A string was extracted into the output.
    fn string_extracted(&self, text: &str);
    /// The post types list is about to be fetched.
    fn retrieving_post_types(&self);
    /// The run finished and the output was written.
    fn run_complete(&self);
}

/// No-op [`Progress`] for library use and tests.
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn retrieving_taxonomies(&self) {}
    fn retrieving_terms(&self) {}
    fn collection_started(&self, _label: &str) {}
    fn page_fetched(&self, _page: u32) {}
    fn string_extracted(&self, _text: &str) {}
    fn retrieving_post_types(&self) {}
    fn run_complete(&self) {}
}

/// Typed outcome of a failed collection fetch.
///
/// `context` names the affected collection ("taxonomies", "terms for
/// category", ...) so diagnostics can point at the slug that broke.
#[derive(Debug)]
pub enum FetchError {
    /// The endpoint answered with a non-success HTTP status.
    BadStatus { context: String, status: u16 },
    /// The response body did not decode to a collection of records.
    BadPayload { context: String },
    /// The request itself failed (connection, TLS, ...).
    Transport {
        context: String,
        source: TransportError,
    },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::BadStatus { context, status } => {
                write!(f, "Could not retrieve {context} (HTTP {status}).")
            }
            FetchError::BadPayload { context } => {
                write!(f, "Request for {context} returned unexpected data.")
            }
            FetchError::Transport { context, source } => {
                write!(f, "Request for {context} failed: {source}")
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}
