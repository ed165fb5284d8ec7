//! Collection fetching: API record types, the `reqwest`-backed transport,
//! `Link` header parsing and the paginated fetcher.
//!
//! All requests are read-only GETs. Any non-success status or non-collection
//! body is surfaced as a [`FetchError`] naming the collection that broke;
//! callers decide whether the run dies.

use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::contract::{ApiPage, FetchError, Progress, Transport, TransportError};

/// Response header carrying the total page count of a paginated collection.
const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

/// A taxonomy as served by the `taxonomies` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Taxonomy {
    pub slug: String,
    pub name: String,
    pub rest_base: String,
}

/// A single term within a taxonomy.
#[derive(Debug, Clone, Deserialize)]
pub struct Term {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A post type as served by the `types` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct PostType {
    pub slug: String,
    pub name: String,
    pub rest_base: String,
}

/// A post; only the rendered title is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub title: RenderedTitle,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderedTitle {
    #[serde(default)]
    pub rendered: String,
}

/// [`Transport`] implementation backed by a shared `reqwest::Client`.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<ApiPage, TransportError> {
        debug!(url = %url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let total_pages = response
            .headers()
            .get(TOTAL_PAGES_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok());
        let link = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;
        Ok(ApiPage {
            status,
            total_pages,
            link,
            body,
        })
    }
}

/// Parse a `Link`-style header into a relation → URL map.
///
/// Entries look like `<https://example.org/?page=2>; rel="next"`, separated
/// by commas. Entries missing either the URL or the relation are skipped.
pub fn parse_link_header(header: &str) -> HashMap<String, String> {
    let url_re = Regex::new(r"<([^<>]+)>").unwrap();
    let rel_re = Regex::new(r#"rel="([^"]+)""#).unwrap();

    let mut links = HashMap::new();
    for entry in header.split(',') {
        let mut parts = entry.trim().splitn(2, ';');
        let (Some(url_part), Some(rel_part)) = (parts.next(), parts.next()) else {
            continue;
        };
        let Some(url) = url_re.captures(url_part).and_then(|c| c.get(1)) else {
            continue;
        };
        let Some(rel) = rel_re.captures(rel_part).and_then(|c| c.get(1)) else {
            continue;
        };
        links.insert(rel.as_str().to_owned(), url.as_str().to_owned());
    }
    links
}

fn transport_error(context: &str) -> impl FnOnce(TransportError) -> FetchError + '_ {
    move |source| FetchError::Transport {
        context: context.to_owned(),
        source,
    }
}

/// Decode one response into its records.
///
/// The upstream serves some collections (`taxonomies`, `types`) as JSON
/// objects keyed by slug rather than arrays; both shapes are accepted, with
/// object values taken in document order.
fn records_from_page(page: &ApiPage, context: &str) -> Result<Vec<Value>, FetchError> {
    if !(200..300).contains(&page.status) {
        error!(context = context, status = page.status, "Collection request failed");
        return Err(FetchError::BadStatus {
            context: context.to_owned(),
            status: page.status,
        });
    }
    match serde_json::from_str::<Value>(&page.body) {
        Ok(Value::Array(records)) => Ok(records),
        Ok(Value::Object(map)) => Ok(map.into_iter().map(|(_, v)| v).collect()),
        _ => {
            error!(context = context, "Collection body is not a JSON collection");
            Err(FetchError::BadPayload {
                context: context.to_owned(),
            })
        }
    }
}

/// Fetch a non-paginated collection endpoint and return its records.
async fn fetch_collection(
    transport: &dyn Transport,
    url: &str,
    context: &str,
) -> Result<Vec<Value>, FetchError> {
    let page = transport.get(url).await.map_err(transport_error(context))?;
    records_from_page(&page, context)
}

/// Fetch every page of a paginated collection, following `next` links.
///
/// The first response's total-page header bounds the loop (one page when the
/// header is absent or malformed); a missing `next` relation also ends it,
/// so a stray `next` link on the final page is never followed. Records are
/// concatenated in page-arrival order, without dedup or sorting.
pub async fn fetch_all_pages(
    transport: &dyn Transport,
    progress: &dyn Progress,
    url: &str,
    context: &str,
) -> Result<Vec<Value>, FetchError> {
    let mut page = transport.get(url).await.map_err(transport_error(context))?;
    let total_pages = page.total_pages.unwrap_or(1).max(1);
    let mut records = Vec::new();
    let mut page_no = 1u32;

    loop {
        progress.page_fetched(page_no);
        records.extend(records_from_page(&page, context)?);

        if page_no >= total_pages {
            break;
        }
        let next = page
            .link
            .as_deref()
            .map(parse_link_header)
            .and_then(|mut links| links.remove("next"));
        let Some(next_url) = next else { break };

        page = transport
            .get(&next_url)
            .await
            .map_err(transport_error(context))?;
        page_no += 1;
    }

    debug!(
        context = context,
        pages = page_no,
        records = records.len(),
        "Fetched paginated collection"
    );
    Ok(records)
}

/// Fetch the taxonomies list and retain the allow-listed ones, preserving
/// server order. An empty allow-list skips the request entirely.
pub async fn get_taxonomies(
    transport: &dyn Transport,
    config: &Config,
) -> Result<Vec<Taxonomy>, FetchError> {
    if config.taxonomies.is_empty() {
        info!("Taxonomy allow-list is empty, skipping taxonomies");
        return Ok(Vec::new());
    }

    let url = config.collection_url("taxonomies");
    let records = fetch_collection(transport, &url, "taxonomies").await?;

    let taxonomies: Vec<Taxonomy> = records
        .into_iter()
        .filter_map(|record| serde_json::from_value::<Taxonomy>(record).ok())
        .filter(|taxonomy| config.taxonomies.iter().any(|slug| *slug == taxonomy.slug))
        .collect();

    info!(count = taxonomies.len(), "Retained allow-listed taxonomies");
    Ok(taxonomies)
}

/// Fetch every term of one taxonomy through the paginated fetcher.
pub async fn get_taxonomy_terms(
    transport: &dyn Transport,
    progress: &dyn Progress,
    config: &Config,
    taxonomy: &Taxonomy,
) -> Result<Vec<Term>, FetchError> {
    let url = config.paged_collection_url(&taxonomy.rest_base);
    let context = format!("terms for {}", taxonomy.slug);
    let records = fetch_all_pages(transport, progress, &url, &context).await?;

    let mut terms = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<Term>(record) {
            Ok(term) => terms.push(term),
            Err(_) => {
                return Err(FetchError::BadPayload { context });
            }
        }
    }
    Ok(terms)
}

/// Fetch the post types list and retain the allow-listed ones, preserving
/// server order. An empty allow-list skips the request entirely.
pub async fn get_post_types(
    transport: &dyn Transport,
    config: &Config,
) -> Result<Vec<PostType>, FetchError> {
    if config.post_types.is_empty() {
        info!("Post type allow-list is empty, skipping post types");
        return Ok(Vec::new());
    }

    let url = config.collection_url("types");
    let records = fetch_collection(transport, &url, "post types").await?;

    let post_types: Vec<PostType> = records
        .into_iter()
        .filter_map(|record| serde_json::from_value::<PostType>(record).ok())
        .filter(|post_type| config.post_types.iter().any(|slug| *slug == post_type.slug))
        .collect();

    info!(count = post_types.len(), "Retained allow-listed post types");
    Ok(post_types)
}

/// Fetch every post of one post type through the paginated fetcher.
pub async fn get_posts(
    transport: &dyn Transport,
    progress: &dyn Progress,
    config: &Config,
    post_type: &PostType,
) -> Result<Vec<Post>, FetchError> {
    let url = config.paged_collection_url(&post_type.rest_base);
    let context = format!("posts for {}", post_type.slug);
    let records = fetch_all_pages(transport, progress, &url, &context).await?;

    let mut posts = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<Post>(record) {
            Ok(post) => posts.push(post),
            Err(_) => {
                return Err(FetchError::BadPayload { context });
            }
        }
    }
    Ok(posts)
}
