//! High-level pipeline: fetch every allow-listed collection, render the
//! output blob, and only then touch the filesystem.
//!
//! The pipeline is fail-fast: the first fetch error aborts the run before
//! any file is written, so a partially generated file can never exist.
//! Process termination is the caller's decision.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::Config;
use crate::contract::{FetchError, Progress, Transport};
use crate::fetch::{get_post_types, get_posts, get_taxonomies, get_taxonomy_terms};
use crate::render::{render, PostTypeStrings, TaxonomyStrings};

/// Per-group outcome: how many strings one taxonomy or post type contributed.
#[derive(Debug)]
pub struct GroupReport {
    pub label: String,
    pub strings: usize,
}

/// Result of a successful run: group counts plus the rendered blob.
#[derive(Debug)]
pub struct GenerateReport {
    pub taxonomies: Vec<GroupReport>,
    pub post_types: Vec<GroupReport>,
    pub output: String,
}

/// Run the full extraction pipeline against the given transport.
///
/// Taxonomies come first, then post types, each group in fetch order.
/// Taxonomies that yield zero terms are dropped from the output.
pub async fn generate(
    config: &Config,
    transport: &dyn Transport,
    progress: &dyn Progress,
) -> Result<GenerateReport, FetchError> {
    progress.retrieving_taxonomies();
    let taxonomies = get_taxonomies(transport, config).await?;

    progress.retrieving_terms();
    let mut term_groups: Vec<TaxonomyStrings> = Vec::new();
    for taxonomy in &taxonomies {
        progress.collection_started(&taxonomy.name);
        let terms = get_taxonomy_terms(transport, progress, config, taxonomy).await?;
        info!(taxonomy = %taxonomy.slug, terms = terms.len(), "Fetched taxonomy terms");
        if terms.is_empty() {
            continue;
        }
        term_groups.push(TaxonomyStrings {
            label: taxonomy.name.clone(),
            terms,
        });
    }

    progress.retrieving_post_types();
    let post_types = get_post_types(transport, config).await?;

    let mut post_groups: Vec<PostTypeStrings> = Vec::new();
    for post_type in &post_types {
        progress.collection_started(&post_type.name);
        let posts = get_posts(transport, progress, config, post_type).await?;
        info!(post_type = %post_type.slug, posts = posts.len(), "Fetched posts");
        post_groups.push(PostTypeStrings {
            slug: post_type.slug.clone(),
            posts,
        });
    }

    let taxonomy_reports = term_groups
        .iter()
        .map(|group| GroupReport {
            label: group.label.clone(),
            strings: group.string_count(),
        })
        .collect();
    let post_type_reports = post_groups
        .iter()
        .map(|group| GroupReport {
            label: group.slug.clone(),
            strings: group.posts.len(),
        })
        .collect();

    let output = render(&term_groups, &post_groups, &config.textdomain, progress);
    info!(
        taxonomy_groups = term_groups.len(),
        post_type_groups = post_groups.len(),
        bytes = output.len(),
        "Rendered translation strings"
    );

    Ok(GenerateReport {
        taxonomies: taxonomy_reports,
        post_types: post_type_reports,
        output,
    })
}

/// Write the rendered blob, creating the parent directory when missing.
/// Fully overwrites any previous file. Called only after every fetch
/// succeeded.
pub fn write_output(path: &Path, blob: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                error!(path = %parent.display(), "Failed to create output directory");
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
    }
    fs::write(path, blob).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = blob.len(), "Wrote generated strings file");
    Ok(())
}
