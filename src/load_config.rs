use std::path::PathBuf;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::info;
use url::Url;

use crate::cli::GenerateArgs;
use crate::config::{
    Config, DEFAULT_ENDPOINT_BASE, DEFAULT_OUTPUT_PATH, DEFAULT_POST_TYPES, DEFAULT_TAXONOMIES,
    DEFAULT_TEXTDOMAIN,
};

/// Build the immutable run configuration from parsed CLI arguments.
///
/// `--no-taxonomies` / `--no-post-types` force the respective allow-list
/// empty, overriding any explicit list given alongside them.
pub fn load_config(args: &GenerateArgs) -> Result<Config> {
    let endpoint_base = match &args.url {
        Some(raw) => {
            let mut raw = raw.trim().to_owned();
            if !raw.ends_with('/') {
                raw.push('/');
            }
            Url::parse(&raw).with_context(|| format!("Invalid base URL: {raw}"))?
        }
        None => Url::parse(DEFAULT_ENDPOINT_BASE).context("default endpoint base")?,
    };

    let taxonomies = if args.no_taxonomies {
        Vec::new()
    } else {
        match &args.taxonomies {
            Some(list) => split_slug_list(list),
            None => DEFAULT_TAXONOMIES.iter().map(|s| s.to_string()).collect(),
        }
    };

    let post_types = if args.no_post_types {
        Vec::new()
    } else {
        match &args.post_types {
            Some(list) => split_slug_list(list),
            None => DEFAULT_POST_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    };

    let textdomain = match &args.textdomain {
        Some(raw) => {
            let sanitized = sanitize_textdomain(raw);
            if sanitized.is_empty() {
                info!(raw = %raw, "Textdomain override sanitized to nothing, keeping default");
                DEFAULT_TEXTDOMAIN.to_string()
            } else {
                sanitized
            }
        }
        None => DEFAULT_TEXTDOMAIN.to_string(),
    };

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

    Ok(Config {
        endpoint_base,
        taxonomies,
        post_types,
        textdomain,
        output_path,
    })
}

/// Split a comma-separated slug list, dropping empty segments.
fn split_slug_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Reduce a raw textdomain to its slug-safe form.
///
/// Transform sequence: strip tags, lowercase, strip HTML entities, dots to
/// dashes, drop anything outside `[%a-z0-9 _-]`, whitespace runs to dashes,
/// collapse dash runs, trim surrounding dashes.
pub fn sanitize_textdomain(raw: &str) -> String {
    let tag_re = Regex::new(r"<[^>]*>").unwrap();
    let entity_re = Regex::new(r"&.+?;").unwrap();
    let charset_re = Regex::new(r"[^%a-z0-9 _-]").unwrap();
    let space_re = Regex::new(r"\s+").unwrap();
    let dash_re = Regex::new(r"-+").unwrap();

    let value = tag_re.replace_all(raw, "");
    let value = value.to_lowercase();
    let value = entity_re.replace_all(&value, "");
    let value = value.replace('.', "-");
    let value = charset_re.replace_all(&value, "");
    let value = space_re.replace_all(&value, "-");
    let value = dash_re.replace_all(&value, "-");
    value.trim_matches('-').to_string()
}
