//! Rendering of the generated strings file: escaping, grouping containers
//! and the final blob assembly.

use tracing::debug;

use crate::contract::Progress;
use crate::fetch::{Post, Term};

/// Header comment of the generated file. The file is a PHP source consumed
/// by the downstream string-extraction tool and must never be executed.
pub const FILE_HEADER: &str = "<?php
// phpcs:disable
/**
 * Generated file for translation strings.
 *
 * Used to import additional strings into the translation project.
 *
 * ⚠️ This is a generated file. Do not edit manually.
 * ⚠️ Do not require or include this file anywhere.
 */

";

/// All extracted strings for one taxonomy, in fetch order.
#[derive(Debug)]
pub struct TaxonomyStrings {
    /// Taxonomy display name, used in the disambiguation context.
    pub label: String,
    pub terms: Vec<Term>,
}

impl TaxonomyStrings {
    /// Number of output lines this group renders: one per term name plus one
    /// per non-empty description.
    pub fn string_count(&self) -> usize {
        self.terms
            .iter()
            .map(|t| if t.description.is_empty() { 1 } else { 2 })
            .sum()
    }
}

/// All extracted posts for one post type, in fetch order.
#[derive(Debug)]
pub struct PostTypeStrings {
    /// Post type slug, used in the disambiguation context.
    pub slug: String,
    pub posts: Vec<Post>,
}

/// Backslash-escape literal single quotes for embedding in a
/// single-quote-delimited string.
pub fn escape_single_quotes(value: &str) -> String {
    value.replace('\'', "\\'")
}

/// Render the complete generated file: header, term lines grouped by
/// taxonomy, then post title lines grouped by post type.
///
/// The `_x( '<text>', '<context>', '<textdomain>' );` line shape is a
/// contract with the downstream extraction tool and is reproduced verbatim.
pub fn render(
    taxonomies: &[TaxonomyStrings],
    post_types: &[PostTypeStrings],
    textdomain: &str,
    progress: &dyn Progress,
) -> String {
    let mut out = String::from(FILE_HEADER);

    for group in taxonomies {
        let label = escape_single_quotes(&group.label);
        for term in &group.terms {
            let name = escape_single_quotes(&term.name);
            out.push_str(&format!(
                "_x( '{name}', '{label} term name', '{textdomain}' );\n"
            ));
            progress.string_extracted(&name);

            if !term.description.is_empty() {
                let description = escape_single_quotes(&term.description);
                out.push_str(&format!(
                    "_x( '{description}', '{label} term description', '{textdomain}' );\n"
                ));
            }
        }
    }

    for group in post_types {
        for post in &group.posts {
            let title = escape_single_quotes(&post.title.rendered);
            out.push_str(&format!(
                "_x( '{title}', '{} title', '{textdomain}' );\n",
                group.slug
            ));
            progress.string_extracted(&title);
        }
    }

    debug!(bytes = out.len(), "Rendered output blob");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::SilentProgress;
    use crate::fetch::RenderedTitle;

    fn term(name: &str, description: &str) -> Term {
        Term {
            name: name.into(),
            description: description.into(),
        }
    }

    fn lines_of(output: &str) -> Vec<&str> {
        output
            .lines()
            .filter(|l| l.starts_with("_x("))
            .collect()
    }

    #[test]
    fn header_marks_the_file_as_generated() {
        assert!(FILE_HEADER.starts_with("<?php\n"));
        assert!(FILE_HEADER.contains("Do not edit manually"));
        assert!(FILE_HEADER.contains("Do not require or include"));
        assert!(FILE_HEADER.ends_with("*/\n\n"));
    }

    #[test]
    fn term_without_description_renders_one_line() {
        let groups = vec![TaxonomyStrings {
            label: "category".into(),
            terms: vec![term("News", "")],
        }];
        let output = render(&groups, &[], "example", &SilentProgress);
        assert_eq!(
            lines_of(&output),
            vec!["_x( 'News', 'category term name', 'example' );"]
        );
    }

    #[test]
    fn term_with_description_renders_name_then_description() {
        let groups = vec![TaxonomyStrings {
            label: "category".into(),
            terms: vec![term("Tips", "Handy tips")],
        }];
        let output = render(&groups, &[], "example", &SilentProgress);
        assert_eq!(
            lines_of(&output),
            vec![
                "_x( 'Tips', 'category term name', 'example' );",
                "_x( 'Handy tips', 'category term description', 'example' );",
            ]
        );
    }

    #[test]
    fn single_quotes_are_escaped() {
        let groups = vec![TaxonomyStrings {
            label: "post_tag".into(),
            terms: vec![term("Editors' Pick", "")],
        }];
        let output = render(&groups, &[], "example", &SilentProgress);
        assert_eq!(
            lines_of(&output),
            vec!["_x( 'Editors\\' Pick', 'post_tag term name', 'example' );"]
        );
    }

    #[test]
    fn taxonomy_label_is_escaped_in_the_context() {
        let groups = vec![TaxonomyStrings {
            label: "Editors' Choice".into(),
            terms: vec![term("News", "")],
        }];
        let output = render(&groups, &[], "example", &SilentProgress);
        assert_eq!(
            lines_of(&output),
            vec!["_x( 'News', 'Editors\\' Choice term name', 'example' );"]
        );
    }

    #[test]
    fn post_titles_use_the_slug_context() {
        let post_groups = vec![PostTypeStrings {
            slug: "page".into(),
            posts: vec![Post {
                title: RenderedTitle {
                    rendered: "About Us".into(),
                },
            }],
        }];
        let output = render(&[], &post_groups, "wporg", &SilentProgress);
        assert_eq!(
            lines_of(&output),
            vec!["_x( 'About Us', 'page title', 'wporg' );"]
        );
    }

    #[test]
    fn string_count_includes_descriptions() {
        let group = TaxonomyStrings {
            label: "category".into(),
            terms: vec![term("News", ""), term("Tips", "Handy tips")],
        };
        assert_eq!(group.string_count(), 3);
    }
}
