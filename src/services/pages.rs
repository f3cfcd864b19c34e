use std::collections::{HashMap, HashSet};

use crate::db::Record;
use crate::models::CustomPage;

/// Lowercases the title and collapses each whitespace run into one hyphen.
/// Nothing else is touched.
pub fn derive_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for c in title.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }

    slug
}

/// Uses `slug` as given, or derives one from `title` when it is blank.
pub fn resolve_slug(slug: &str, title: &str) -> String {
    let slug = slug.trim();
    if slug.is_empty() {
        derive_slug(title)
    } else {
        slug.to_string()
    }
}

/// Slugs shared by more than one page.
pub fn duplicate_slugs(pages: &[Record<CustomPage>]) -> HashSet<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for page in pages {
        *counts.entry(page.slug.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(slug, _)| slug.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_lowercase_and_hyphenated() {
        assert_eq!(derive_slug("About Our  Chapter"), "about-our-chapter");
        assert_eq!(derive_slug("Q&A: 2025!"), "q&a:-2025!");
        assert_eq!(derive_slug(" Padded\t Title "), "-padded-title-");
    }

    #[test]
    fn explicit_slug_wins() {
        assert_eq!(resolve_slug("custom", "Some Title"), "custom");
        assert_eq!(resolve_slug("   ", "Some Title"), "some-title");
    }
}
