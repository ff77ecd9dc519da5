//! Query variation generation.
//!
//! Every variation is derived from the original query alone (steps do not
//! feed into each other) and only the matched token is rewritten.

mod tables;

pub use tables::{find_related, ExpansionTable, EXTENSION_GROUPS, KEYWORD_GROUPS};

use std::collections::BTreeSet;
use tracing::debug;

use crate::grammar::{EXTENSION_TOKEN, KEYWORD_TOKEN, PATH_TOKEN, SITE_DOMAIN};

/// Sorted, deduplicated variations of `query`, always including `query`.
pub fn get_variations(query: &str) -> Vec<String> {
    let mut variations = BTreeSet::new();
    variations.insert(query.to_string());

    site_variations(query, &mut variations);
    parent_path_variations(query, &mut variations);
    extension_variations(query, &mut variations);
    keyword_variations(query, &mut variations);

    debug!("Generated {} variations for {:?}", variations.len(), query);
    variations.into_iter().collect()
}

fn replace_span(query: &str, start: usize, end: usize, replacement: &str) -> String {
    format!("{}{}{}", &query[..start], replacement, &query[end..])
}

/// Subdomain wildcard and `www` exclusion for the first `site:` domain.
fn site_variations(query: &str, out: &mut BTreeSet<String>) {
    let Some(caps) = SITE_DOMAIN.captures(query) else {
        return;
    };
    let domain = &caps[1];

    let bare = match domain.strip_prefix("*.") {
        Some(bare) => bare,
        None => {
            out.insert(query.replace(&format!("site:{}", domain), &format!("site:*.{}", domain)));
            domain
        }
    };
    out.insert(format!("{} -site:www.{}", query, bare));
}

/// `inurl:/admin/user/` also yields `inurl:/admin`.
fn parent_path_variations(query: &str, out: &mut BTreeSet<String>) {
    for caps in PATH_TOKEN.captures_iter(query) {
        let Some(value) = caps.get(2) else { continue };
        let path = value.as_str();
        if path.matches('/').count() < 2 {
            continue;
        }

        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        if segments.len() < 2 {
            continue;
        }
        let parent = segments[..segments.len() - 1].join("/");
        if parent.is_empty() {
            continue;
        }
        let parent = if path.starts_with('/') {
            format!("/{}", parent)
        } else {
            parent
        };

        out.insert(replace_span(query, value.start(), value.end(), &parent));
    }
}

/// `ext:php` also yields `ext:(php|php5|phtml|php7)`.
fn extension_variations(query: &str, out: &mut BTreeSet<String>) {
    for caps in EXTENSION_TOKEN.captures_iter(query) {
        let (Some(op), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };

        let related = find_related(&value.as_str().to_lowercase(), EXTENSION_GROUPS);
        if related.len() < 2 {
            continue;
        }

        let group = format!("ext:({})", related.join("|"));
        out.insert(replace_span(query, op.start(), value.end(), &group));
    }
}

/// `inurl:/login` also yields `inurl:(/login|/admin|...)`.
fn keyword_variations(query: &str, out: &mut BTreeSet<String>) {
    for caps in KEYWORD_TOKEN.captures_iter(query) {
        let (Some(op), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };

        let keyword = value.as_str().to_lowercase();
        let mut core = keyword.as_str();
        let prefix = if let Some(rest) = core.strip_prefix('/') {
            core = rest;
            "/"
        } else {
            ""
        };
        let suffix = if let Some(rest) = core.strip_suffix('/') {
            core = rest;
            "/"
        } else {
            ""
        };

        let related = find_related(core, KEYWORD_GROUPS);
        if related.len() < 2 {
            continue;
        }

        let members: Vec<String> = related
            .iter()
            .map(|member| format!("{}{}{}", prefix, member, suffix))
            .collect();
        let group = format!("{}:({})", op.as_str(), members.join("|"));
        out.insert(replace_span(query, op.start(), value.end(), &group));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_extension_group() {
        let variations = get_variations("ext:php");
        assert!(variations.contains(&"ext:php".to_string()));
        assert!(variations.contains(&"ext:(php|php5|phtml|php7)".to_string()));
    }

    #[test_case("ext:php" ; "extension")]
    #[test_case("site:example.com inurl:/admin/user/" ; "site and path")]
    #[test_case("" ; "empty")]
    #[test_case("nothing to expand" ; "plain")]
    #[test_case("intitle:\"index of\" ext:sql" ; "quoted")]
    fn test_contains_original_sorted_unique(query: &str) {
        let variations = get_variations(query);
        assert!(variations.contains(&query.to_string()));
        let mut sorted = variations.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(variations, sorted);
    }

    #[test]
    fn test_site_variations() {
        let variations = get_variations("site:example.com ext:pdf");
        assert!(variations.contains(&"site:*.example.com ext:pdf".to_string()));
        assert!(variations.contains(&"site:example.com ext:pdf -site:www.example.com".to_string()));
    }

    #[test]
    fn test_wildcard_site_only_gets_www_exclusion() {
        assert_eq!(
            get_variations("site:*.example.com"),
            vec![
                "site:*.example.com".to_string(),
                "site:*.example.com -site:www.example.com".to_string(),
            ]
        );
    }

    #[test]
    fn test_parent_path_keeps_leading_slash() {
        let variations = get_variations("inurl:/admin/user/");
        assert!(variations.contains(&"inurl:/admin".to_string()));
    }

    #[test]
    fn test_intitle_parent_path() {
        let variations = get_variations("intitle:a/b/c");
        assert!(variations.contains(&"intitle:a/b".to_string()));
    }

    #[test]
    fn test_single_segment_path_has_no_parent() {
        let variations = get_variations("inurl:/uploads/");
        assert!(!variations.iter().any(|v| v == "inurl:"));
        assert!(!variations.iter().any(|v| v == "inurl:/"));
    }

    #[test]
    fn test_keyword_slashes_preserved() {
        let variations = get_variations("inurl:/login/");
        assert!(variations
            .contains(&"inurl:(/login/|/admin/|/signin/|/auth/|/portal/|/cpanel/)".to_string()));
    }

    #[test]
    fn test_keyword_membership_lookup() {
        let variations = get_variations("intext:passwd");
        assert!(variations
            .contains(&"intext:(password|passwd|pwd|credentials|secret)".to_string()));
    }

    #[test]
    fn test_filetype_becomes_ext_group() {
        let variations = get_variations("site:a.com filetype:docx");
        assert!(variations.contains(&"site:a.com ext:(doc|docx|rtf|odt)".to_string()));
    }

    #[test]
    fn test_only_matched_token_rewritten() {
        // The same text elsewhere in the query must survive the rewrite.
        let variations = get_variations("ext:log intext:ext:log");
        assert!(variations.contains(&"ext:(log|txt|out|err) intext:ext:log".to_string()));
    }

    #[test]
    fn test_operator_inside_longer_name_not_expanded() {
        let variations = get_variations("allinurl:login");
        assert!(!variations.iter().any(|v| v.contains('(')));
    }

    #[test]
    fn test_unknown_extension_no_group() {
        assert_eq!(get_variations("ext:exe"), vec!["ext:exe".to_string()]);
    }
}
