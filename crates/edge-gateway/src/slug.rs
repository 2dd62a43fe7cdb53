//! Slugs and URL-derived node identifiers.

use url::Url;

/// Maximum length of a slug, in characters.
pub const MAX_SLUG_LEN: usize = 60;

/// Lowercase, collapse every run of non-alphanumeric characters into `-`, trim, truncate.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_dash = false;

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    // Only ASCII survives the loop, so byte truncation is char-safe.
    slug.truncate(MAX_SLUG_LEN);
    slug
}

/// Derive a stable node id from its URL: slug of `host[:port]` plus the path.
///
/// A URL without a host contributes only its path. URLs that do not parse are slugified
/// verbatim.
pub fn derive_node_id(raw_url: &str) -> String {
    let parsed = match Url::parse(raw_url) {
        Ok(url) => url,
        Err(_) => return slugify(raw_url),
    };

    let authority = match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    };
    let path = parsed.path().trim_end_matches('/');

    slugify(&format!("{authority}{path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("My Node!"), "my-node");
        assert_eq!(slugify("  --Weather__Tools--  "), "weather-tools");
        assert_eq!(slugify("node_a"), "node-a");
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_non_ascii() {
        assert_eq!(slugify("Café Node"), "caf-node");
    }

    #[test]
    fn test_slugify_truncates() {
        let long = "a".repeat(100);
        assert_eq!(slugify(&long).len(), MAX_SLUG_LEN);

        // Truncation happens after trimming, so a cut may land on a dash.
        let input = format!("{} b", "a".repeat(59));
        let slug = slugify(&input);
        assert_eq!(slug.len(), MAX_SLUG_LEN);
        assert!(slug.ends_with('-'));
    }

    #[test]
    fn test_derive_node_id_with_port_and_path() {
        assert_eq!(
            derive_node_id("http://localhost:8001/mcp/"),
            "localhost-8001-mcp"
        );
    }

    #[test]
    fn test_derive_node_id_default_port_dropped() {
        assert_eq!(
            derive_node_id("https://tools.example.com:443/v1/mcp"),
            "tools-example-com-v1-mcp"
        );
    }

    #[test]
    fn test_derive_node_id_root_path() {
        assert_eq!(derive_node_id("https://node.example.com/"), "node-example-com");
    }

    #[test]
    fn test_derive_node_id_without_host() {
        assert_eq!(derive_node_id("mailto:x"), "x");
        assert_eq!(derive_node_id("urn:node:math"), "node-math");
    }

    #[test]
    fn test_derive_node_id_unparseable() {
        assert_eq!(derive_node_id("not a url"), "not-a-url");
    }
}
