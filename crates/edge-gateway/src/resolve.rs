//! Node resolution by identifier.

use crate::slug::slugify;
use crate::types::Node;

/// Find the node an identifier refers to.
///
/// Nodes are checked in directory order and the first node matching any rule wins. A node
/// matches on exact id, exact url, exact name, case-insensitive name, or when the slug of
/// its name equals the lower-cased identifier. `None` means the node is unknown.
pub fn resolve_node<'a>(nodes: &'a [Node], identifier: &str) -> Option<&'a Node> {
    if identifier.is_empty() {
        return None;
    }

    let lowered = identifier.to_lowercase();

    nodes.iter().find(|n| {
        n.id == identifier
            || n.url == identifier
            || n.name == identifier
            || n.name.to_lowercase() == lowered
            || matches_slug(&n.name, &lowered)
    })
}

fn matches_slug(name: &str, lowered: &str) -> bool {
    let slug = slugify(name);
    !slug.is_empty() && slug == lowered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, name: &str, url: &str) -> Node {
        Node {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            url: url.to_string(),
        }
    }

    fn directory() -> Vec<Node> {
        vec![
            node("localhost-8001-mcp", "Math Node", "http://localhost:8001/mcp"),
            node("search", "My Node!", "http://localhost:8002/mcp"),
            node("weather", "Weather", "http://localhost:8004/mcp"),
        ]
    }

    #[test]
    fn test_resolve_by_id() {
        let nodes = directory();
        assert_eq!(resolve_node(&nodes, "search").unwrap().url, "http://localhost:8002/mcp");
    }

    #[test]
    fn test_resolve_by_url() {
        let nodes = directory();
        assert_eq!(
            resolve_node(&nodes, "http://localhost:8004/mcp").unwrap().id,
            "weather"
        );
    }

    #[test]
    fn test_resolve_by_name_case_insensitive() {
        let nodes = directory();
        assert_eq!(resolve_node(&nodes, "Math Node").unwrap().id, "localhost-8001-mcp");
        assert_eq!(resolve_node(&nodes, "MATH node").unwrap().id, "localhost-8001-mcp");
    }

    #[test]
    fn test_resolve_by_slug() {
        let nodes = directory();
        assert_eq!(resolve_node(&nodes, "my-node").unwrap().id, "search");
        assert_eq!(resolve_node(&nodes, "MY-NODE").unwrap().id, "search");
        assert_eq!(resolve_node(&nodes, "math-node").unwrap().id, "localhost-8001-mcp");
    }

    #[test]
    fn test_earlier_node_wins_on_any_rule() {
        // The first node's name beats the second node's id.
        let nodes = vec![
            node("a", "weather", "http://a.test"),
            node("weather", "Other", "http://b.test"),
        ];
        assert_eq!(resolve_node(&nodes, "weather").unwrap().id, "a");

        // A slug match on an earlier node beats an exact id further down.
        let nodes = vec![
            node("x", "Weather Tools", "http://x.test"),
            node("weather-tools", "Other", "http://y.test"),
        ];
        assert_eq!(resolve_node(&nodes, "weather-tools").unwrap().id, "x");
    }

    #[test]
    fn test_unknown_node() {
        let nodes = directory();
        assert!(resolve_node(&nodes, "nope").is_none());
        assert!(resolve_node(&nodes, "").is_none());
        assert!(resolve_node(&[], "search").is_none());
    }

    #[test]
    fn test_empty_slug_never_matches() {
        let nodes = vec![node("x", "!!!", "http://x.test")];
        assert!(resolve_node(&nodes, "-").is_none());
    }
}
