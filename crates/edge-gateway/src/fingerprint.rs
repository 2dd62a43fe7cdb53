//! Configuration fingerprints used to key cached directory snapshots.

use std::hash::Hasher;

use fnv::FnvHasher;

/// FNV-1a hash of the input, as lower-case hex.
///
/// Any edit to the raw configuration yields a different fingerprint, which is what
/// invalidates a cached snapshot.
pub fn config_fingerprint(raw: &str) -> String {
    let mut hasher = FnvHasher::default();
    hasher.write(raw.as_bytes());
    format!("{:x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        let a = config_fingerprint(r#"["http://a.test/mcp"]"#);
        let b = config_fingerprint(r#"["http://a.test/mcp"]"#);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_changes_with_config() {
        let a = config_fingerprint(r#"["http://a.test/mcp"]"#);
        let b = config_fingerprint(r#"["http://a.test/mcp" ]"#);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_empty() {
        // FNV-1a 64-bit offset basis.
        assert_eq!(config_fingerprint(""), "cbf29ce484222325");
    }
}
