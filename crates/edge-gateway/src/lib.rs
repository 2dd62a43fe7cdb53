//! Edge gateway core: node entries, derived ids, configuration fingerprints, and node resolution.

pub mod entries;
pub mod fingerprint;
pub mod resolve;
pub mod slug;
pub mod types;

pub use entries::{parse_node_entries, EntryError};
pub use fingerprint::config_fingerprint;
pub use resolve::resolve_node;
pub use slug::{derive_node_id, slugify, MAX_SLUG_LEN};
pub use types::*;
