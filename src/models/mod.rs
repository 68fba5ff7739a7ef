use serde::{Deserialize, Serialize};

use crate::classify::Category;

/// Which source a playlist entry came from.
///
/// Declaration order is the merge precedence order: multicast entries from the
/// self-hosted source outrank its HTTP entries, which outrank entries from the
/// previously validated playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    CustomMulticast,
    CustomHttp,
    Validated,
}

impl Provenance {
    /// Custom sources take part in the channel hoist rule during ordering.
    pub fn is_custom(&self) -> bool {
        matches!(self, Provenance::CustomMulticast | Provenance::CustomHttp)
    }
}

/// One header/URL pair as it appears in a source. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub header: String,
    pub url: String,
    pub provenance: Provenance,
}

/// A fully curated playlist record, one per (identity, URL) in final output
/// order. Built once during serialization and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    pub identity: String,
    pub category: Category,
    pub logo_url: String,
    pub url: String,
}
