//! Content filtering
//!
//! Partitions the fully merged record stream into clean and flagged subsets
//! using a domain blacklist. This is a pure post-pass over the combined
//! ordering; both subsets keep their relative input order.

use crate::models::ChannelRecord;

/// Split records into (clean, flagged). A record is flagged when its URL
/// contains any blacklist domain as a case-insensitive substring.
pub fn partition(
    records: Vec<ChannelRecord>,
    blacklist: &[String],
) -> (Vec<ChannelRecord>, Vec<ChannelRecord>) {
    if blacklist.is_empty() {
        return (records, Vec::new());
    }

    let needles: Vec<String> = blacklist.iter().map(|d| d.to_lowercase()).collect();
    records
        .into_iter()
        .partition(|record| !is_flagged(&record.url, &needles))
}

fn is_flagged(url: &str, needles: &[String]) -> bool {
    let lowered = url.to_lowercase();
    needles.iter().any(|needle| lowered.contains(needle))
}
