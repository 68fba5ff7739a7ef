//! Merge & order engine
//!
//! Folds every source's entries into per-category buckets keyed by canonical
//! identity. Entries must be supplied in provenance precedence order
//! (custom-multicast, then custom-http, then validated); URL position within
//! a bucket is first-occurrence-wins, so that concatenation order alone
//! guarantees custom URLs sit ahead of validated ones without any explicit
//! sort. Channel display order within a category is computed separately.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::classify::{self, Category};
use crate::mapping::IdentityResolver;
use crate::models::RawEntry;

#[derive(Default)]
pub struct MergedPlaylist {
    buckets: HashMap<Category, HashMap<String, Vec<String>>>,
    /// Identities that received at least one custom-source URL anywhere.
    custom_touched: HashSet<String>,
}

impl MergedPlaylist {
    fn insert(&mut self, category: Category, identity: String, url: String, custom: bool) {
        if custom {
            self.custom_touched.insert(identity.clone());
        }

        let urls = self
            .buckets
            .entry(category)
            .or_default()
            .entry(identity)
            .or_default();
        if !urls.contains(&url) {
            urls.push(url);
        }
    }

    /// Ordered URLs for one (category, identity) bucket.
    pub fn urls(&self, category: Category, identity: &str) -> &[String] {
        self.buckets
            .get(&category)
            .and_then(|channels| channels.get(identity))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Display order of identities within a category.
    ///
    /// The national category follows the fixed canonical sequence, unlisted
    /// identities after all listed ones and lexical among themselves. Every
    /// other category (the catch-all included) is lexical, with identities
    /// that received a custom-source URL stably hoisted to the front.
    pub fn ordered_channels(&self, category: Category) -> Vec<&str> {
        let Some(channels) = self.buckets.get(&category) else {
            return Vec::new();
        };

        let mut names: Vec<&str> = channels.keys().map(String::as_str).collect();
        names.sort_unstable();

        if category == Category::National {
            names.sort_by_key(|name| {
                crate::mapping::tables::cctv_rank(name).unwrap_or(usize::MAX)
            });
        } else {
            names.sort_by_key(|name| !self.custom_touched.contains(*name));
        }

        names
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn channel_count(&self) -> usize {
        self.buckets.values().map(HashMap::len).sum()
    }

    pub fn url_count(&self) -> usize {
        self.buckets
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }
}

/// Resolve, classify and bucket every entry. `entries` must already be
/// concatenated in provenance precedence order.
pub fn merge(entries: Vec<RawEntry>, resolver: &mut IdentityResolver) -> MergedPlaylist {
    let total = entries.len();
    let mut merged = MergedPlaylist::default();

    for entry in entries {
        let title = crate::ingestor::extract_title(&entry.header);
        let identity = resolver.resolve(&title);
        let category = classify::classify(&identity);
        debug!(
            "{} -> {} [{}] ({})",
            title,
            identity,
            category.label(),
            entry.url
        );
        merged.insert(category, identity, entry.url, entry.provenance.is_custom());
    }

    info!(
        "Merged {} entries into {} channels ({} distinct URLs)",
        total,
        merged.channel_count(),
        merged.url_count()
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::AliasStore;
    use crate::models::Provenance;

    fn entry(header: &str, url: &str, provenance: Provenance) -> RawEntry {
        RawEntry {
            header: header.to_string(),
            url: url.to_string(),
            provenance,
        }
    }

    fn merge_all(entries: Vec<RawEntry>) -> MergedPlaylist {
        let mut resolver = IdentityResolver::new(AliasStore::in_memory());
        merge(entries, &mut resolver)
    }

    #[test]
    fn custom_url_sits_ahead_of_validated() {
        let merged = merge_all(vec![
            entry("#EXTINF:-1,山东卫视", "http://custom/u1", Provenance::CustomHttp),
            entry("#EXTINF:-1,山东卫视 高清", "http://validated/u2", Provenance::Validated),
        ]);

        assert_eq!(
            merged.urls(Category::Provincial, "山东卫视"),
            ["http://custom/u1", "http://validated/u2"]
        );
    }

    #[test]
    fn provenance_precedence_across_all_three_tiers() {
        let merged = merge_all(vec![
            entry("#EXTINF:-1,CCTV1", "http://multicast/u1", Provenance::CustomMulticast),
            entry("#EXTINF:-1,CCTV-1", "http://http/u2", Provenance::CustomHttp),
            entry("#EXTINF:-1,央视综合", "http://validated/u3", Provenance::Validated),
        ]);

        assert_eq!(
            merged.urls(Category::National, "CCTV-1综合"),
            ["http://multicast/u1", "http://http/u2", "http://validated/u3"]
        );
    }

    #[test]
    fn duplicate_urls_keep_first_position() {
        let merged = merge_all(vec![
            entry("#EXTINF:-1,CCTV5", "http://same/url", Provenance::CustomMulticast),
            entry("#EXTINF:-1,CCTV-5", "http://same/url", Provenance::Validated),
            entry("#EXTINF:-1,CCTV-5 高清", "http://other/url", Provenance::Validated),
        ]);

        assert_eq!(
            merged.urls(Category::National, "CCTV-5体育"),
            ["http://same/url", "http://other/url"]
        );
    }

    #[test]
    fn national_category_follows_canonical_sequence() {
        let merged = merge_all(vec![
            entry("#EXTINF:-1,CCTV-13新闻", "http://a", Provenance::Validated),
            entry("#EXTINF:-1,CCTV1", "http://b", Provenance::Validated),
            entry("#EXTINF:-1,央视精品", "http://c", Provenance::Validated),
            entry("#EXTINF:-1,CCTV5", "http://d", Provenance::Validated),
        ]);

        // Unlisted "央视精品" sorts after all canonical entries.
        assert_eq!(
            merged.ordered_channels(Category::National),
            ["CCTV-1综合", "CCTV-5体育", "CCTV-13新闻", "央视精品"]
        );
    }

    #[test]
    fn custom_touched_channels_are_hoisted() {
        let merged = merge_all(vec![
            entry("#EXTINF:-1,浙江卫视", "http://custom/z", Provenance::CustomMulticast),
            entry("#EXTINF:-1,安徽卫视", "http://validated/a", Provenance::Validated),
            entry("#EXTINF:-1,江苏卫视", "http://validated/j", Provenance::Validated),
        ]);

        // 浙江卫视 received a custom URL and jumps ahead of the lexically
        // earlier validated-only channels; the rest stay lexical.
        assert_eq!(
            merged.ordered_channels(Category::Provincial),
            ["浙江卫视", "安徽卫视", "江苏卫视"]
        );
    }

    #[test]
    fn catch_all_participates_in_hoist() {
        let merged = merge_all(vec![
            entry("#EXTINF:-1,求索纪录", "http://custom/q", Provenance::CustomHttp),
            entry("#EXTINF:-1,凤凰中文", "http://validated/f", Provenance::Validated),
        ]);

        assert_eq!(
            merged.ordered_channels(Category::Other),
            ["求索纪录", "凤凰中文"]
        );
    }

    #[test]
    fn no_url_appears_twice_in_any_bucket() {
        let merged = merge_all(vec![
            entry("#EXTINF:-1,翡翠台", "http://u/1", Provenance::CustomMulticast),
            entry("#EXTINF:-1,翡翠台", "http://u/1", Provenance::CustomHttp),
            entry("#EXTINF:-1,翡翠台", "http://u/2", Provenance::Validated),
            entry("#EXTINF:-1,翡翠台", "http://u/2", Provenance::Validated),
        ]);

        assert_eq!(
            merged.urls(Category::CrossBorder, "翡翠台"),
            ["http://u/1", "http://u/2"]
        );
    }
}
