//! Channel identity resolution
//!
//! Maps cleaned display names to canonical channel identities. Resolution is
//! first-match-wins over five tiers: the fixed alias table, the learned alias
//! table, the national broadcaster numeric rule, the provincial alias sets,
//! and finally a fallback that returns the cleaned name itself while
//! recording it for the learned tier.

use regex::Regex;
use std::sync::OnceLock;

use tracing::debug;

use super::store::AliasStore;
use super::tables;
use crate::text;

/// Sentinel identity for names that clean down to nothing.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// National broadcaster prefix recognised by the numeric rule.
const NATIONAL_PREFIX: &str = "CCTV";

fn first_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("valid number pattern"))
}

pub struct IdentityResolver {
    store: AliasStore,
}

impl IdentityResolver {
    pub fn new(store: AliasStore) -> Self {
        Self { store }
    }

    /// Resolve a display name to its canonical channel identity.
    ///
    /// Names that reach the fallback tier are accumulated in the store for
    /// end-of-run persistence into the learned tier.
    pub fn resolve(&mut self, display_name: &str) -> String {
        let cleaned = text::clean(display_name);
        if cleaned.is_empty() {
            return UNKNOWN_IDENTITY.to_string();
        }

        if let Some(identity) = tables::fixed_alias_map().get(cleaned.as_str()) {
            return (*identity).to_string();
        }

        if let Some(identity) = self.store.lookup(&cleaned) {
            return identity.to_string();
        }

        if let Some(identity) = resolve_national_ordinal(&cleaned) {
            return identity;
        }

        if let Some(identity) = resolve_province_alias(&cleaned) {
            return identity.to_string();
        }

        debug!("Unresolved display name: {}", display_name);
        self.store.note_unresolved(display_name);
        cleaned
    }

    /// Hand the store back for the end-of-run flush.
    pub fn into_store(self) -> AliasStore {
        self.store
    }
}

/// Numeric rule for the CCTV family: strip quality suffixes, spaces and
/// hyphens, then map the first embedded number through the ordinal table.
/// Ordinals outside the table pass through unresolved.
fn resolve_national_ordinal(name: &str) -> Option<String> {
    let squashed: String = text::strip_quality_suffixes(name)
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect();

    if !squashed.to_uppercase().starts_with(NATIONAL_PREFIX) {
        return None;
    }

    let ordinal: u32 = first_number().find(&squashed)?.as_str().parse().ok()?;
    let label = tables::cctv_label(ordinal)?;
    Some(format!("CCTV-{}{}", ordinal, label))
}

/// Provincial alias rule: any registered token occurring as a substring of
/// the name (case-insensitive, ignoring spaces and hyphens) resolves to that
/// canonical identity.
fn resolve_province_alias(name: &str) -> Option<&'static str> {
    let folded = fold(name);
    for (canonical, tokens) in tables::PROVINCE_ALIASES {
        if tokens.iter().any(|token| folded.contains(&fold(token))) {
            return Some(canonical);
        }
    }
    None
}

fn fold(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> IdentityResolver {
        IdentityResolver::new(AliasStore::in_memory())
    }

    #[test]
    fn fixed_table_wins_first() {
        let mut r = resolver();
        assert_eq!(r.resolve("CCTV1"), "CCTV-1综合");
        assert_eq!(r.resolve("央视新闻"), "CCTV-13新闻");
    }

    #[test]
    fn numeric_rule_covers_unlisted_spellings() {
        let mut r = resolver();
        assert_eq!(r.resolve("CCTV 13"), "CCTV-13新闻");
        assert_eq!(r.resolve("cctv-6"), "CCTV-6电影");
        assert_eq!(r.resolve("CCTV1高清"), "CCTV-1综合");
    }

    #[test]
    fn out_of_range_ordinal_passes_through() {
        let mut r = resolver();
        // No label for 99; falls through to the fallback tier.
        assert_eq!(r.resolve("CCTV99"), "CCTV99");
        assert_eq!(r.into_store().unresolved_count(), 1);
    }

    #[test]
    fn province_alias_substring_match() {
        let mut r = resolver();
        assert_eq!(r.resolve("山东卫视测试频道"), "山东卫视");
        assert_eq!(r.resolve("芒果台"), "湖南卫视");
        assert_eq!(r.resolve("上海卫视"), "东方卫视");
        // Hyphen and case insensitive
        assert_eq!(r.resolve("山东-卫视"), "山东卫视");
    }

    #[test]
    fn learned_tier_beats_rules_but_not_fixed() {
        let mut store = AliasStore::in_memory();
        store.note_unresolved("翡翠台");
        // Simulate an externally corrected learned entry by flushing in
        // memory: note_unresolved + flush maps it to itself.
        store.flush().unwrap();
        let mut r = IdentityResolver::new(store);
        assert_eq!(r.resolve("翡翠台"), "翡翠台");
        // Fixed tier still wins for names it covers.
        assert_eq!(r.resolve("CCTV1"), "CCTV-1综合");
    }

    #[test]
    fn empty_input_resolves_to_sentinel() {
        let mut r = resolver();
        assert_eq!(r.resolve(""), UNKNOWN_IDENTITY);
        assert_eq!(r.resolve("   "), UNKNOWN_IDENTITY);
        assert_eq!(r.resolve("⭐⭐"), UNKNOWN_IDENTITY);
    }

    #[test]
    fn fallback_accumulates_unresolved() {
        let mut r = resolver();
        assert_eq!(r.resolve("XYZ-9"), "XYZ-9");
        assert_eq!(r.resolve("XYZ-9"), "XYZ-9");
        // Accumulated once, set-deduplicated.
        assert_eq!(r.into_store().unresolved_count(), 1);
    }
}
