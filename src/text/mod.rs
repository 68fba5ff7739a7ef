//! Text cleanup passes shared by title extraction and identity resolution
//!
//! Playlist headers collected in the wild carry control characters, emoji,
//! decorative symbols and inconsistent spacing. The passes in this module are
//! independent and composable, and `clean` is idempotent: cleaning an already
//! clean string is a no-op.

use regex::Regex;
use std::sync::OnceLock;

/// Unicode control and format characters (general category C*).
fn control_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\p{C}").expect("valid control-char pattern"))
}

/// Unicode symbol characters (general category S*), which covers emoji,
/// pictographs, currency and math signs.
fn symbol_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\p{S}").expect("valid symbol-char pattern"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

/// Quality suffixes appended to channel names by upstream playlists.
/// Matched as whole tokens only so that names merely containing these
/// letters inside a longer token survive intact.
fn quality_suffixes() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(高清|标清|超清|HD|4K|8K)\b").expect("valid quality-suffix pattern")
    })
}

/// General punctuation, supplemental punctuation and the BOM; these survive
/// the category passes but have no business in a channel name.
fn separator_codepoints() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[\u{2000}-\u{206F}\u{2E00}-\u{2E7F}\u{FEFF}]")
            .expect("valid separator pattern")
    })
}

/// Remove control/format characters, remove symbol characters, then collapse
/// whitespace runs to a single space and trim the ends.
pub fn clean(text: &str) -> String {
    let stripped = control_chars().replace_all(text, "");
    let stripped = symbol_chars().replace_all(&stripped, "");
    collapse_whitespace(&stripped)
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    whitespace_runs().replace_all(text, " ").trim().to_string()
}

/// Remove whole-token quality suffixes such as `高清`, `HD` or `4K`.
pub fn strip_quality_suffixes(name: &str) -> String {
    quality_suffixes().replace_all(name, "").to_string()
}

/// Remove the fixed set of Unicode separator/formatting codepoints.
pub fn strip_separator_codepoints(name: &str) -> String {
    separator_codepoints().replace_all(name, "").to_string()
}
