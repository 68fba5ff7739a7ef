//! Playlist source ingestion
//!
//! Turns raw playlist line sequences into [`RawEntry`] records and extracts a
//! cleaned display name from each `#EXTINF` header. Gateway-rewritable
//! sources additionally get their private multicast relay URLs rewritten to
//! the configured gateway before pairing.

use regex::Regex;
use std::sync::OnceLock;

use tracing::debug;

use crate::models::{Provenance, RawEntry};
use crate::text;

/// First line of every playlist file.
pub const PLAYLIST_MARKER: &str = "#EXTM3U";

/// Prefix that marks an entry header line.
pub const ENTRY_PREFIX: &str = "#EXTINF";

/// `tvg-*="..."` and `group-title="..."` attributes already present in a
/// header; stripped before name extraction so they are never mistaken for the
/// display name.
fn inline_attributes() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?:tvg-[A-Za-z0-9_-]+|group-title)="[^"]*""#)
            .expect("valid attribute pattern")
    })
}

fn comma_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",+").expect("valid comma pattern"))
}

fn extinf_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*#EXTINF[^,]*,?").expect("valid prefix pattern"))
}

fn tvg_name_attribute() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"tvg-name="([^"]+)""#).expect("valid tvg-name pattern"))
}

/// `http://<dotted-quad>:<port>/rtp/...` — the private multicast relay shape.
fn private_rtp_url() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^http://(?:\d{1,3}\.){3}\d{1,3}:\d+(/rtp/.*)$").expect("valid rtp pattern")
    })
}

/// Extract a cleaned display name from an `#EXTINF` header line.
///
/// The name is conventionally everything after the last comma; headers
/// without one fall back to an explicit `tvg-name` attribute and then to the
/// bare remainder of the line. The result is never empty: names that clean
/// down to nothing yield the `unknown` sentinel.
pub fn extract_title(header: &str) -> String {
    let stripped = inline_attributes().replace_all(header, "");
    let stripped = comma_runs().replace_all(&stripped, ",");

    let candidate = if let Some(pos) = stripped.rfind(',') {
        stripped[pos + 1..].trim().to_string()
    } else if let Some(caps) = tvg_name_attribute().captures(header) {
        caps[1].trim().to_string()
    } else {
        extinf_prefix().replace(&stripped, "").trim().to_string()
    };

    // Unwrap a single pair of quotes so quoted names survive intact.
    let candidate = candidate
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(&candidate);

    let mut name = text::clean(candidate);
    name = text::strip_quality_suffixes(&name);
    name = text::strip_separator_codepoints(&name);
    name = text::collapse_whitespace(&name);

    if !name.is_empty() {
        return name;
    }

    // Last resort: clean the raw remainder of the header line.
    let remainder = extinf_prefix().replace(header, "");
    let name = text::clean(&remainder);
    if name.is_empty() {
        crate::mapping::UNKNOWN_IDENTITY.to_string()
    } else {
        name
    }
}

/// Scan header/URL line pairs into entries. A header whose following line is
/// missing, empty or another comment is malformed and silently dropped.
pub fn ingest(lines: &[String], provenance: Provenance) -> Vec<RawEntry> {
    let mut entries = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        if !line.starts_with(ENTRY_PREFIX) {
            i += 1;
            continue;
        }

        match lines.get(i + 1).map(|l| l.trim()) {
            Some(url) if !url.is_empty() && !url.starts_with('#') => {
                entries.push(RawEntry {
                    header: line.to_string(),
                    url: url.to_string(),
                    provenance,
                });
                i += 2;
            }
            _ => {
                debug!("Dropping malformed entry with no URL line: {}", line);
                i += 1;
            }
        }
    }

    entries
}

/// Rewrites private multicast relay URLs to a configured gateway host/port.
pub struct GatewayRewriter {
    host: String,
    port: u16,
}

impl GatewayRewriter {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Rewrite one URL line; URLs not matching the private relay pattern pass
    /// through unchanged.
    pub fn rewrite_url(&self, url: &str) -> String {
        match private_rtp_url().captures(url) {
            Some(caps) => format!("http://{}:{}{}", self.host, self.port, &caps[1]),
            None => url.to_string(),
        }
    }

    /// Rewrite a whole source, URL lines rewritten and everything else echoed
    /// verbatim, preserving the source for mirroring to a side file.
    pub fn rewrite_lines(&self, lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .map(|line| {
                if line.starts_with("http://") || line.starts_with("https://") {
                    self.rewrite_url(line)
                } else {
                    line.clone()
                }
            })
            .collect()
    }
}
