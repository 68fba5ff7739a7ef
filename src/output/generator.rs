//! Playlist generation
//!
//! Renders curated records into playlist text and writes the per-category,
//! summary and flagged files. Every record is a two-line pair: an `#EXTINF`
//! header carrying the corrected name, icon URL and group label, followed by
//! the stream URL.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::info;

use crate::classify::Category;
use crate::config::IconConfig;
use crate::errors::CuratorResult;
use crate::ingestor::PLAYLIST_MARKER;
use crate::merge::MergedPlaylist;
use crate::models::ChannelRecord;

/// Characters allowed in an icon file name: word characters (covers CJK),
/// hyphens and underscores. Everything else would break the icon path.
fn unsafe_icon_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\-]").expect("valid icon-name pattern"))
}

pub struct PlaylistGenerator {
    icons: IconConfig,
    output_dir: PathBuf,
}

impl PlaylistGenerator {
    pub fn new(icons: IconConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            icons,
            output_dir: output_dir.into(),
        }
    }

    /// Flatten the merged playlist into the combined record stream: categories
    /// in enumeration order, channels in display order, URLs in bucket order.
    pub fn build_records(&self, merged: &MergedPlaylist) -> Vec<ChannelRecord> {
        let mut records = Vec::with_capacity(merged.url_count());

        for category in Category::ALL {
            for identity in merged.ordered_channels(category) {
                let logo_url = self.icon_url(identity);
                for url in merged.urls(category, identity) {
                    records.push(ChannelRecord {
                        identity: identity.to_string(),
                        category,
                        logo_url: logo_url.clone(),
                        url: url.clone(),
                    });
                }
            }
        }

        records
    }

    /// Icon URL for a canonical identity: the name reduced to a constrained
    /// character set and truncated, appended to the icon base path. An
    /// identity with no usable characters yields an empty URL.
    pub fn icon_url(&self, identity: &str) -> String {
        let safe: String = unsafe_icon_chars().replace_all(identity, "").to_string();
        let safe: String = safe.chars().take(self.icons.max_name_chars).collect();
        if safe.is_empty() {
            return String::new();
        }
        format!("{}{}{}", self.icons.base_url, safe, self.icons.extension)
    }

    /// Render records as playlist text: the marker line, then one
    /// header/URL pair per record.
    pub fn render(records: &[ChannelRecord]) -> String {
        let mut out = String::from(PLAYLIST_MARKER);
        out.push('\n');
        for record in records {
            // Quote characters would break the header's field syntax.
            let name = record.identity.replace('"', "");
            out.push_str(&format!(
                "#EXTINF:-1 tvg-name=\"{}\" tvg-logo=\"{}\" group-title=\"{}\",{}\n",
                name,
                record.logo_url,
                record.category.label(),
                name
            ));
            out.push_str(&record.url);
            out.push('\n');
        }
        out
    }

    /// Write one file per category, the combined summary and the flagged
    /// playlist. Returns the paths written.
    pub fn write_outputs(
        &self,
        clean: &[ChannelRecord],
        flagged: &[ChannelRecord],
    ) -> CuratorResult<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output_dir)?;
        let mut written = Vec::new();

        for category in Category::ALL {
            let records: Vec<ChannelRecord> = clean
                .iter()
                .filter(|r| r.category == category)
                .cloned()
                .collect();
            let path = self.output_dir.join(format!("{}.m3u", category.label()));
            std::fs::write(&path, Self::render(&records))?;
            written.push(path);
        }

        let summary_path = self.output_dir.join("summary.m3u");
        std::fs::write(&summary_path, Self::render(clean))?;
        written.push(summary_path);

        let flagged_path = self.output_dir.join("flagged.m3u");
        std::fs::write(&flagged_path, Self::render(flagged))?;
        written.push(flagged_path);

        info!(
            "Wrote {} playlist files to {} ({} records, {} flagged)",
            written.len(),
            self.output_dir.display(),
            clean.len(),
            flagged.len()
        );
        Ok(written)
    }

    /// Write a mirrored source (post gateway-rewrite) as a side artifact.
    pub fn write_side_artifact(path: &Path, lines: &[String]) -> CuratorResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut contents = lines.join("\n");
        contents.push('\n');
        std::fs::write(path, contents)?;
        Ok(())
    }
}
