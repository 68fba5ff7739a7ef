//! Playlist source fetching
//!
//! Sources are plain line-oriented texts living behind an HTTP URL or a local
//! path. The merge stage concatenates every location named in the source list
//! into one combined playlist, skipping unavailable sources with a warning —
//! one dead source must never abort a run.

use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use url::Url;

use tracing::{info, warn};

use crate::errors::{CuratorResult, SourceError};
use crate::ingestor::PLAYLIST_MARKER;

pub struct SourceFetcher {
    client: Client,
}

impl SourceFetcher {
    pub fn new(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("m3u-curator/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Fetch a source as text, over HTTP for URLs and from disk otherwise.
    pub async fn fetch_text(&self, location: &str) -> CuratorResult<String> {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::Http {
                        status: status.as_u16(),
                        url: location.to_string(),
                    }
                    .into());
                }
                Ok(response.text().await?)
            }
            Ok(url) if url.scheme() == "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| SourceError::invalid_location(location, "not a file path"))?;
                Ok(std::fs::read_to_string(path)?)
            }
            _ => std::fs::read_to_string(location)
                .map_err(|e| SourceError::unavailable(location, e.to_string()).into()),
        }
    }

    /// Fetch a source as a line sequence.
    pub async fn fetch_lines(&self, location: &str) -> CuratorResult<Vec<String>> {
        Ok(self
            .fetch_text(location)
            .await?
            .lines()
            .map(str::to_string)
            .collect())
    }

    /// Concatenate every location in the source list into one combined
    /// playlist. Nested playlist markers are dropped so the output carries a
    /// single leading marker. Returns the number of sources merged.
    pub async fn merge_source_list(
        &self,
        source_list: &Path,
        output: &Path,
    ) -> CuratorResult<usize> {
        let list = std::fs::read_to_string(source_list)?;
        let mut merged = String::from(PLAYLIST_MARKER);
        merged.push('\n');
        let mut count = 0usize;

        for location in list.lines() {
            let location = location.trim();
            if location.is_empty() || location.starts_with('#') {
                continue;
            }

            info!("Fetching source: {}", location);
            match self.fetch_text(location).await {
                Ok(text) => {
                    for line in text.lines() {
                        if line.trim().starts_with(PLAYLIST_MARKER) {
                            continue;
                        }
                        merged.push_str(line);
                        merged.push('\n');
                    }
                    count += 1;
                }
                Err(e) => {
                    warn!("Skipping unavailable source {}: {}", location, e);
                }
            }
        }

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output, merged)?;
        info!("Merged {} sources into {}", count, output.display());
        Ok(count)
    }
}
