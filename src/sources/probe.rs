//! Stream liveness probing
//!
//! Issues a HEAD request per HTTP entry of the combined playlist with a
//! bounded timeout; entries answering 200 survive into the working playlist.
//! Probing runs with bounded concurrency on an ordered stream, so surviving
//! entries keep their source order and the output stays deterministic.

use futures::StreamExt;
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::errors::CuratorResult;
use crate::ingestor::{self, PLAYLIST_MARKER};
use crate::models::Provenance;

pub struct StreamProber {
    client: Client,
    concurrency: usize,
}

impl StreamProber {
    pub fn new(timeout_secs: u64, concurrency: usize) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("m3u-curator/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            concurrency: concurrency.max(1),
        }
    }

    /// Keep the (header, url) pairs whose URL answers a HEAD request with
    /// 200. Non-HTTP entries cannot be probed and are dropped.
    pub async fn probe_entries(&self, entries: Vec<(String, String)>) -> Vec<(String, String)> {
        let total = entries.len();

        let results: Vec<Option<(String, String)>> = futures::stream::iter(entries)
            .map(|(header, url)| {
                let client = self.client.clone();
                async move {
                    if !url.starts_with("http") {
                        debug!("Skipping unprobeable URL: {}", url);
                        return None;
                    }
                    match client.head(&url).send().await {
                        Ok(response) if response.status() == StatusCode::OK => {
                            debug!("OK: {}", url);
                            Some((header, url))
                        }
                        Ok(response) => {
                            debug!("{}: {}", response.status(), url);
                            None
                        }
                        Err(e) => {
                            debug!("Failed: {} ({})", url, e);
                            None
                        }
                    }
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let alive: Vec<(String, String)> = results.into_iter().flatten().collect();
        info!("Probe finished: {} of {} entries alive", alive.len(), total);
        alive
    }

    /// Probe every entry of the input playlist and write the survivors to the
    /// working playlist. Returns the number of surviving entries.
    pub async fn check_playlist(&self, input: &Path, output: &Path) -> CuratorResult<usize> {
        let lines: Vec<String> = std::fs::read_to_string(input)?
            .lines()
            .map(str::to_string)
            .collect();

        let pairs: Vec<(String, String)> = ingestor::ingest(&lines, Provenance::Validated)
            .into_iter()
            .map(|entry| (entry.header, entry.url))
            .collect();

        let alive = self.probe_entries(pairs).await;

        let mut contents = String::from(PLAYLIST_MARKER);
        contents.push('\n');
        for (header, url) in &alive {
            contents.push_str(header);
            contents.push('\n');
            contents.push_str(url);
            contents.push('\n');
        }

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output, contents)?;
        info!(
            "Wrote {} working entries to {}",
            alive.len(),
            output.display()
        );
        Ok(alive.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn non_http_entries_are_dropped_without_probing() {
        let prober = StreamProber::new(1, 4);
        let alive = prober
            .probe_entries(vec![(
                "#EXTINF:-1,组播频道".to_string(),
                "rtp://239.1.1.1:5140".to_string(),
            )])
            .await;
        assert!(alive.is_empty());
    }
}
