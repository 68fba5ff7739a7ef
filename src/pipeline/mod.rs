//! Curation pipeline orchestration
//!
//! Gathers the configured sources, then runs the core pipeline over their
//! materialized line sequences: gateway rewrite, ingestion, identity
//! resolution, classification, merge/order, blacklist partition, file
//! generation and the learned-alias flush. Per-source failures are warnings;
//! the run aborts only when no source yielded any entry at all.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::errors::{CuratorError, CuratorResult};
use crate::ingestor::{self, GatewayRewriter};
use crate::mapping::{AliasStore, IdentityResolver};
use crate::merge;
use crate::models::{Provenance, RawEntry};
use crate::output::{self, PlaylistGenerator};
use crate::sources::SourceFetcher;

/// Outcome summary of one curation run.
#[derive(Debug)]
pub struct CurationReport {
    pub channels: usize,
    pub records: usize,
    pub flagged: usize,
    pub unresolved: usize,
    pub files: Vec<PathBuf>,
}

pub struct Curator {
    config: Config,
}

impl Curator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetch the configured sources and curate them.
    pub async fn run(&self) -> CuratorResult<CurationReport> {
        let fetcher = SourceFetcher::new(self.config.sources.fetch_timeout_secs);

        let multicast = match fetcher
            .fetch_lines(&self.config.sources.custom_multicast_url)
            .await
        {
            Ok(lines) => Some(lines),
            Err(e) => {
                warn!(
                    "Custom multicast source unavailable, continuing without it: {}",
                    e
                );
                None
            }
        };

        let custom_http = match fetcher
            .fetch_lines(&self.config.sources.custom_http_url)
            .await
        {
            Ok(lines) => Some(lines),
            Err(e) => {
                warn!("Custom HTTP source unavailable, continuing without it: {}", e);
                None
            }
        };

        let working_path = &self.config.sources.working_playlist;
        let validated = match std::fs::read_to_string(working_path) {
            Ok(text) => Some(text.lines().map(str::to_string).collect()),
            Err(e) => {
                warn!(
                    "Validated playlist {} unavailable, continuing without it: {}",
                    working_path.display(),
                    e
                );
                None
            }
        };

        self.curate_sources(multicast, custom_http, validated)
    }

    /// The core pipeline over already materialized sources. Synchronous and
    /// free of network I/O; callers supply whichever sources they have.
    pub fn curate_sources(
        &self,
        multicast: Option<Vec<String>>,
        custom_http: Option<Vec<String>>,
        validated: Option<Vec<String>>,
    ) -> CuratorResult<CurationReport> {
        // Concatenation in provenance precedence order; bucket positions
        // downstream depend on it.
        let mut entries: Vec<RawEntry> = Vec::new();

        if let Some(lines) = multicast {
            let rewriter =
                GatewayRewriter::new(self.config.gateway.host.clone(), self.config.gateway.port);
            let rewritten = rewriter.rewrite_lines(&lines);
            PlaylistGenerator::write_side_artifact(
                &self.config.output.rewritten_multicast,
                &rewritten,
            )?;
            entries.extend(ingestor::ingest(&rewritten, Provenance::CustomMulticast));
        }

        if let Some(lines) = custom_http {
            entries.extend(ingestor::ingest(&lines, Provenance::CustomHttp));
        }

        if let Some(lines) = validated {
            entries.extend(ingestor::ingest(&lines, Provenance::Validated));
        }

        if entries.is_empty() {
            return Err(CuratorError::NoUsableSource);
        }
        info!("Ingested {} entries across all sources", entries.len());

        let store = AliasStore::load(&self.config.store.path);
        let mut resolver = IdentityResolver::new(store);
        let merged = merge::merge(entries, &mut resolver);

        let generator =
            PlaylistGenerator::new(self.config.icons.clone(), self.config.output.dir.clone());
        let records = generator.build_records(&merged);
        let (clean, flagged) = output::partition(records, &self.config.blacklist.domains);
        let files = generator.write_outputs(&clean, &flagged)?;

        let mut store = resolver.into_store();
        let unresolved = store.unresolved_count();
        if let Err(e) = store.flush() {
            // Persistence trouble never aborts a finished run.
            warn!("Failed to persist learned aliases: {}", e);
        }

        Ok(CurationReport {
            channels: merged.channel_count(),
            records: clean.len(),
            flagged: flagged.len(),
            unresolved,
            files,
        })
    }
}
