//! Source acquisition: fetching playlist texts and probing stream liveness.
//!
//! Everything here runs before the core pipeline; the core itself only ever
//! sees fully materialized line sequences.

pub mod fetch;
pub mod probe;

pub use fetch::SourceFetcher;
pub use probe::StreamProber;
