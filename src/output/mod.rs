//! Output stage: blacklist partitioning and playlist file generation.

pub mod filter;
pub mod generator;

pub use filter::partition;
pub use generator::PlaylistGenerator;
