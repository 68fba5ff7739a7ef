pub mod types;

pub use types::{CuratorError, CuratorResult, SourceError};
