//! Display-name → canonical identity mapping: the fixed alias tier, the
//! rule-based matchers and the persisted learned tier.

pub mod engine;
pub mod store;
pub mod tables;

pub use engine::{IdentityResolver, UNKNOWN_IDENTITY};
pub use store::AliasStore;
