//! Cache Module
//!
//! Provides an in-memory prediction cache bounded by entry count and total
//! bytes, with LRU eviction.

mod entry;
mod guard;
mod lru;
mod size;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, CacheKey};
pub use guard::SharedStore;
pub use lru::LruTracker;
pub use size::{estimate, SizeEstimate};
pub use stats::CacheStats;
pub use store::{CacheStore, SetOutcome};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
