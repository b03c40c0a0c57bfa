//! Cache module for API responses and the access token
//!
//! Entries carry an absolute expiry timestamp. Reads return expired entries
//! flagged with `is_expired`, so freshness is decided by the caller.

mod store;

pub use store::{CacheStore, CachedData, MemoryCache};
