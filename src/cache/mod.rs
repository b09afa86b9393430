//! In-memory response cache with time-based expiry
//!
//! This module provides a key/value store for raw API response bodies. Entries
//! expire after a fixed interval unless they are read, and a background reaper
//! task reclaims stale entries on the same period.

mod ttl;

pub use ttl::{CacheError, TtlCache};
