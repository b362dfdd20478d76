//! TTL-bounded result cache keyed by normalized (start, end) pairs.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use tracing::debug;

use crate::strategy::RouteOption;
use crate::traits::Clock;

/// Default freshness window for cached result sets.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Normalized, order-sensitive cache key for an address pair.
///
/// Case-folded and whitespace-trimmed; the separator is not expected to
/// occur in address text.
pub fn normalize_key(start: &str, end: &str) -> String {
    format!(
        "{}::{}",
        start.trim().to_lowercase(),
        end.trim().to_lowercase()
    )
}

struct CacheEntry {
    routes: Vec<RouteOption>,
    created_at: SystemTime,
}

/// In-memory store of finished result sets.
///
/// Freshness is evaluated at lookup time; expired entries are treated as
/// absent and overwritten on the next `put`. The internal map is the only
/// shared mutable state in the engine, guarded by a single mutex. No
/// capacity bound: the contract specifies freshness only.
pub struct ResultCache<C: Clock> {
    ttl: Duration,
    clock: C,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl<C: Clock> ResultCache<C> {
    pub fn new(ttl: Duration, clock: C) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached result set, or `None` when the key is absent or
    /// its entry has aged past the TTL.
    pub fn get(&self, start: &str, end: &str) -> Option<Vec<RouteOption>> {
        let key = normalize_key(start, end);
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(&key)?;

        let age = self
            .clock
            .now()
            .duration_since(entry.created_at)
            .unwrap_or(Duration::ZERO);
        if age >= self.ttl {
            debug!("cache entry expired for {}", key);
            return None;
        }

        debug!("cache hit for {}", key);
        Some(entry.routes.clone())
    }

    /// Stores a freshly timestamped entry, replacing any prior one.
    pub fn put(&self, start: &str, end: &str, routes: Vec<RouteOption>) {
        let key = normalize_key(start, end);
        let entry = CacheEntry {
            routes,
            created_at: self.clock.now(),
        };
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, entry);
        }
    }
}
