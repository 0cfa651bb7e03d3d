//! Bounded TTL cache of retrieved evidence, keyed by concept

use super::document::EvidenceDocument;
use moka::sync::Cache;
use std::time::Duration;
use tracing::debug;

/// Bounded cache in front of the knowledge source.
///
/// Only successful resolutions are cached; misses go back to the network so a
/// transiently missing page is not pinned as absent for the TTL.
#[derive(Clone)]
pub struct EvidenceCache {
    entries: Cache<String, EvidenceDocument>,
}

impl EvidenceCache {
    /// Create a cache holding at most `capacity` documents for `ttl` each.
    pub fn new(ttl: Duration, capacity: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        Self { entries }
    }

    pub fn get(&self, concept: &str) -> Option<EvidenceDocument> {
        let hit = self.entries.get(concept);
        if hit.is_some() {
            debug!(concept, "evidence cache hit");
        }
        hit
    }

    pub fn insert(&self, document: EvidenceDocument) {
        self.entries.insert(document.concept.clone(), document);
    }

    /// Number of cached documents.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(concept: &str) -> EvidenceDocument {
        EvidenceDocument::new(concept, concept, "un texte encyclopédique", 5000)
    }

    #[test]
    fn test_round_trip() {
        let cache = EvidenceCache::new(Duration::from_secs(60), 16);
        cache.insert(doc("soleil"));

        let hit = cache.get("soleil").unwrap();
        assert_eq!(hit.concept, "soleil");
        assert!(cache.get("lune").is_none());
    }

    #[test]
    fn test_entries_expire() {
        let cache = EvidenceCache::new(Duration::from_millis(10), 16);
        cache.insert(doc("soleil"));
        std::thread::sleep(Duration::from_millis(30));
        assert!(cache.get("soleil").is_none());
    }

    #[test]
    fn test_capacity_is_bounded() {
        let cache = EvidenceCache::new(Duration::from_secs(60), 2);
        cache.insert(doc("soleil"));
        cache.insert(doc("lune"));
        cache.insert(doc("terre"));
        assert!(cache.len() <= 2);
    }
}
