//! Per-domain memoization of generated datasets with a time-based expiry.

use crate::dataset::{DomainDataset, SeriesWindow, generate};
use crate::domain::Domain;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct CachedDataset {
    dataset: Arc<DomainDataset>,
    /// `None` when the TTL reaches past what `Instant` can represent
    expires_at: Option<Instant>,
}

/// Bounded in-memory cache (LRU) of datasets keyed by domain
pub struct DatasetCache {
    entries: LruCache<Domain, CachedDataset>,
    ttl: Duration,
    window: SeriesWindow,
}

impl DatasetCache {
    pub fn new(window: SeriesWindow, ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
            ttl,
            window,
        }
    }

    pub fn window(&self) -> &SeriesWindow {
        &self.window
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the cached dataset, regenerating it when missing or expired
    pub fn get(&mut self, domain: Domain) -> Arc<DomainDataset> {
        self.get_at(domain, Instant::now())
    }

    /// Same as [`DatasetCache::get`] with an explicit clock reading
    pub fn get_at(&mut self, domain: Domain, now: Instant) -> Arc<DomainDataset> {
        if let Some(entry) = self.entries.get(&domain) {
            if entry.expires_at.is_none_or(|at| now < at) {
                return Arc::clone(&entry.dataset);
            }
            tracing::debug!(domain = domain.key(), "cached dataset expired");
        }

        let dataset = Arc::new(generate(domain, &self.window));
        self.entries.put(
            domain,
            CachedDataset {
                dataset: Arc::clone(&dataset),
                expires_at: now.checked_add(self.ttl),
            },
        );
        dataset
    }

    pub fn invalidate(&mut self, domain: Domain) {
        self.entries.pop(&domain);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(ttl_secs: u64) -> DatasetCache {
        DatasetCache::new(SeriesWindow::default(), Duration::from_secs(ttl_secs), 4)
    }

    #[test]
    fn hit_within_ttl_shares_allocation() {
        let mut cache = cache(3600);
        let t0 = Instant::now();
        let first = cache.get_at(Domain::Semiconductors, t0);
        let second = cache.get_at(Domain::Semiconductors, t0 + Duration::from_secs(10));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn expired_entry_is_regenerated_identically() {
        let mut cache = cache(60);
        let t0 = Instant::now();
        let first = cache.get_at(Domain::GeneEngineering, t0);
        let second = cache.get_at(Domain::GeneEngineering, t0 + Duration::from_secs(61));
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn domains_cached_independently() {
        let mut cache = cache(3600);
        let semi = cache.get(Domain::Semiconductors);
        let gene = cache.get(Domain::GeneEngineering);
        assert_ne!(semi.metrics.trend_score, gene.metrics.trend_score);
        assert_eq!(cache.len(), 2);

        cache.invalidate(Domain::Semiconductors);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn unbounded_ttl_never_expires() {
        let mut cache = cache(u64::MAX);
        let t0 = Instant::now();
        let first = cache.get_at(Domain::Semiconductors, t0);
        let later = cache.get_at(Domain::Semiconductors, t0 + Duration::from_secs(86_400 * 365));
        assert!(Arc::ptr_eq(&first, &later));
    }

    #[test]
    fn zero_capacity_still_holds_one_entry() {
        let mut cache = DatasetCache::new(SeriesWindow::default(), Duration::from_secs(60), 0);
        cache.get(Domain::Semiconductors);
        cache.get(Domain::GeneEngineering);
        assert_eq!(cache.len(), 1);
    }
}
