//! Latest result per browser tab.
//!
//! Analyses for the same tab may overlap; the cache keeps whichever result
//! came from the most recent observation, regardless of arrival order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::output::badge::Badge;
use crate::scoring::ScoreResult;

pub type TabId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResult {
    pub observed_at_epoch_millis: i64,
    pub result: ScoreResult,
    pub badge: Badge,
    /// SHA-256 of the result, used to skip redundant repaints.
    pub digest: String,
}

/// Outcome of [`TabCache::record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheUpdate {
    /// First result for the tab.
    Inserted,
    /// Newer observation with a different result.
    Replaced,
    /// Newer observation, identical result.
    Unchanged,
    /// Observation older than the cached one; discarded.
    Stale,
}

impl CacheUpdate {
    /// Whether the presentation layer needs to repaint.
    pub fn needs_repaint(&self) -> bool {
        matches!(self, Self::Inserted | Self::Replaced)
    }
}

#[derive(Debug, Default)]
pub struct TabCache {
    entries: HashMap<TabId, CachedResult>,
}

impl TabCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `result` for `tab` unless a newer observation is already
    /// cached. Equal timestamps replace, so the later call wins.
    pub fn record(
        &mut self,
        tab: TabId,
        observed_at_epoch_millis: i64,
        result: ScoreResult,
    ) -> Result<CacheUpdate> {
        let digest = result.digest()?;
        let update = match self.entries.get(&tab) {
            None => CacheUpdate::Inserted,
            Some(existing) if existing.observed_at_epoch_millis > observed_at_epoch_millis => {
                tracing::debug!(
                    tab,
                    cached = existing.observed_at_epoch_millis,
                    incoming = observed_at_epoch_millis,
                    "discarding stale result"
                );
                return Ok(CacheUpdate::Stale);
            }
            Some(existing) if existing.digest == digest => CacheUpdate::Unchanged,
            Some(_) => CacheUpdate::Replaced,
        };

        let badge = Badge::for_score(result.score);
        self.entries.insert(
            tab,
            CachedResult {
                observed_at_epoch_millis,
                result,
                badge,
                digest,
            },
        );
        Ok(update)
    }

    pub fn get(&self, tab: TabId) -> Option<&CachedResult> {
        self.entries.get(&tab)
    }

    /// Drop the entry for a closed tab.
    pub fn evict(&mut self, tab: TabId) -> Option<CachedResult> {
        self.entries.remove(&tab)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
