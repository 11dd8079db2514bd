use crate::types::activity::ActivitySummary;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// In-memory activity store. Owns the durable identifiers; the parser never
/// sees them.
#[derive(Clone)]
pub struct AppState {
    activities: Arc<DashMap<String, StoredActivity>>,
}

struct StoredActivity {
    summary: ActivitySummary,
    inserted_at: Instant,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            activities: Arc::new(DashMap::new()),
        }
    }

    pub fn insert(&self, activity_id: String, summary: ActivitySummary) {
        self.activities.insert(
            activity_id,
            StoredActivity {
                summary,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn remove(&self, activity_id: &str) -> Option<ActivitySummary> {
        self.activities
            .remove(activity_id)
            .map(|(_, stored)| stored.summary)
    }

    pub fn get(&self, activity_id: &str) -> Option<ActivitySummary> {
        self.activities
            .get(activity_id)
            .map(|entry| entry.summary.clone())
    }

    /// All stored activities, most recent start first.
    pub fn list(&self) -> Vec<(String, ActivitySummary)> {
        let mut all: Vec<(String, ActivitySummary)> = self
            .activities
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().summary.clone()))
            .collect();
        all.sort_by(|a, b| b.1.start_time.cmp(&a.1.start_time));
        all
    }

    pub fn evict_expired(&self, ttl: Duration) {
        let now = Instant::now();
        self.activities
            .retain(|_, stored| now.duration_since(stored.inserted_at) < ttl);
        tracing::info!(
            "Store eviction complete. Current size: {}",
            self.activities.len()
        );
    }
}
