use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::srs::SessionMemory;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SweepStats {
    pub expired_entries: usize,
    pub remaining_entries: usize,
    pub duration_secs: f64,
}

pub fn sweep_expired_sessions(store: &dyn SessionMemory, now: DateTime<Utc>) -> SweepStats {
    let start = Instant::now();
    debug!("Starting session memory sweep");

    let expired_entries = store.evict_expired(now);
    let remaining_entries = store.stats().total_entries;

    let stats = SweepStats {
        expired_entries,
        remaining_entries,
        duration_secs: start.elapsed().as_secs_f64(),
    };

    if stats.expired_entries > 0 {
        info!(
            expired_entries = stats.expired_entries,
            remaining_entries = stats.remaining_entries,
            duration_secs = format!("{:.4}", stats.duration_secs),
            "Session memory sweep completed"
        );
    }

    stats
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::srs::InMemorySessionStore;

    #[test]
    fn test_sweep_reports_counts() {
        let store = InMemorySessionStore::new();
        let t0 = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        store.record_answer_at("u1", "w1", false, t0);
        store.record_answer_at("u1", "w2", false, t0 + Duration::hours(10));

        let stats = sweep_expired_sessions(&store, t0 + Duration::hours(30));
        assert_eq!(stats.expired_entries, 1);
        assert_eq!(stats.remaining_entries, 1);
    }
}
