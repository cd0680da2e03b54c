//! Session memory - consecutive wrong answers per (user, item) within a
//! rolling window, kept apart from the item's persisted counters.
//!
//! Entries idle longer than the TTL are treated as absent on the next answer
//! and removed by [`SessionMemory::evict_expired`]. Updates and eviction go
//! through the same lock, so a sweep never drops a concurrent update.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMemoryEntry {
    pub consecutive_incorrect_in_session: u32,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMemoryStats {
    pub total_entries: usize,
    pub entries_by_user: HashMap<String, usize>,
}

pub trait SessionMemory: Send + Sync {
    /// Applies one answer and returns the post-update wrong streak.
    fn record_answer_at(
        &self,
        user_id: &str,
        item_id: &str,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> u32;

    fn record_answer(&self, user_id: &str, item_id: &str, is_correct: bool) -> u32 {
        self.record_answer_at(user_id, item_id, is_correct, Utc::now())
    }

    /// Returns the number of entries removed.
    fn clear_for_user(&self, user_id: &str) -> usize;

    fn clear_all(&self);

    fn stats(&self) -> SessionMemoryStats;

    /// Removes entries idle longer than the TTL and returns how many went.
    fn evict_expired(&self, now: DateTime<Utc>) -> usize;
}

pub struct InMemorySessionStore {
    users: Mutex<HashMap<String, HashMap<String, SessionMemoryEntry>>>,
    ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_ttl(Duration::hours(DEFAULT_SESSION_TTL_HOURS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn entry(&self, user_id: &str, item_id: &str) -> Option<SessionMemoryEntry> {
        self.users
            .lock()
            .get(user_id)
            .and_then(|items| items.get(item_id))
            .copied()
    }

    fn is_expired(&self, entry: &SessionMemoryEntry, now: DateTime<Utc>) -> bool {
        now - entry.last_updated > self.ttl
    }
}

impl SessionMemory for InMemorySessionStore {
    fn record_answer_at(
        &self,
        user_id: &str,
        item_id: &str,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> u32 {
        let mut users = self.users.lock();
        let entry = users
            .entry(user_id.to_string())
            .or_default()
            .entry(item_id.to_string())
            .or_insert(SessionMemoryEntry {
                consecutive_incorrect_in_session: 0,
                last_updated: now,
            });

        if self.is_expired(entry, now) {
            entry.consecutive_incorrect_in_session = 0;
        }

        entry.consecutive_incorrect_in_session = if is_correct {
            0
        } else {
            entry.consecutive_incorrect_in_session.saturating_add(1)
        };
        entry.last_updated = now;
        entry.consecutive_incorrect_in_session
    }

    fn clear_for_user(&self, user_id: &str) -> usize {
        self.users
            .lock()
            .remove(user_id)
            .map(|items| items.len())
            .unwrap_or(0)
    }

    fn clear_all(&self) {
        self.users.lock().clear();
    }

    fn stats(&self) -> SessionMemoryStats {
        let users = self.users.lock();
        let entries_by_user: HashMap<String, usize> = users
            .iter()
            .map(|(user_id, items)| (user_id.clone(), items.len()))
            .collect();
        SessionMemoryStats {
            total_entries: entries_by_user.values().sum(),
            entries_by_user,
        }
    }

    fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let mut users = self.users.lock();
        let mut removed = 0;
        users.retain(|_, items| {
            let before = items.len();
            items.retain(|_, entry| !self.is_expired(entry, now));
            removed += before - items.len();
            !items.is_empty()
        });
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_counts_and_resets() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.record_answer_at("u1", "w1", false, now()), 1);
        assert_eq!(store.record_answer_at("u1", "w1", false, now()), 2);
        assert_eq!(store.record_answer_at("u1", "w1", false, now()), 3);
        assert_eq!(store.record_answer_at("u1", "w1", true, now()), 0);
        assert_eq!(store.record_answer_at("u1", "w1", false, now()), 1);
    }

    #[test]
    fn test_first_correct_creates_zero_entry() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.record_answer_at("u1", "w1", true, now()), 0);
        let entry = store.entry("u1", "w1").unwrap();
        assert_eq!(entry.consecutive_incorrect_in_session, 0);
        assert_eq!(entry.last_updated, now());
    }

    #[test]
    fn test_keys_are_isolated() {
        let store = InMemorySessionStore::new();
        store.record_answer_at("a", "x", false, now());
        store.record_answer_at("a", "x", false, now());
        assert_eq!(store.record_answer_at("a", "y", false, now()), 1);
        assert_eq!(store.record_answer_at("b", "x", false, now()), 1);
    }

    #[test]
    fn test_stale_entry_restarts_count() {
        let store = InMemorySessionStore::new();
        store.record_answer_at("u1", "w1", false, now());
        let later = now() + Duration::hours(25);
        assert_eq!(store.record_answer_at("u1", "w1", false, later), 1);

        let soon = later + Duration::hours(23);
        assert_eq!(store.record_answer_at("u1", "w1", false, soon), 2);
    }

    #[test]
    fn test_evict_expired_removes_idle_entries() {
        let store = InMemorySessionStore::new();
        store.record_answer_at("u1", "old", false, now());
        store.record_answer_at("u2", "old", false, now());
        store.record_answer_at("u1", "fresh", false, now() + Duration::hours(20));

        let removed = store.evict_expired(now() + Duration::hours(25));
        assert_eq!(removed, 2);

        let stats = store.stats();
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.entries_by_user.get("u1"), Some(&1));
        assert!(!stats.entries_by_user.contains_key("u2"));
    }

    #[test]
    fn test_clear_for_user_and_all() {
        let store = InMemorySessionStore::new();
        store.record_answer_at("u1", "w1", false, now());
        store.record_answer_at("u1", "w2", false, now());
        store.record_answer_at("u2", "w1", false, now());

        assert_eq!(store.clear_for_user("u1"), 2);
        assert_eq!(store.clear_for_user("missing"), 0);
        assert_eq!(store.stats().total_entries, 1);

        store.clear_all();
        assert_eq!(store.stats(), SessionMemoryStats::default());
    }

    #[test]
    fn test_custom_ttl() {
        let store = InMemorySessionStore::with_ttl(Duration::minutes(30));
        store.record_answer_at("u1", "w1", false, now());
        assert_eq!(store.evict_expired(now() + Duration::minutes(29)), 0);
        assert_eq!(store.evict_expired(now() + Duration::minutes(31)), 1);
    }
}
