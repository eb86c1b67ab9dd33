//! Per-card exclusive access.
//!
//! Card aggregates carry no locking of their own. Everything that loads, mutates
//! and saves a card runs inside the lock for that card's id, so two holds against
//! the same card can never interleave. Different cards never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use prepaid_core::CardId;

#[derive(Debug, Default)]
pub struct CardLocks {
    locks: Mutex<HashMap<CardId, Arc<Mutex<()>>>>,
}

impl CardLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the exclusive lock for `card_id`.
    pub fn with_card<T>(&self, card_id: CardId, f: impl FnOnce() -> T) -> T {
        let lock = self.lock_for(card_id);
        // Dropped after `_guard` (reverse declaration order), also on panic.
        let _release = Release {
            locks: self,
            card_id,
            lock: &lock,
        };
        // The lock guards no data: a panicking holder cannot leave anything half-written.
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Number of card ids currently held or waited on.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_for(&self, card_id: CardId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(card_id).or_default().clone()
    }
}

/// Removes the table entry once its last user is done with it.
struct Release<'a> {
    locks: &'a CardLocks,
    card_id: CardId,
    lock: &'a Arc<Mutex<()>>,
}

impl Drop for Release<'_> {
    fn drop(&mut self) {
        let mut locks = self
            .locks
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // New clones are only handed out under the table lock, so the count is stable here.
        let idle = locks
            .get(&self.card_id)
            .is_some_and(|entry| Arc::ptr_eq(entry, self.lock) && Arc::strong_count(entry) == 2);
        if idle {
            locks.remove(&self.card_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;

    #[test]
    fn same_card_never_runs_concurrently() {
        let locks = Arc::new(CardLocks::new());
        let card_id = CardId::new();
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = locks.clone();
                let inside = inside.clone();
                let max_inside = max_inside.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        locks.with_card(card_id, || {
                            let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                            max_inside.fetch_max(now, Ordering::SeqCst);
                            thread::yield_now();
                            inside.fetch_sub(1, Ordering::SeqCst);
                        });
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert!(locks.is_empty());
    }

    #[test]
    fn idle_locks_are_released() {
        let locks = CardLocks::new();
        assert!(locks.is_empty());

        let a = CardId::new();
        let b = CardId::new();
        assert_eq!(locks.with_card(a, || locks.len()), 1);
        assert_eq!(locks.with_card(b, || locks.with_card(a, || locks.len())), 2);
        assert_eq!(locks.with_card(a, || 3), 3);

        assert!(locks.is_empty());
    }

    #[test]
    fn lock_is_released_when_the_holder_panics() {
        let locks = CardLocks::new();
        let card_id = CardId::new();

        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            locks.with_card(card_id, || -> u8 { panic!("boom") })
        }));

        assert!(res.is_err());
        assert!(locks.is_empty());
        assert_eq!(locks.with_card(card_id, || 7), 7);
    }

    #[test]
    fn entry_survives_while_another_thread_waits() {
        let locks = Arc::new(CardLocks::new());
        let card_id = CardId::new();

        let waiter = locks.with_card(card_id, || {
            let waiter = {
                let locks = locks.clone();
                thread::spawn(move || locks.with_card(card_id, || locks.len()))
            };
            // Table + holder + waiter.
            while users(&locks, card_id) < 3 {
                thread::yield_now();
            }
            waiter
        });

        assert_eq!(waiter.join().unwrap(), 1);
        assert!(locks.is_empty());
    }

    fn users(locks: &CardLocks, card_id: CardId) -> usize {
        locks
            .locks
            .lock()
            .unwrap()
            .get(&card_id)
            .map_or(0, |lock| Arc::strong_count(lock))
    }
}
