//! Per-user submission locks
//!
//! Submissions and redemptions for one user must be applied one at a time so
//! point totals never interleave. Locks are keyed by user id and created
//! lazily; the map only grows with the set of active users.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct UserLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `user_id`, waiting behind any in-flight operation
    /// for the same user. The guard is owned so it can be held across awaits.
    pub async fn acquire(&self, user_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn same_user_operations_are_serialized() {
        let locks = Arc::new(UserLocks::new());
        let in_section = Arc::new(AtomicBool::new(false));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let locks = Arc::clone(&locks);
            let in_section = Arc::clone(&in_section);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire("user-1").await;
                assert!(!in_section.swap(true, Ordering::SeqCst));
                tokio::task::yield_now().await;
                in_section.store(false, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn different_users_do_not_block_each_other() {
        let locks = UserLocks::new();
        let _a = locks.acquire("user-a").await;
        // Must not deadlock.
        let _b = locks.acquire("user-b").await;
    }
}
