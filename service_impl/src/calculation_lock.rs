use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

/// Advisory lock registry serialising recomputation per
/// (employee, year, month). Different keys proceed concurrently; batch
/// recomputation stays embarrassingly parallel across employees.
#[derive(Default)]
pub struct CalculationLockRegistry {
    locks: Mutex<HashMap<(Uuid, i32, u8), Arc<AsyncMutex<()>>>>,
}

impl CalculationLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, employee_id: Uuid, year: i32, month: u8) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            locks
                .entry((employee_id, year, month))
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};

    #[tokio::test]
    async fn test_same_key_is_serialised() {
        let registry = Arc::new(CalculationLockRegistry::new());
        let employee_id = Uuid::new_v4();
        let concurrent = Arc::new(AtomicI32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let registry = registry.clone();
            let concurrent = concurrent.clone();
            handles.push(tokio::spawn(async move {
                let _guard = registry.acquire(employee_id, 2024, 3).await;
                let inside = concurrent.fetch_add(1, Ordering::SeqCst);
                assert_eq!(inside, 0);
                tokio::task::yield_now().await;
                concurrent.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_different_months_do_not_block() {
        let registry = CalculationLockRegistry::new();
        let employee_id = Uuid::new_v4();
        let _march = registry.acquire(employee_id, 2024, 3).await;
        // Would deadlock if the keys shared one lock.
        let _april = registry.acquire(employee_id, 2024, 4).await;
    }
}
