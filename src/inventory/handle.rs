use std::sync::Arc;
use tokio::sync::RwLock;

use crate::inventory::store::VehicleStore;

/// Shared handle to the currently published inventory.
///
/// Readers clone the inner `Arc` and drop the lock straight away, so a query
/// keeps working against the snapshot it started with even if a new one is
/// published mid-flight.
#[derive(Clone)]
pub struct InventoryHandle {
    current: Arc<RwLock<Arc<dyn VehicleStore>>>,
}

impl InventoryHandle {
    pub fn new(store: impl VehicleStore + 'static) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(store))),
        }
    }

    pub async fn snapshot(&self) -> Arc<dyn VehicleStore> {
        self.current.read().await.clone()
    }

    /// Publishes `store` and returns the snapshot it replaced.
    pub async fn replace(&self, store: impl VehicleStore + 'static) -> Arc<dyn VehicleStore> {
        let next: Arc<dyn VehicleStore> = Arc::new(store);
        let mut guard = self.current.write().await;
        let previous = std::mem::replace(&mut *guard, next);
        tracing::info!(
            previous = previous.len(),
            current = guard.len(),
            "Published new inventory snapshot"
        );
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::store::{Inventory, VehicleQuery};

    #[tokio::test]
    async fn readers_keep_their_snapshot_across_replace() {
        let handle = InventoryHandle::new(Inventory::generate(100, Some(1)));
        let before = handle.snapshot().await;

        let previous = handle.replace(Inventory::generate(40, Some(2))).await;
        assert_eq!(previous.len(), 100);

        // The old snapshot is still fully usable
        let page = before.query(&VehicleQuery::default()).unwrap();
        assert_eq!(page.meta.total_records, 100);

        assert_eq!(handle.snapshot().await.len(), 40);
    }

    #[tokio::test]
    async fn clones_share_the_published_snapshot() {
        let handle = InventoryHandle::new(Inventory::generate(10, Some(1)));
        let other = handle.clone();
        handle.replace(Inventory::generate(3, Some(1))).await;
        assert_eq!(other.snapshot().await.len(), 3);
    }
}
