use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::OrderId;

#[derive(Debug)]
pub struct OrderIdSource {
    next: AtomicU64,
}

impl OrderIdSource {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: OrderId) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn next_id(&self) -> OrderId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for OrderIdSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn ids_are_unique_across_threads() {
        let ids = Arc::new(OrderIdSource::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..1000).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<_> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 4000);
        assert_eq!(all.first(), Some(&1));
    }
}
