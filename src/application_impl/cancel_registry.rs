use crate::domain_model::RequestId;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;

/// Outstanding cancellation handles of the authenticated client, in
/// dispatch order.
#[derive(Debug, Default)]
pub struct CancellationRegistry {
    entries: Mutex<Vec<(RequestId, CancellationToken)>>,
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(RequestId, CancellationToken)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, cancel: CancellationToken) -> RequestId {
        let id = RequestId::generate();
        self.lock().push((id.clone(), cancel));
        id
    }

    /// Returns false when `id` was already removed or drained.
    pub fn remove(&self, id: &RequestId) -> bool {
        let mut entries = self.lock();
        match entries.iter().position(|(entry, _)| entry == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Cancels every registered request and empties the registry.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<_> = self.lock().drain(..).collect();
        for (_, cancel) in &drained {
            cancel.cancel();
        }
        drained.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removing_twice_is_a_no_op() {
        let registry = CancellationRegistry::new();
        let id = registry.register(CancellationToken::new());
        assert!(registry.remove(&id));
        assert!(!registry.remove(&id));
        assert!(!registry.remove(&RequestId("unknown".to_string())));
        assert!(registry.is_empty());
    }

    #[test]
    fn cancel_all_fires_every_token_once_drained() {
        let registry = CancellationRegistry::new();
        let tokens: Vec<_> = (0..3).map(|_| CancellationToken::new()).collect();
        let ids: Vec<_> = tokens.iter().map(|t| registry.register(t.clone())).collect();

        assert_eq!(registry.cancel_all(), 3);
        assert!(tokens.iter().all(CancellationToken::is_cancelled));
        assert!(registry.is_empty());
        assert!(ids.iter().all(|id| !registry.remove(id)));
        assert_eq!(registry.cancel_all(), 0);
    }

    #[test]
    fn removal_keeps_other_handles() {
        let registry = CancellationRegistry::new();
        let first = CancellationToken::new();
        let second = CancellationToken::new();
        let first_id = registry.register(first.clone());
        registry.register(second.clone());

        registry.remove(&first_id);
        registry.cancel_all();
        assert!(!first.is_cancelled());
        assert!(second.is_cancelled());
    }
}
