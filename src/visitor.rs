use crate::api::{SummarizerApi, best_effort};
use crate::error::ClientResult;
use crate::storage::{KeyValueStore, VISITOR_ID_KEY};
use crate::types::VisitorId;
use uuid::Uuid;

/// Result of resolving the visitor identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedVisitor {
    pub id: VisitorId,
    /// True only when the identifier was generated by this call.
    pub first_visit: bool,
}

/// Owns the visitor identifier: persisted once, then served from memory.
pub struct VisitorIdentity<S> {
    store: S,
    cached: Option<VisitorId>,
}

impl<S: KeyValueStore> VisitorIdentity<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cached: None,
        }
    }

    pub fn get_or_create(&mut self) -> ClientResult<ResolvedVisitor> {
        if let Some(id) = &self.cached {
            return Ok(ResolvedVisitor {
                id: id.clone(),
                first_visit: false,
            });
        }

        if let Some(stored) = self
            .store
            .get(VISITOR_ID_KEY)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            let id = VisitorId::new(stored);
            self.cached = Some(id.clone());
            return Ok(ResolvedVisitor {
                id,
                first_visit: false,
            });
        }

        let id = VisitorId::new(Uuid::new_v4().to_string());
        self.store.set(VISITOR_ID_KEY, id.as_str())?;
        tracing::info!(visitor = %id, "created visitor id");
        self.cached = Some(id.clone());
        Ok(ResolvedVisitor {
            id,
            first_visit: true,
        })
    }

    /// The identifier if it has already been resolved.
    pub fn cached(&self) -> Option<&VisitorId> {
        self.cached.as_ref()
    }
}

/// Tell the backend about a new visitor. Never fails from the caller's view.
pub async fn announce_visit<A: SummarizerApi + ?Sized>(api: &A, visitor: &VisitorId) {
    best_effort("visitor-visit", api.register_visit(visitor)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_reuses_stored_id() {
        let store = MemoryStore::with_entries([(VISITOR_ID_KEY, "existing-id")]);
        let mut identity = VisitorIdentity::new(store);
        let resolved = identity.get_or_create().unwrap();
        assert_eq!(resolved.id.as_str(), "existing-id");
        assert!(!resolved.first_visit);
    }

    #[test]
    fn test_blank_stored_id_is_replaced() {
        let store = MemoryStore::with_entries([(VISITOR_ID_KEY, "   ")]);
        let mut identity = VisitorIdentity::new(store.clone());
        let resolved = identity.get_or_create().unwrap();
        assert!(resolved.first_visit);
        assert!(Uuid::parse_str(resolved.id.as_str()).is_ok());
        assert_eq!(store.get(VISITOR_ID_KEY), Some(resolved.id.to_string()));
    }

    #[test]
    fn test_cache_survives_storage_loss() {
        let store = MemoryStore::new();
        let mut identity = VisitorIdentity::new(store.clone());
        let first = identity.get_or_create().unwrap();
        store.remove(VISITOR_ID_KEY).unwrap();
        let second = identity.get_or_create().unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(identity.cached(), Some(&first.id));
    }
}
