use crate::models::CleaningRequest;
use crate::services::storage::{Store, KEY_CLEANING_REQUESTS};

/// Keyed access to the persisted request collection. This is the only place
/// that rewrites the `cleaningRequests` document, so callers work with single
/// records and cannot race each other with read-modify-write cycles.
#[derive(Clone)]
pub struct RequestStore {
    store: Store,
}

impl RequestStore {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Full collection in insertion order.
    pub fn all(&self) -> Vec<CleaningRequest> {
        self.store.get_or(KEY_CLEANING_REQUESTS, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.all().is_empty()
    }

    pub fn find(&self, id: &str) -> Option<CleaningRequest> {
        self.all().into_iter().find(|r| r.id == id)
    }

    /// Append a record and persist.
    pub fn insert(&self, request: CleaningRequest) {
        let mut requests = self.all();
        requests.push(request);
        self.persist(&requests);
    }

    /// Replace the whole collection (demo-data seeding).
    pub fn replace_all(&self, requests: Vec<CleaningRequest>) {
        self.persist(&requests);
    }

    /// Mutate the record with the given id in place, persist the collection,
    /// and return the updated record. None when the id is unknown.
    pub fn update_with<F>(&self, id: &str, mutate: F) -> Option<CleaningRequest>
    where
        F: FnOnce(&mut CleaningRequest),
    {
        let mut requests = self.all();
        let target = requests.iter_mut().find(|r| r.id == id)?;
        mutate(target);
        let updated = target.clone();
        self.persist(&requests);
        Some(updated)
    }

    /// Remove the record with the given id. False when the id is unknown.
    pub fn remove(&self, id: &str) -> bool {
        let mut requests = self.all();
        let before = requests.len();
        requests.retain(|r| r.id != id);
        if requests.len() == before {
            return false;
        }
        self.persist(&requests);
        true
    }

    fn persist(&self, requests: &[CleaningRequest]) {
        self.store.set(KEY_CLEANING_REQUESTS, &requests);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequestStatus;
    use chrono::Utc;

    fn request(id: &str, owner: &str) -> CleaningRequest {
        CleaningRequest {
            id: id.to_string(),
            owner_email: owner.to_string(),
            cabin_address: "123 Lakeshore Drive".to_string(),
            checkout_date: "2025-08-05".to_string(),
            checkout_time: "11:00".to_string(),
            special_requests: String::new(),
            status: RequestStatus::Pending,
            submitted_at: Utc::now(),
            approved_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn preserves_insertion_order() {
        let store = RequestStore::new(Store::in_memory());
        store.insert(request("a", "x@email.com"));
        store.insert(request("b", "y@email.com"));
        store.insert(request("c", "x@email.com"));

        let ids: Vec<_> = store.all().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn update_with_mutates_only_the_target() {
        let store = RequestStore::new(Store::in_memory());
        store.insert(request("a", "x@email.com"));
        store.insert(request("b", "y@email.com"));

        let updated = store
            .update_with("b", |r| r.status = RequestStatus::Approved)
            .unwrap();
        assert_eq!(updated.status, RequestStatus::Approved);
        assert_eq!(store.find("a").unwrap().status, RequestStatus::Pending);
    }

    #[test]
    fn remove_unknown_id_is_false() {
        let store = RequestStore::new(Store::in_memory());
        store.insert(request("a", "x@email.com"));

        assert!(!store.remove("missing"));
        assert!(store.remove("a"));
        assert!(store.is_empty());
    }
}
