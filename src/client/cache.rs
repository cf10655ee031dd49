//! Filter-keyed cache of fetched views.
//!
//! Entries are keyed by resource + query parameters. Invalidation happens
//! on two converging paths: immediately after a local mutation succeeds,
//! and on receipt of a broadcast event caused by someone else's mutation.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::api::types::IpoDto;
use crate::domain::NotificationEvent;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    List {
        search: Option<String>,
        status: Option<String>,
        sector: Option<String>,
    },
    Record(String),
}

#[derive(Debug, Clone)]
enum CacheEntry {
    List(Vec<IpoDto>),
    Record(IpoDto),
}

/// In-memory view cache. Interior mutability so the owning client can stay
/// `&self` throughout; the mutex is only held for map operations.
#[derive(Debug, Default)]
pub struct ViewCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl ViewCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_list(&self, key: &CacheKey) -> Option<Vec<IpoDto>> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some(CacheEntry::List(records)) => Some(records.clone()),
            _ => None,
        }
    }

    pub fn put_list(&self, key: CacheKey, records: Vec<IpoDto>) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(key, CacheEntry::List(records));
    }

    pub fn get_record(&self, id: &str) -> Option<IpoDto> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(&CacheKey::Record(id.to_string())) {
            Some(CacheEntry::Record(record)) => Some(record.clone()),
            _ => None,
        }
    }

    pub fn put_record(&self, record: IpoDto) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(CacheKey::Record(record.id.clone()), CacheEntry::Record(record));
    }

    /// Drops the cached record for one id, leaving list entries alone.
    pub fn invalidate_record(&self, id: &str) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.remove(&CacheKey::Record(id.to_string()));
    }

    /// Drops every cached list view. Any mutation can reorder or grow a
    /// filtered collection, so lists are never patched in place.
    pub fn invalidate_lists(&self) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.retain(|key, _| !matches!(key, CacheKey::List { .. }));
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidation driven by a broadcast event from another client's
    /// mutation. The local-mutation path does not come through here.
    pub fn invalidate_for_event(&self, event: &NotificationEvent) {
        match event {
            NotificationEvent::IpoCreated(_) => {
                self.invalidate_lists();
            }
            NotificationEvent::IpoUpdated(record) => {
                self.invalidate_record(&record.id);
                self.invalidate_lists();
            }
            NotificationEvent::IpoDeleted { id } => {
                self.invalidate_record(id);
                self.invalidate_lists();
            }
            NotificationEvent::Connected { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IpoStatus;

    fn test_record(id: &str) -> IpoDto {
        IpoDto {
            id: id.to_string(),
            company_name: format!("Company {id}"),
            sector: None,
            logo_url: None,
            logo_initials: None,
            logo_color: None,
            price_band: None,
            min_price: None,
            max_price: None,
            lot_size: None,
            issue_size: None,
            issue_type: None,
            open_date: None,
            close_date: None,
            listing_date: None,
            status: IpoStatus::Upcoming,
            description: None,
            ipo_price: None,
            listing_price: None,
            listing_gain: None,
            current_price: None,
            current_return: None,
            rhp_link: None,
            drhp_link: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn list_key() -> CacheKey {
        CacheKey::List {
            search: None,
            status: Some("upcoming".to_string()),
            sector: None,
        }
    }

    #[test]
    fn caches_and_returns_views() {
        let cache = ViewCache::new();
        cache.put_list(list_key(), vec![test_record("a")]);
        cache.put_record(test_record("a"));

        assert_eq!(cache.get_list(&list_key()).unwrap().len(), 1);
        assert_eq!(cache.get_record("a").unwrap().id, "a");
        assert_eq!(cache.get_record("b"), None);
    }

    #[test]
    fn update_event_invalidates_record_and_lists() {
        let cache = ViewCache::new();
        cache.put_list(list_key(), vec![test_record("a")]);
        cache.put_record(test_record("a"));
        cache.put_record(test_record("b"));

        cache.invalidate_for_event(&NotificationEvent::IpoUpdated(test_record("a")));

        assert_eq!(cache.get_list(&list_key()), None);
        assert_eq!(cache.get_record("a"), None);
        // Unrelated records stay cached.
        assert!(cache.get_record("b").is_some());
    }

    #[test]
    fn delete_event_invalidates_record_and_lists() {
        let cache = ViewCache::new();
        cache.put_list(list_key(), vec![test_record("a")]);
        cache.put_record(test_record("a"));

        cache.invalidate_for_event(&NotificationEvent::IpoDeleted {
            id: "a".to_string(),
        });

        assert!(cache.is_empty());
    }

    #[test]
    fn create_event_only_touches_lists() {
        let cache = ViewCache::new();
        cache.put_list(list_key(), vec![]);
        cache.put_record(test_record("a"));

        cache.invalidate_for_event(&NotificationEvent::IpoCreated(test_record("new")));

        assert_eq!(cache.get_list(&list_key()), None);
        assert!(cache.get_record("a").is_some());
    }

    #[test]
    fn connected_event_is_a_no_op() {
        let cache = ViewCache::new();
        cache.put_record(test_record("a"));

        cache.invalidate_for_event(&NotificationEvent::Connected {
            message: "hello".to_string(),
        });

        assert_eq!(cache.len(), 1);
    }
}
