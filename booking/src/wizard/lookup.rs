//! A dependent list fetched for one key, guarded against stale responses.
//!
//! Every request takes a [`Ticket`] carrying the key and the slot generation
//! at the time it was issued. Invalidating the slot or starting a newer
//! request bumps the generation, so responses to older tickets are dropped no
//! matter in which order they arrive.

use super::state::LookupStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket<K> {
    pub key: K,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct Lookup<K, T> {
    items: Vec<T>,
    key: Option<K>,
    status: LookupStatus,
    generation: u64,
}

impl<K, T> Default for Lookup<K, T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            key: None,
            status: LookupStatus::Idle,
            generation: 0,
        }
    }
}

impl<K: Copy + PartialEq, T> Lookup<K, T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Key of the latest request, whether or not it has resolved yet.
    pub fn key(&self) -> Option<K> {
        self.key
    }

    pub fn status(&self) -> &LookupStatus {
        &self.status
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops the current items and makes every outstanding ticket stale.
    pub fn invalidate(&mut self) {
        self.items.clear();
        self.key = None;
        self.status = LookupStatus::Idle;
        self.generation += 1;
    }

    /// Starts a request for `key`, superseding any request still in flight.
    pub fn begin(&mut self, key: K) -> Ticket<K> {
        self.invalidate();
        self.key = Some(key);
        self.status = LookupStatus::Loading;
        Ticket {
            key,
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        ticket.generation == self.generation && self.key == Some(ticket.key)
    }

    /// Applies a response. Returns `false` and leaves the slot untouched when
    /// the ticket is stale.
    pub fn accept<E: ToString>(&mut self, ticket: &Ticket<K>, result: Result<Vec<T>, E>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        match result {
            Ok(items) => {
                self.items = items;
                self.status = LookupStatus::Ready;
            }
            Err(e) => {
                self.items.clear();
                self.status = LookupStatus::Failed(e.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_marks_loading() {
        let mut lookup: Lookup<u8, &str> = Lookup::default();
        let ticket = lookup.begin(4);

        assert_eq!(ticket.key, 4);
        assert_eq!(lookup.key(), Some(4));
        assert!(lookup.status().is_loading());
        assert!(lookup.is_empty());
    }

    #[test]
    fn test_newer_request_supersedes_older() {
        let mut lookup: Lookup<u8, &str> = Lookup::default();
        let old = lookup.begin(4);
        let new = lookup.begin(2);

        assert!(lookup.accept::<String>(&new, Ok(vec!["scooter"])));
        assert!(!lookup.accept::<String>(&old, Ok(vec!["sedan"])));
        assert_eq!(lookup.items(), &["scooter"]);
        assert_eq!(lookup.status(), &LookupStatus::Ready);
    }

    #[test]
    fn test_same_key_reissued_discards_first_ticket() {
        let mut lookup: Lookup<u8, &str> = Lookup::default();
        let first = lookup.begin(4);
        let second = lookup.begin(4);

        assert!(!lookup.is_current(&first));
        assert!(lookup.is_current(&second));
    }

    #[test]
    fn test_invalidate_discards_in_flight() {
        let mut lookup: Lookup<u8, &str> = Lookup::default();
        let ticket = lookup.begin(4);
        lookup.invalidate();

        assert!(!lookup.accept::<String>(&ticket, Ok(vec!["sedan"])));
        assert!(lookup.is_empty());
        assert_eq!(lookup.status(), &LookupStatus::Idle);
    }

    #[test]
    fn test_failure_keeps_list_empty() {
        let mut lookup: Lookup<u8, &str> = Lookup::default();
        let ticket = lookup.begin(2);

        assert!(lookup.accept(&ticket, Err("connection refused")));
        assert!(lookup.is_empty());
        assert_eq!(
            lookup.status(),
            &LookupStatus::Failed("connection refused".to_string())
        );
    }
}
