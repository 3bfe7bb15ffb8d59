//! Test repositories: mock `EventRepository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use robotposition_core::error::DomainError;
use robotposition_core::repository::{EventRepository, StoredEvent};
use uuid::Uuid;

/// An event repository that records all `append_events` calls. Returns the
/// configured events from every `load_events` call and always succeeds on
/// `append_events`.
#[derive(Debug)]
pub struct RecordingEventRepository {
    load_result: Mutex<Vec<StoredEvent>>,
    appended: Mutex<Vec<(Uuid, i64, Vec<StoredEvent>)>>,
}

impl RecordingEventRepository {
    /// Create a new recording repository that will return `load_result` from
    /// every `load_events` call.
    ///
    /// # Panics
    ///
    /// Panics if `load_result` is an `Err` (use `FailingEventRepository` for
    /// error scenarios).
    #[must_use]
    pub fn new(load_result: Result<Vec<StoredEvent>, DomainError>) -> Self {
        Self {
            load_result: Mutex::new(load_result.expect(
                "RecordingEventRepository::new does not accept Err; use FailingEventRepository",
            )),
            appended: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all events that were appended.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn appended_events(&self) -> Vec<(Uuid, i64, Vec<StoredEvent>)> {
        self.appended.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventRepository for RecordingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(self.load_result.lock().unwrap().clone())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        self.appended
            .lock()
            .unwrap()
            .push((aggregate_id, expected_version, events.to_vec()));
        Ok(())
    }

    async fn list_aggregate_ids(&self, event_type: &str) -> Result<Vec<Uuid>, DomainError> {
        Ok(self
            .load_result
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.event_type == event_type)
            .map(|e| e.aggregate_id)
            .collect())
    }
}

/// An event repository that always returns an empty event list and silently
/// accepts appends. Useful for testing "aggregate not found" scenarios and
/// creation commands.
#[derive(Debug)]
pub struct EmptyEventRepository;

#[async_trait]
impl EventRepository for EmptyEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(vec![])
    }

    async fn append_events(
        &self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Ok(())
    }

    async fn list_aggregate_ids(&self, _event_type: &str) -> Result<Vec<Uuid>, DomainError> {
        Ok(vec![])
    }
}

/// An event repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingEventRepository;

#[async_trait]
impl EventRepository for FailingEventRepository {
    async fn load_events(&self, _aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn append_events(
        &self,
        _aggregate_id: Uuid,
        _expected_version: i64,
        _events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list_aggregate_ids(&self, _event_type: &str) -> Result<Vec<Uuid>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

/// A working event store held in memory. Enforces the same optimistic
/// concurrency rule as the PostgreSQL store, so multi-step flows can be
/// exercised without a database.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    events: Mutex<Vec<StoredEvent>>,
}

impl InMemoryEventRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored event in append order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn all_events(&self) -> Vec<StoredEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let mut events: Vec<StoredEvent> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.sequence_number);
        Ok(events)
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        if events.is_empty() {
            return Ok(());
        }

        let mut stored = self.events.lock().unwrap();
        let actual = stored
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .map(|e| e.sequence_number)
            .max()
            .unwrap_or(0);
        if actual != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }

        stored.extend_from_slice(events);
        Ok(())
    }

    async fn list_aggregate_ids(&self, event_type: &str) -> Result<Vec<Uuid>, DomainError> {
        let stored = self.events.lock().unwrap();
        let mut ids: Vec<Uuid> = Vec::new();
        for event in stored.iter().filter(|e| e.event_type == event_type) {
            if !ids.contains(&event.aggregate_id) {
                ids.push(event.aggregate_id);
            }
        }
        Ok(ids)
    }
}
