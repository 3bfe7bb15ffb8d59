//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// Trait for aggregate roots that reconstitute from event history.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the number of persisted events applied so far.
    fn version(&self) -> i64;

    /// Folds a persisted event into the aggregate state.
    fn apply(&mut self, event: &Self::Event);

    /// Returns events produced by command handling that are not yet stored.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Clears uncommitted events after persistence.
    fn clear_uncommitted_events(&mut self);

    /// Returns the sequence number the next produced event should carry.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version() + self.uncommitted_events().len() as i64 + 1
    }
}
