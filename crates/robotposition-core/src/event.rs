//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::StoredEvent;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Type name for deserialization routing.
    pub event_type: String,
    /// Aggregate/stream this event belongs to.
    pub aggregate_id: Uuid,
    /// Monotonically increasing version within the aggregate stream.
    pub sequence_number: i64,
    /// Correlation ID for tracing a command through its effects.
    pub correlation_id: Uuid,
    /// Causation ID linking this event to the event/command that caused it.
    pub causation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

impl From<&StoredEvent> for EventMetadata {
    fn from(stored: &StoredEvent) -> Self {
        Self {
            event_id: stored.event_id,
            event_type: stored.event_type.clone(),
            aggregate_id: stored.aggregate_id,
            sequence_number: stored.sequence_number,
            correlation_id: stored.correlation_id,
            causation_id: stored.causation_id,
            occurred_at: stored.occurred_at,
        }
    }
}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name (used for serialization routing).
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;

    /// Converts the event into its storage representation.
    fn to_stored_event(&self) -> StoredEvent {
        let meta = self.metadata();
        StoredEvent {
            event_id: meta.event_id,
            aggregate_id: meta.aggregate_id,
            event_type: self.event_type().to_owned(),
            payload: self.to_payload(),
            sequence_number: meta.sequence_number,
            correlation_id: meta.correlation_id,
            causation_id: meta.causation_id,
            occurred_at: meta.occurred_at,
        }
    }
}
