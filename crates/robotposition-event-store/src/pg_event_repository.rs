//! `PostgreSQL` implementation of the `EventRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use robotposition_core::error::DomainError;
use robotposition_core::repository::{EventRepository, StoredEvent};

/// PostgreSQL-backed event repository.
#[derive(Debug, Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Creates a new `PgEventRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn current_version(&self, aggregate_id: Uuid) -> Result<i64, DomainError> {
        sqlx::query_scalar(
            "SELECT COALESCE(MAX(sequence_number), 0) FROM domain_events WHERE aggregate_id = $1",
        )
        .bind(aggregate_id)
        .fetch_one(&self.pool)
        .await
        .map_err(infrastructure)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    event_id: Uuid,
    aggregate_id: Uuid,
    event_type: String,
    payload: serde_json::Value,
    sequence_number: i64,
    correlation_id: Uuid,
    causation_id: Uuid,
    occurred_at: DateTime<Utc>,
}

impl From<EventRow> for StoredEvent {
    fn from(row: EventRow) -> Self {
        Self {
            event_id: row.event_id,
            aggregate_id: row.aggregate_id,
            event_type: row.event_type,
            payload: row.payload,
            sequence_number: row.sequence_number,
            correlation_id: row.correlation_id,
            causation_id: row.causation_id,
            occurred_at: row.occurred_at,
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn infrastructure(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("event store: {err}"))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT event_id, aggregate_id, event_type, payload, sequence_number, \
                    correlation_id, causation_id, occurred_at \
             FROM domain_events \
             WHERE aggregate_id = $1 \
             ORDER BY sequence_number",
        )
        .bind(aggregate_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?;

        debug!(count = rows.len(), "loaded events");
        Ok(rows.into_iter().map(StoredEvent::from).collect())
    }

    #[instrument(skip(self, events), fields(count = events.len()))]
    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        if events.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(infrastructure)?;

        let actual: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(sequence_number), 0) FROM domain_events WHERE aggregate_id = $1",
        )
        .bind(aggregate_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(infrastructure)?;

        if actual != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }

        for event in events {
            let inserted = sqlx::query(
                "INSERT INTO domain_events \
                    (event_id, aggregate_id, event_type, payload, sequence_number, \
                     correlation_id, causation_id, occurred_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(event.event_id)
            .bind(event.aggregate_id)
            .bind(&event.event_type)
            .bind(&event.payload)
            .bind(event.sequence_number)
            .bind(event.correlation_id)
            .bind(event.causation_id)
            .bind(event.occurred_at)
            .execute(&mut *tx)
            .await;

            if let Err(err) = inserted {
                if is_unique_violation(&err) {
                    // A concurrent writer won the race between our version
                    // check and the insert.
                    drop(tx);
                    let actual = self.current_version(aggregate_id).await?;
                    return Err(DomainError::ConcurrencyConflict {
                        aggregate_id,
                        expected: expected_version,
                        actual,
                    });
                }
                return Err(infrastructure(err));
            }
        }

        tx.commit().await.map_err(infrastructure)?;
        debug!("appended events");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_aggregate_ids(&self, event_type: &str) -> Result<Vec<Uuid>, DomainError> {
        sqlx::query_scalar(
            "SELECT aggregate_id FROM ( \
                SELECT aggregate_id, MIN(occurred_at) AS first_seen \
                FROM domain_events \
                WHERE event_type = $1 \
                GROUP BY aggregate_id \
             ) streams \
             ORDER BY first_seen, aggregate_id",
        )
        .bind(event_type)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)
    }
}
