//! PostgreSQL event store for the robot position service.
//!
//! The `domain_events` table is created by the SQL migrations in the
//! workspace `migrations/` directory.

pub mod pg_event_repository;
