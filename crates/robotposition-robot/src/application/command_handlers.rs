//! Command handlers for the Robot context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load aggregate, execute command, persist events.

use robotposition_core::aggregate::AggregateRoot;
use robotposition_core::clock::Clock;
use robotposition_core::error::DomainError;
use robotposition_core::event::{DomainEvent, EventMetadata};
use robotposition_core::repository::{EventRepository, StoredEvent};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::aggregates::Robot;
use crate::domain::commands::{ExecuteCommands, PlaceRobot, RemoveRobot};
use crate::domain::events::{RobotEvent, RobotEventKind};
use crate::domain::grid::{Facing, Position};
use crate::domain::interpreter::CommandInterpreter;

/// Reconstitutes a `Robot` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    robot_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<Robot, DomainError> {
    let mut robot = Robot::new(robot_id);
    for stored in existing_events {
        let kind: RobotEventKind = serde_json::from_value(stored.payload.clone()).map_err(|e| {
            DomainError::Infrastructure(format!("event deserialization failed: {e}"))
        })?;
        let event = RobotEvent {
            metadata: EventMetadata::from(stored),
            kind,
        };
        robot.apply(&event);
    }
    Ok(robot)
}

/// Persists the aggregate's uncommitted events and returns them.
async fn commit(
    robot: &mut Robot,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let stored_events: Vec<StoredEvent> = robot
        .uncommitted_events()
        .iter()
        .map(RobotEvent::to_stored_event)
        .collect();

    repo.append_events(robot.id, robot.version(), &stored_events)
        .await?;
    robot.clear_uncommitted_events();

    Ok(stored_events)
}

/// Handles the `PlaceRobot` command: validates the starting position, creates
/// a fresh aggregate, and persists the `RobotPlaced` event.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the facing is unknown, a coordinate
/// is off the grid, or the robot ID is already in use. Returns other
/// `DomainError` variants if event loading or appending fails.
pub async fn handle_place_robot(
    command: &PlaceRobot,
    interpreter: &CommandInterpreter,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let facing = command
        .facing
        .parse::<Facing>()
        .map_err(|e| DomainError::Validation(e.to_string()))?;
    let position = Position::within(command.x, command.y, facing, &interpreter.bounds())
        .map_err(|e| DomainError::Validation(e.to_string()))?;

    let existing_events = repo.load_events(command.robot_id).await?;
    let mut robot = reconstitute(command.robot_id, &existing_events)?;

    robot.place(position, command.correlation_id, clock)?;

    commit(&mut robot, repo).await
}

/// Handles the `ExecuteCommands` command: reconstitutes the robot, runs the
/// instruction string through the interpreter, and persists the result.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the robot does not exist or was
/// removed, `DomainError::Rejected` if a MOVE would leave the grid, or other
/// `DomainError` variants if event loading or appending fails.
pub async fn handle_execute_commands(
    command: &ExecuteCommands,
    interpreter: &CommandInterpreter,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let existing_events = repo.load_events(command.robot_id).await?;
    if existing_events.is_empty() {
        return Err(DomainError::AggregateNotFound(command.robot_id));
    }
    let mut robot = reconstitute(command.robot_id, &existing_events)?;

    let end = robot
        .execute_commands(&command.commands, interpreter, command.correlation_id, clock)
        .inspect_err(|err| {
            if let DomainError::Rejected(reason) = err {
                warn!(robot_id = %command.robot_id, %reason, "command sequence rejected");
            }
        })?;

    debug!(
        robot_id = %command.robot_id,
        x = end.x,
        y = end.y,
        facing = %end.facing,
        "command sequence applied"
    );

    commit(&mut robot, repo).await
}

/// Handles the `RemoveRobot` command: reconstitutes the robot and persists a
/// `RobotRemoved` event.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the robot does not exist or was
/// already removed, or other `DomainError` variants if persistence fails.
pub async fn handle_remove_robot(
    command: &RemoveRobot,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let existing_events = repo.load_events(command.robot_id).await?;
    let mut robot = reconstitute(command.robot_id, &existing_events)?;

    robot.remove(command.correlation_id, clock)?;

    commit(&mut robot, repo).await
}
