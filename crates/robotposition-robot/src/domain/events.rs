//! Domain events for the Robot context.

use robotposition_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::grid::{Facing, Position};

/// Event type of the first event in every robot stream.
pub const ROBOT_PLACED: &str = "robot.robot_placed";

/// Emitted when a robot is placed on the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotPlaced {
    /// The robot identifier.
    pub robot_id: Uuid,
    /// Starting column.
    pub x: i32,
    /// Starting row.
    pub y: i32,
    /// Starting facing.
    pub facing: Facing,
}

/// Emitted when a command string has been applied in full.
///
/// Carries the resulting position so replay never re-runs the interpreter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsExecuted {
    /// The robot identifier.
    pub robot_id: Uuid,
    /// The raw instruction string as submitted.
    pub commands: String,
    /// Column after the commands.
    pub x: i32,
    /// Row after the commands.
    pub y: i32,
    /// Facing after the commands.
    pub facing: Facing,
    /// How many tokens were skipped as unrecognised.
    pub ignored_tokens: usize,
}

impl CommandsExecuted {
    /// The position this event leaves the robot in.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.facing)
    }
}

/// Emitted when a robot is removed from the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotRemoved {
    /// The robot identifier.
    pub robot_id: Uuid,
}

/// Event payload variants for the Robot context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RobotEventKind {
    /// A robot has been placed.
    RobotPlaced(RobotPlaced),
    /// A command string has been applied.
    CommandsExecuted(CommandsExecuted),
    /// A robot has been removed.
    RobotRemoved(RobotRemoved),
}

/// Domain event envelope for the Robot context.
#[derive(Debug, Clone)]
pub struct RobotEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: RobotEventKind,
}

impl DomainEvent for RobotEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            RobotEventKind::RobotPlaced(_) => ROBOT_PLACED,
            RobotEventKind::CommandsExecuted(_) => "robot.commands_executed",
            RobotEventKind::RobotRemoved(_) => "robot.robot_removed",
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("RobotEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
