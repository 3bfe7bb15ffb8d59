//! Commands for the Robot context.

use robotposition_core::command::Command;
use uuid::Uuid;

/// Command to place a new robot on the grid.
#[derive(Debug, Clone)]
pub struct PlaceRobot {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The identifier for the new robot.
    pub robot_id: Uuid,
    /// Starting column.
    pub x: i32,
    /// Starting row.
    pub y: i32,
    /// Starting facing name (`NORTH`, `SOUTH`, `EAST`, `WEST`).
    pub facing: String,
}

impl Command for PlaceRobot {
    fn command_type(&self) -> &'static str {
        "robot.place_robot"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to run a movement instruction string against a robot.
#[derive(Debug, Clone)]
pub struct ExecuteCommands {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The robot identifier.
    pub robot_id: Uuid,
    /// Space-separated `MOVE` / `LEFT` / `RIGHT` tokens.
    pub commands: String,
}

impl Command for ExecuteCommands {
    fn command_type(&self) -> &'static str {
        "robot.execute_commands"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to take a robot off the grid.
#[derive(Debug, Clone)]
pub struct RemoveRobot {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The robot identifier.
    pub robot_id: Uuid,
}

impl Command for RemoveRobot {
    fn command_type(&self) -> &'static str {
        "robot.remove_robot"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
