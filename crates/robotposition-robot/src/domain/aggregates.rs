//! Aggregate roots for the Robot context.

use robotposition_core::aggregate::AggregateRoot;
use robotposition_core::clock::Clock;
use robotposition_core::error::DomainError;
use robotposition_core::event::EventMetadata;
use uuid::Uuid;

use super::events::{
    CommandsExecuted, ROBOT_PLACED, RobotEvent, RobotEventKind, RobotPlaced, RobotRemoved,
};
use super::grid::Position;
use super::interpreter::{CommandInterpreter, CommandSequence};

/// The aggregate root for a robot on the grid.
#[derive(Debug)]
pub struct Robot {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// Last persisted position; `None` until placed.
    pub(crate) position: Option<Position>,
    /// Set once the robot has been removed.
    pub(crate) removed: bool,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<RobotEvent>,
}

impl Robot {
    /// Creates an empty, not yet placed robot.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            position: None,
            removed: false,
            uncommitted_events: Vec::new(),
        }
    }

    /// The robot's position, if it is currently on the grid.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        if self.removed { None } else { self.position }
    }

    /// Returns true once the robot has been removed.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    fn live_position(&self) -> Result<Position, DomainError> {
        self.position().ok_or(DomainError::AggregateNotFound(self.id))
    }

    fn record(
        &mut self,
        event_type: &str,
        kind: RobotEventKind,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let event = RobotEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: event_type.to_owned(),
                aggregate_id: self.id,
                sequence_number: self.next_sequence_number(),
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.uncommitted_events.push(event);
    }

    /// Places the robot, producing a `RobotPlaced` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if this stream already has history.
    pub fn place(
        &mut self,
        position: Position,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.version > 0 || self.position.is_some() {
            return Err(DomainError::Validation("robot already placed".to_owned()));
        }

        self.record(
            ROBOT_PLACED,
            RobotEventKind::RobotPlaced(RobotPlaced {
                robot_id: self.id,
                x: position.x,
                y: position.y,
                facing: position.facing,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Runs a command string through `interpreter`, producing a
    /// `CommandsExecuted` event with the resulting position.
    ///
    /// A rejected sequence produces no event, so none of its tokens persist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` if the robot is not on the
    /// grid, or `DomainError::Rejected` if a MOVE would leave it.
    pub fn execute_commands(
        &mut self,
        commands: &str,
        interpreter: &CommandInterpreter,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Position, DomainError> {
        let start = self.live_position()?;
        let sequence = CommandSequence::parse(commands);

        let end = interpreter
            .apply(start, &sequence)
            .into_result()
            .map_err(|err| DomainError::Rejected(err.to_string()))?;

        self.record(
            "robot.commands_executed",
            RobotEventKind::CommandsExecuted(CommandsExecuted {
                robot_id: self.id,
                commands: commands.to_owned(),
                x: end.x,
                y: end.y,
                facing: end.facing,
                ignored_tokens: sequence.unknown_count(),
            }),
            correlation_id,
            clock,
        );
        Ok(end)
    }

    /// Removes the robot, producing a `RobotRemoved` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AggregateNotFound` if the robot is not on the grid.
    pub fn remove(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        self.live_position()?;

        self.record(
            "robot.robot_removed",
            RobotEventKind::RobotRemoved(RobotRemoved { robot_id: self.id }),
            correlation_id,
            clock,
        );
        Ok(())
    }
}

impl AggregateRoot for Robot {
    type Event = RobotEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            RobotEventKind::RobotPlaced(payload) => {
                self.position = Some(Position::new(payload.x, payload.y, payload.facing));
            }
            RobotEventKind::CommandsExecuted(payload) => {
                self.position = Some(payload.position());
            }
            RobotEventKind::RobotRemoved(_) => {
                self.removed = true;
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
