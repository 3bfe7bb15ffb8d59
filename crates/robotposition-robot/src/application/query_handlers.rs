//! Query handlers for the Robot context.
//!
//! This module contains query handlers that reconstitute aggregates
//! from stored events and return read-only view DTOs.

use std::str::FromStr;

use robotposition_core::aggregate::AggregateRoot;
use robotposition_core::error::DomainError;
use robotposition_core::repository::EventRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::aggregates::Robot;
use crate::domain::events::ROBOT_PLACED;
use crate::domain::grid::Facing;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Read-only view of a robot aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RobotView {
    /// The robot identifier.
    pub robot_id: Uuid,
    /// Current column.
    pub x: i32,
    /// Current row.
    pub y: i32,
    /// Current facing.
    pub facing: Facing,
    /// Current version (event count).
    pub version: i64,
}

impl RobotView {
    fn from_robot(robot: &Robot) -> Option<Self> {
        robot.position().map(|position| Self {
            robot_id: robot.id,
            x: position.x,
            y: position.y,
            facing: position.facing,
            version: robot.version(),
        })
    }
}

/// Field a robot listing is ordered by. Ordering is ascending and stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Order robots were placed in.
    #[default]
    Placement,
    /// Robot identifier.
    Id,
    /// Column.
    X,
    /// Row.
    Y,
    /// Facing, in `NORTH, EAST, SOUTH, WEST` order.
    Facing,
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "placement" => Ok(SortField::Placement),
            "id" => Ok(SortField::Id),
            "x" | "xpos" => Ok(SortField::X),
            "y" | "ypos" => Ok(SortField::Y),
            "facing" | "facingdir" => Ok(SortField::Facing),
            other => Err(DomainError::Validation(format!(
                "cannot sort robots by {other:?}; expected one of id, x, y, facing"
            ))),
        }
    }
}

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: usize,
    /// Maximum number of items per page.
    pub page_size: usize,
    /// Ordering applied before slicing.
    pub sort: SortField,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: 10,
            sort: SortField::Placement,
        }
    }
}

/// One page of results plus paging metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page.
    pub content: Vec<T>,
    /// Zero-based page index.
    pub page: usize,
    /// Requested page size.
    pub page_size: usize,
    /// Total number of items across all pages.
    pub total_elements: usize,
    /// Number of pages at this page size.
    pub total_pages: usize,
}

/// Retrieves a robot by its aggregate ID.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID or
/// the robot was removed.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_robot_by_id(
    robot_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<RobotView, DomainError> {
    let stored_events = repo.load_events(robot_id).await?;
    if stored_events.is_empty() {
        return Err(DomainError::AggregateNotFound(robot_id));
    }
    let robot = command_handlers::reconstitute(robot_id, &stored_events)?;
    RobotView::from_robot(&robot).ok_or(DomainError::AggregateNotFound(robot_id))
}

/// Lists robots currently on the grid, one page at a time.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the page size is zero or above
/// [`MAX_PAGE_SIZE`], or other `DomainError` variants if loading fails.
pub async fn list_robots(
    request: PageRequest,
    repo: &dyn EventRepository,
) -> Result<Page<RobotView>, DomainError> {
    if request.page_size == 0 || request.page_size > MAX_PAGE_SIZE {
        return Err(DomainError::Validation(format!(
            "page size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }

    let mut robots = Vec::new();
    for robot_id in repo.list_aggregate_ids(ROBOT_PLACED).await? {
        let stored_events = repo.load_events(robot_id).await?;
        let robot = command_handlers::reconstitute(robot_id, &stored_events)?;
        if let Some(view) = RobotView::from_robot(&robot) {
            robots.push(view);
        }
    }

    match request.sort {
        SortField::Placement => {}
        SortField::Id => robots.sort_by_key(|r| r.robot_id),
        SortField::X => robots.sort_by_key(|r| r.x),
        SortField::Y => robots.sort_by_key(|r| r.y),
        SortField::Facing => robots.sort_by_key(|r| r.facing),
    }

    let total_elements = robots.len();
    let content = robots
        .into_iter()
        .skip(request.page.saturating_mul(request.page_size))
        .take(request.page_size)
        .collect();

    Ok(Page {
        content,
        page: request.page,
        page_size: request.page_size,
        total_elements,
        total_pages: total_elements.div_ceil(request.page_size),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use robotposition_core::error::DomainError;
    use robotposition_core::repository::{EventRepository, StoredEvent};
    use uuid::Uuid;

    use crate::application::query_handlers::{
        PageRequest, SortField, get_robot_by_id, list_robots,
    };
    use crate::domain::events::{CommandsExecuted, RobotEventKind, RobotPlaced, RobotRemoved};
    use crate::domain::grid::Facing;
    use robotposition_test_support::{
        EmptyEventRepository, InMemoryEventRepository, RecordingEventRepository,
    };

    fn stored(robot_id: Uuid, sequence_number: i64, event_type: &str, kind: &RobotEventKind) -> StoredEvent {
        StoredEvent {
            event_id: Uuid::new_v4(),
            aggregate_id: robot_id,
            event_type: event_type.to_owned(),
            payload: serde_json::to_value(kind).unwrap(),
            sequence_number,
            correlation_id: Uuid::new_v4(),
            causation_id: Uuid::new_v4(),
            occurred_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    fn placed(robot_id: Uuid, x: i32, y: i32, facing: Facing) -> StoredEvent {
        stored(
            robot_id,
            1,
            "robot.robot_placed",
            &RobotEventKind::RobotPlaced(RobotPlaced {
                robot_id,
                x,
                y,
                facing,
            }),
        )
    }

    async fn seed(repo: &InMemoryEventRepository, robots: &[(i32, i32, Facing)]) -> Vec<Uuid> {
        let mut ids = Vec::new();
        for &(x, y, facing) in robots {
            let robot_id = Uuid::new_v4();
            repo.append_events(robot_id, 0, &[placed(robot_id, x, y, facing)])
                .await
                .unwrap();
            ids.push(robot_id);
        }
        ids
    }

    #[tokio::test]
    async fn test_get_robot_by_id_returns_latest_position() {
        // Arrange
        let robot_id = Uuid::new_v4();
        let events = vec![
            placed(robot_id, 0, 0, Facing::North),
            stored(
                robot_id,
                2,
                "robot.commands_executed",
                &RobotEventKind::CommandsExecuted(CommandsExecuted {
                    robot_id,
                    commands: "MOVE RIGHT".to_owned(),
                    x: 0,
                    y: 1,
                    facing: Facing::East,
                    ignored_tokens: 0,
                }),
            ),
        ];
        let repo = RecordingEventRepository::new(Ok(events));

        // Act
        let view = get_robot_by_id(robot_id, &repo).await.unwrap();

        // Assert
        assert_eq!(view.robot_id, robot_id);
        assert_eq!((view.x, view.y), (0, 1));
        assert_eq!(view.facing, Facing::East);
        assert_eq!(view.version, 2);
    }

    #[tokio::test]
    async fn test_get_robot_by_id_returns_not_found_when_no_events() {
        // Arrange
        let robot_id = Uuid::new_v4();

        // Act
        let result = get_robot_by_id(robot_id, &EmptyEventRepository).await;

        // Assert
        match result.unwrap_err() {
            DomainError::AggregateNotFound(id) => assert_eq!(id, robot_id),
            other => panic!("expected AggregateNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_robot_by_id_returns_not_found_after_removal() {
        // Arrange
        let robot_id = Uuid::new_v4();
        let events = vec![
            placed(robot_id, 1, 1, Facing::South),
            stored(
                robot_id,
                2,
                "robot.robot_removed",
                &RobotEventKind::RobotRemoved(RobotRemoved { robot_id }),
            ),
        ];
        let repo = RecordingEventRepository::new(Ok(events));

        // Act
        let result = get_robot_by_id(robot_id, &repo).await;

        // Assert
        assert!(matches!(result, Err(DomainError::AggregateNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_robots_pages_in_placement_order() {
        // Arrange
        let repo = InMemoryEventRepository::new();
        let ids = seed(
            &repo,
            &[
                (3, 0, Facing::North),
                (1, 4, Facing::West),
                (2, 2, Facing::East),
            ],
        )
        .await;

        // Act
        let page = list_robots(
            PageRequest {
                page: 1,
                page_size: 2,
                sort: SortField::Placement,
            },
            &repo,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].robot_id, ids[2]);
    }

    #[tokio::test]
    async fn test_list_robots_sorts_by_requested_field() {
        // Arrange
        let repo = InMemoryEventRepository::new();
        seed(
            &repo,
            &[
                (3, 0, Facing::West),
                (1, 4, Facing::North),
                (2, 2, Facing::South),
            ],
        )
        .await;

        // Act
        let by_x = list_robots(
            PageRequest {
                sort: SortField::X,
                ..PageRequest::default()
            },
            &repo,
        )
        .await
        .unwrap();
        let by_facing = list_robots(
            PageRequest {
                sort: "facingdir".parse().unwrap(),
                ..PageRequest::default()
            },
            &repo,
        )
        .await
        .unwrap();

        // Assert
        let xs: Vec<i32> = by_x.content.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![1, 2, 3]);
        let facings: Vec<Facing> = by_facing.content.iter().map(|r| r.facing).collect();
        assert_eq!(facings, vec![Facing::North, Facing::South, Facing::West]);
    }

    #[tokio::test]
    async fn test_list_robots_skips_removed_robots() {
        // Arrange
        let repo = InMemoryEventRepository::new();
        let ids = seed(&repo, &[(0, 0, Facing::North), (4, 4, Facing::South)]).await;
        repo.append_events(
            ids[0],
            1,
            &[stored(
                ids[0],
                2,
                "robot.robot_removed",
                &RobotEventKind::RobotRemoved(RobotRemoved { robot_id: ids[0] }),
            )],
        )
        .await
        .unwrap();

        // Act
        let page = list_robots(PageRequest::default(), &repo).await.unwrap();

        // Assert
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].robot_id, ids[1]);
    }

    #[tokio::test]
    async fn test_list_robots_rejects_zero_page_size() {
        let request = PageRequest {
            page_size: 0,
            ..PageRequest::default()
        };

        let result = list_robots(request, &EmptyEventRepository).await;

        match result.unwrap_err() {
            DomainError::Validation(msg) => assert_eq!(msg, "page size must be between 1 and 100"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_sort_field_rejects_unknown_names() {
        assert_eq!("ypos".parse::<SortField>().unwrap(), SortField::Y);
        assert!(matches!(
            "colour".parse::<SortField>(),
            Err(DomainError::Validation(_))
        ));
    }
}
