//! Routes for the Robot bounded context.

use axum::extract::{Path, Query, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use robotposition_robot::application::query_handlers::{self, Page, PageRequest, RobotView};
use robotposition_robot::application::command_handlers;
use robotposition_robot::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /place.
#[derive(Debug, Deserialize)]
pub struct PlaceRobotRequest {
    /// Starting column.
    pub x: i32,
    /// Starting row.
    pub y: i32,
    /// Starting facing: `NORTH`, `SOUTH`, `EAST` or `WEST`.
    pub facing: String,
}

/// Request body for POST /execute-commands.
#[derive(Debug, Deserialize)]
pub struct ExecuteCommandsRequest {
    /// The robot to move.
    pub robot_id: Uuid,
    /// Space-separated `MOVE` / `LEFT` / `RIGHT` tokens.
    pub commands: String,
}

/// Request body for POST /remove.
#[derive(Debug, Deserialize)]
pub struct RemoveRobotRequest {
    /// The robot to remove.
    pub robot_id: Uuid,
}

/// Query string for GET /.
#[derive(Debug, Default, Deserialize)]
pub struct ListRobotsQuery {
    /// Zero-based page index.
    pub page: Option<usize>,
    /// Items per page.
    pub page_size: Option<usize>,
    /// Field to order by: `id`, `x`, `y` or `facing`.
    pub sort: Option<String>,
}

impl ListRobotsQuery {
    fn into_page_request(self) -> Result<PageRequest, ApiError> {
        let defaults = PageRequest::default();
        Ok(PageRequest {
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
            sort: match self.sort {
                Some(field) => field.parse()?,
                None => defaults.sort,
            },
        })
    }
}

/// Response body returned after a command is successfully handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// IDs of the domain events produced and persisted.
    pub event_ids: Vec<Uuid>,
}

/// Response body returned after a robot is placed.
#[derive(Debug, Serialize)]
pub struct PlaceRobotResponse {
    /// The new robot's identifier.
    pub robot_id: Uuid,
    /// IDs of the domain events produced and persisted.
    pub event_ids: Vec<Uuid>,
}

/// POST /place
#[instrument(skip(state, request), fields(x = request.x, y = request.y, facing = %request.facing))]
async fn place_robot(
    State(state): State<AppState>,
    Json(request): Json<PlaceRobotRequest>,
) -> Result<Json<PlaceRobotResponse>, ApiError> {
    let command = commands::PlaceRobot {
        correlation_id: Uuid::new_v4(),
        robot_id: Uuid::new_v4(),
        x: request.x,
        y: request.y,
        facing: request.facing,
    };

    info!(correlation_id = %command.correlation_id, robot_id = %command.robot_id, "handling place_robot command");

    let stored_events = command_handlers::handle_place_robot(
        &command,
        &state.interpreter,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    let event_ids = stored_events.iter().map(|e| e.event_id).collect();

    Ok(Json(PlaceRobotResponse {
        robot_id: command.robot_id,
        event_ids,
    }))
}

/// POST /execute-commands
#[instrument(skip(state, request), fields(robot_id = %request.robot_id))]
async fn execute_commands(
    State(state): State<AppState>,
    Json(request): Json<ExecuteCommandsRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::ExecuteCommands {
        correlation_id: Uuid::new_v4(),
        robot_id: request.robot_id,
        commands: request.commands,
    };

    info!(correlation_id = %command.correlation_id, "handling execute_commands command");

    let stored_events = command_handlers::handle_execute_commands(
        &command,
        &state.interpreter,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    let event_ids = stored_events.iter().map(|e| e.event_id).collect();

    Ok(Json(CommandResponse { event_ids }))
}

/// POST /remove
#[instrument(skip(state, request), fields(robot_id = %request.robot_id))]
async fn remove_robot(
    State(state): State<AppState>,
    Json(request): Json<RemoveRobotRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::RemoveRobot {
        correlation_id: Uuid::new_v4(),
        robot_id: request.robot_id,
    };

    info!(correlation_id = %command.correlation_id, "handling remove_robot command");

    let stored_events = command_handlers::handle_remove_robot(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    let event_ids = stored_events.iter().map(|e| e.event_id).collect();

    Ok(Json(CommandResponse { event_ids }))
}

/// GET /{robot_id}
#[instrument(skip(state))]
async fn get_robot(
    State(state): State<AppState>,
    Path(robot_id): Path<Uuid>,
) -> Result<Json<RobotView>, ApiError> {
    let view = query_handlers::get_robot_by_id(robot_id, &*state.event_repository).await?;
    Ok(Json(view))
}

/// GET /
#[instrument(skip(state))]
async fn list_robots(
    State(state): State<AppState>,
    Query(query): Query<ListRobotsQuery>,
) -> Result<Json<Page<RobotView>>, ApiError> {
    let request = query.into_page_request()?;
    let page = query_handlers::list_robots(request, &*state.event_repository).await?;
    Ok(Json(page))
}

/// Returns the router for the robot context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_robots))
        .route("/place", post(place_robot))
        .route("/execute-commands", post(execute_commands))
        .route("/remove", post(remove_robot))
        .route("/{robot_id}", get(get_robot))
}
