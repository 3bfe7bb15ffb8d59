//! Integration tests for the robot endpoints against PostgreSQL.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn test_place_and_get_robot(pool: PgPool) {
    let app = common::build_test_app(pool);

    let robot_id = common::place_robot(app.clone(), 1, 2, "EAST").await;
    let (status, json) = common::get_json(app, &format!("/api/v1/robots/{robot_id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["robot_id"], robot_id);
    assert_eq!(json["x"], 1);
    assert_eq!(json["y"], 2);
    assert_eq!(json["facing"], "EAST");
    assert_eq!(json["version"], 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_place_rejects_unknown_facing(pool: PgPool) {
    let app = common::build_test_app(pool);

    let (status, json) = common::post_json(
        app,
        "/api/v1/robots/place",
        &serde_json::json!({ "x": 0, "y": 0, "facing": "UP" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_execute_commands_moves_robot(pool: PgPool) {
    let app = common::build_test_app(pool);
    let robot_id = common::place_robot(app.clone(), 0, 0, "NORTH").await;

    let (status, json) = common::post_json(
        app.clone(),
        "/api/v1/robots/execute-commands",
        &serde_json::json!({ "robot_id": robot_id, "commands": "MOVE MOVE RIGHT MOVE" }),
    )
    .await;
    let (_, view) = common::get_json(app, &format!("/api/v1/robots/{robot_id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["event_ids"].as_array().unwrap().len(), 1);
    assert_eq!(view["x"], 1);
    assert_eq!(view["y"], 2);
    assert_eq!(view["facing"], "EAST");
    assert_eq!(view["version"], 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_execute_commands_ignores_unknown_tokens(pool: PgPool) {
    let app = common::build_test_app(pool);
    let robot_id = common::place_robot(app.clone(), 2, 2, "WEST").await;

    let (status, _) = common::post_json(
        app.clone(),
        "/api/v1/robots/execute-commands",
        &serde_json::json!({ "robot_id": robot_id, "commands": "JUMP MOVE  move" }),
    )
    .await;
    let (_, view) = common::get_json(app, &format!("/api/v1/robots/{robot_id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["x"], 1);
    assert_eq!(view["y"], 2);
    assert_eq!(view["facing"], "WEST");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_illegal_move_is_rejected_and_state_is_unchanged(pool: PgPool) {
    let app = common::build_test_app(pool);
    let robot_id = common::place_robot(app.clone(), 4, 4, "NORTH").await;

    let (status, json) = common::post_json(
        app.clone(),
        "/api/v1/robots/execute-commands",
        &serde_json::json!({ "robot_id": robot_id, "commands": "RIGHT MOVE" }),
    )
    .await;
    let (_, view) = common::get_json(app, &format!("/api/v1/robots/{robot_id}")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "command_rejected");
    assert_eq!(
        json["message"],
        "command rejected: illegal move: robot cannot move east"
    );
    assert_eq!(view["x"], 4);
    assert_eq!(view["y"], 4);
    assert_eq!(view["facing"], "NORTH");
    assert_eq!(view["version"], 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_execute_commands_on_unknown_robot_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let (status, json) = common::post_json(
        app,
        "/api/v1/robots/execute-commands",
        &serde_json::json!({ "robot_id": uuid::Uuid::new_v4(), "commands": "MOVE" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "aggregate_not_found");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_removed_robot_is_gone(pool: PgPool) {
    let app = common::build_test_app(pool);
    let robot_id = common::place_robot(app.clone(), 3, 1, "SOUTH").await;

    let (status, _) = common::post_json(
        app.clone(),
        "/api/v1/robots/remove",
        &serde_json::json!({ "robot_id": robot_id }),
    )
    .await;
    let (get_status, _) =
        common::get_json(app.clone(), &format!("/api/v1/robots/{robot_id}")).await;
    let (again_status, _) = common::post_json(
        app,
        "/api/v1/robots/remove",
        &serde_json::json!({ "robot_id": robot_id }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(get_status, StatusCode::NOT_FOUND);
    assert_eq!(again_status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_robots_sorted_and_paged(pool: PgPool) {
    let app = common::build_test_app(pool);
    for x in [4, 0, 2] {
        common::place_robot(app.clone(), x, 0, "NORTH").await;
    }

    let (status, first) =
        common::get_json(app.clone(), "/api/v1/robots?page=0&page_size=2&sort=x").await;
    let (_, second) = common::get_json(app, "/api/v1/robots?page=1&page_size=2&sort=x").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["total_elements"], 3);
    assert_eq!(first["total_pages"], 2);
    assert_eq!(first["content"][0]["x"], 0);
    assert_eq!(first["content"][1]["x"], 2);
    assert_eq!(second["content"].as_array().unwrap().len(), 1);
    assert_eq!(second["content"][0]["x"], 4);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_robots_rejects_oversized_page(pool: PgPool) {
    let app = common::build_test_app(pool);

    let (status, json) = common::get_json(app, "/api/v1/robots?page_size=101").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "validation error: page size must be between 1 and 100");
}
