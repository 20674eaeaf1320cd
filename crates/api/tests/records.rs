//! Integration tests for the admin record pages and their activity log.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{admin_token, body_json, build_test_app, delete_auth, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

/// Activity writes are fire-and-forget; wait until `expected` entries land.
async fn wait_for_activity(pool: &PgPool, expected: i64) -> Vec<(String, String, Option<String>)> {
    for _ in 0..50 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM activity_logs")
            .fetch_one(pool)
            .await
            .unwrap();
        if count >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    sqlx::query_as("SELECT action, entity_type, details FROM activity_logs ORDER BY id")
        .fetch_all(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_student_logs_activity(pool: PgPool) {
    let (admin_id, token) = admin_token(&pool, "admin").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/admin/records/students",
        &token,
        json!({ "roll_number": "2021-CSE-007", "name": "M. Islam", "room_number": "204" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let entries = wait_for_activity(&pool, 1).await;
    assert_eq!(
        entries,
        vec![(
            "INSERT".to_string(),
            "student".to_string(),
            Some("Added student 2021-CSE-007".to_string()),
        )]
    );

    let (user_id,): (Option<Uuid>,) = sqlx::query_as("SELECT user_id FROM activity_logs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(user_id, Some(admin_id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_required_field_is_400_and_not_logged(pool: PgPool) {
    let (_, token) = admin_token(&pool, "admin").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/admin/records/teachers",
        &token,
        json!({ "teacher_id": "T-5", "name": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "name is required");

    tokio::time::sleep(Duration::from_millis(50)).await;
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM activity_logs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_and_delete_are_logged_with_labels(pool: PgPool) {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO site_settings (key, value) VALUES ('notice', 'old') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    let (_, token) = admin_token(&pool, "admin").await;
    let uri = format!("/api/v1/admin/records/site-settings/{id}");

    let updated = put_json_auth(build_test_app(pool.clone()), &uri, &token, json!({ "value": "new" })).await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["data"]["value"], "new");
    wait_for_activity(&pool, 1).await;

    let deleted = delete_auth(build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let entries = wait_for_activity(&pool, 2).await;
    let details: Vec<_> = entries.iter().map(|e| e.2.clone().unwrap_or_default()).collect();
    assert_eq!(
        details,
        vec!["Updated site setting notice", "Deleted site setting notice"]
    );

    let again = delete_auth(build_test_app(pool), &uri, &token).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_users_validates_role_and_uuid(pool: PgPool) {
    let (_, token) = admin_token(&pool, "super_admin").await;
    let uri = "/api/v1/admin/records/admin-users";

    let bad_uuid = post_json_auth(
        build_test_app(pool.clone()),
        uri,
        &token,
        json!({ "user_id": "not-a-uuid", "role": "admin" }),
    )
    .await;
    assert_eq!(bad_uuid.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(bad_uuid).await["error"], "user_id must be a UUID");

    let bad_role = post_json_auth(
        build_test_app(pool.clone()),
        uri,
        &token,
        json!({ "user_id": Uuid::new_v4(), "role": "owner" }),
    )
    .await;
    assert_eq!(bad_role.status(), StatusCode::BAD_REQUEST);

    let granted = Uuid::new_v4();
    let ok = post_json_auth(
        build_test_app(pool.clone()),
        uri,
        &token,
        json!({ "user_id": granted, "role": "admin" }),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::CREATED);

    let roles = body_json(
        get_auth(
            build_test_app(pool),
            "/api/v1/auth/roles",
            &common::user_token(granted),
        )
        .await,
    )
    .await;
    assert_eq!(roles["data"]["is_admin"], true);
    assert_eq!(roles["data"]["roles"][0]["role"], "admin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn activity_feed_lists_newest_first(pool: PgPool) {
    let (_, token) = admin_token(&pool, "admin").await;
    for (teacher_id, name) in [("T-1", "First"), ("T-2", "Second")] {
        let response = post_json_auth(
            build_test_app(pool.clone()),
            "/api/v1/admin/records/teachers",
            &token,
            json!({ "teacher_id": teacher_id, "name": name }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        wait_for_activity(&pool, 1).await;
    }
    wait_for_activity(&pool, 2).await;

    let feed = body_json(
        get_auth(build_test_app(pool), "/api/v1/admin/activity-logs?limit=1", &token).await,
    )
    .await;
    let entries = feed["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["details"], "Added teacher T-2");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_resource_is_404(pool: PgPool) {
    let (_, token) = admin_token(&pool, "admin").await;
    let response = get_auth(build_test_app(pool), "/api/v1/admin/records/search-logs", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
