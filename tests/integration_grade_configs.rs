mod common;

use axum::http::StatusCode;
use common::{send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_upsert_grade_config_creates_then_replaces(pool: PgPool) {
    let (status, created) = send(
        setup_test_app(pool.clone()),
        "PUT",
        "/api/grade-configs/Mathematics",
        Some(json!({ "gradingScale": { "A": 85, "B": 70, "F": 0 } })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["subject"], "Mathematics");
    assert_eq!(created["gradingScale"][0]["letter"], "A");
    assert_eq!(created["gradingScale"][0]["minPercentage"], 85.0);
    assert_eq!(created["gradingScale"][2]["letter"], "F");

    let (status, replaced) = send(
        setup_test_app(pool.clone()),
        "PUT",
        "/api/grade-configs/Mathematics",
        Some(json!({
            "gradingScale": [
                {"letter": "Pass", "minPercentage": 50},
                {"letter": "Fail", "minPercentage": 0}
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["id"], created["id"]);
    assert_eq!(replaced["gradingScale"].as_array().unwrap().len(), 2);

    let (status, body) = send(setup_test_app(pool), "GET", "/api/grade-configs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_scale_without_floor_is_422(pool: PgPool) {
    let (status, body) = send(
        setup_test_app(pool),
        "PUT",
        "/api/grade-configs/Mathematics",
        Some(json!({ "gradingScale": { "A": 90, "B": 80 } })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "gradingScale must include a threshold of 0");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_scale_with_out_of_range_threshold_is_422(pool: PgPool) {
    let (status, _) = send(
        setup_test_app(pool),
        "PUT",
        "/api/grade-configs/Mathematics",
        Some(json!({ "gradingScale": { "A": 150, "F": 0 } })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_misordered_scale_is_kept_as_given(pool: PgPool) {
    let (status, body) = send(
        setup_test_app(pool),
        "PUT",
        "/api/grade-configs/Art",
        Some(json!({ "gradingScale": { "F": 0, "A": 90 } })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gradingScale"][0]["letter"], "F");
    assert_eq!(body["gradingScale"][1]["letter"], "A");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_and_delete_grade_config(pool: PgPool) {
    let (status, _) = send(
        setup_test_app(pool.clone()),
        "GET",
        "/api/grade-configs/Geography",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(
        setup_test_app(pool.clone()),
        "PUT",
        "/api/grade-configs/Geography",
        Some(json!({ "gradingScale": { "P": 40, "F": 0 } })),
    )
    .await;

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "GET",
        "/api/grade-configs/Geography",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gradingScale"][0]["letter"], "P");

    let (status, _) = send(
        setup_test_app(pool.clone()),
        "DELETE",
        "/api/grade-configs/Geography",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        setup_test_app(pool),
        "DELETE",
        "/api/grade-configs/Geography",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No grade config for Geography");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_letters_are_trimmed_and_counted_in_characters(pool: PgPool) {
    let (status, body) = send(
        setup_test_app(pool),
        "PUT",
        "/api/grade-configs/French",
        Some(json!({ "gradingScale": { " Très ": 80, "A": 60, "F": 0 } })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gradingScale"][0]["letter"], "Très");
}
