mod common;

use axum::http::StatusCode;
use common::{create_test_student, send, setup_test_app};
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

fn grade_body(student_id: Uuid, subject: &str, score: f64, date: &str) -> Value {
    json!({
        "studentId": student_id,
        "subject": subject,
        "assessmentType": "Test",
        "score": score,
        "maxScore": 100,
        "date": date
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_grade_defaults_weight(pool: PgPool) {
    let student_id = create_test_student(&pool).await;

    let (status, body) = send(
        setup_test_app(pool),
        "POST",
        "/api/grades",
        Some(json!({
            "studentId": student_id,
            "subject": " Biology ",
            "assessmentType": "Homework",
            "score": 7.5,
            "maxScore": 10
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["subject"], "Biology");
    assert_eq!(body["weight"], 1.0);
    assert_eq!(body["score"], 7.5);
    assert!(body["date"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_grade_for_unknown_student_is_404(pool: PgPool) {
    let (status, body) = send(
        setup_test_app(pool),
        "POST",
        "/api/grades",
        Some(grade_body(Uuid::new_v4(), "Biology", 50.0, "2024-01-10T09:00:00Z")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_grade_score_above_max_is_422(pool: PgPool) {
    let student_id = create_test_student(&pool).await;

    let (status, body) = send(
        setup_test_app(pool),
        "POST",
        "/api/grades",
        Some(grade_body(student_id, "Biology", 120.0, "2024-01-10T09:00:00Z")),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "score must not exceed maxScore");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_grade_with_string_score_is_400(pool: PgPool) {
    let student_id = create_test_student(&pool).await;

    let (status, _) = send(
        setup_test_app(pool),
        "POST",
        "/api/grades",
        Some(json!({
            "studentId": student_id,
            "subject": "Biology",
            "assessmentType": "Test",
            "score": "ninety",
            "maxScore": 100
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_grades_filters_by_student_and_subject(pool: PgPool) {
    let first = create_test_student(&pool).await;
    let second = create_test_student(&pool).await;

    for body in [
        grade_body(first, "Biology", 60.0, "2024-01-10T09:00:00Z"),
        grade_body(first, "Biology", 80.0, "2024-02-10T09:00:00Z"),
        grade_body(first, "History", 70.0, "2024-01-15T09:00:00Z"),
        grade_body(second, "Biology", 90.0, "2024-01-12T09:00:00Z"),
    ] {
        let (status, _) = send(setup_test_app(pool.clone()), "POST", "/api/grades", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        setup_test_app(pool.clone()),
        "GET",
        &format!("/api/grades?student_id={}&subject=Biology", first),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["score"], 80.0);
    assert_eq!(body["meta"]["total"], 2);

    let (_, body) = send(
        setup_test_app(pool),
        "GET",
        "/api/grades?from=2024-01-11&to=2024-01-31",
        None,
    )
    .await;
    assert_eq!(body["meta"]["total"], 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_and_delete_grade(pool: PgPool) {
    let student_id = create_test_student(&pool).await;
    let (_, created) = send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/grades",
        Some(grade_body(student_id, "Art", 55.0, "2024-03-01T09:00:00Z")),
    )
    .await;
    let uri = format!("/api/grades/{}", created["id"].as_str().unwrap());

    let (status, body) = send(setup_test_app(pool.clone()), "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subject"], "Art");

    let (status, _) = send(setup_test_app(pool.clone()), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(setup_test_app(pool), "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_grades_with_huge_page_or_offset(pool: PgPool) {
    let student_id = create_test_student(&pool).await;
    send(
        setup_test_app(pool.clone()),
        "POST",
        "/api/grades",
        Some(grade_body(student_id, "Art", 55.0, "2024-03-01T09:00:00Z")),
    )
    .await;

    for query in ["page=9223372036854775807", "offset=9223372036854775807"] {
        let (status, body) = send(
            setup_test_app(pool.clone()),
            "GET",
            &format!("/api/grades?{}", query),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["meta"]["hasMore"], false);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_grades_malformed_query_is_400(pool: PgPool) {
    let (status, body) = send(setup_test_app(pool), "GET", "/api/grades?limit=ten", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
