mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use common::{
    create_test_course, create_test_lesson, create_test_user, enroll_student, json_request,
    response_json, setup_test_app,
};
use lernio::modules::users::model::UserRole;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lesson_as_owner(pool: PgPool) {
    let instructor = create_test_user(&pool, UserRole::Instructor).await;
    let course = create_test_course(&pool, instructor.id, "Course").await;

    let app = setup_test_app(pool.clone());

    let request = json_request(
        "POST",
        "/api/lessons",
        Some(&instructor.token),
        Some(json!({
            "course_id": course,
            "title": "Variables",
            "content": "Let bindings are immutable by default.",
            "order_index": 1
        })),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["lesson"]["title"], "Variables");
    assert_eq!(body["lesson"]["course_id"], course.to_string());
    assert_eq!(body["lesson"]["order_index"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lesson_as_non_owner(pool: PgPool) {
    let owner = create_test_user(&pool, UserRole::Instructor).await;
    let intruder = create_test_user(&pool, UserRole::Instructor).await;
    let course = create_test_course(&pool, owner.id, "Course").await;

    let app = setup_test_app(pool.clone());

    let request = json_request(
        "POST",
        "/api/lessons",
        Some(&intruder.token),
        Some(json!({
            "course_id": course,
            "title": "Sneaky",
            "content": "Should not land.",
            "order_index": 1
        })),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lesson_as_student(pool: PgPool) {
    let instructor = create_test_user(&pool, UserRole::Instructor).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let course = create_test_course(&pool, instructor.id, "Course").await;

    let app = setup_test_app(pool.clone());

    let request = json_request(
        "POST",
        "/api/lessons",
        Some(&student.token),
        Some(json!({
            "course_id": course,
            "title": "Nope",
            "content": "Students cannot author lessons.",
            "order_index": 1
        })),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lesson_missing_course(pool: PgPool) {
    let instructor = create_test_user(&pool, UserRole::Instructor).await;
    let app = setup_test_app(pool.clone());

    let request = json_request(
        "POST",
        "/api/lessons",
        Some(&instructor.token),
        Some(json!({
            "course_id": Uuid::new_v4(),
            "title": "Orphan",
            "content": "No course to hold this.",
            "order_index": 1
        })),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_lesson_requires_enrollment(pool: PgPool) {
    let instructor = create_test_user(&pool, UserRole::Instructor).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let course = create_test_course(&pool, instructor.id, "Course").await;
    let lesson = create_test_lesson(&pool, course, "Gated Lesson", 1).await;

    let app = setup_test_app(pool.clone());
    let uri = format!("/api/lessons/{}", lesson);

    // Before enrolling: 403.
    let response = app
        .clone()
        .oneshot(json_request("GET", &uri, Some(&student.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    enroll_student(&pool, student.id, course).await;

    // After enrolling: 200 with the completion flag defaulting to false.
    let response = app
        .oneshot(json_request("GET", &uri, Some(&student.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["lesson"]["title"], "Gated Lesson");
    assert_eq!(body["lesson"]["course_title"], "Course");
    assert_eq!(body["lesson"]["completed"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_lesson_as_owning_instructor(pool: PgPool) {
    let instructor = create_test_user(&pool, UserRole::Instructor).await;
    let course = create_test_course(&pool, instructor.id, "Course").await;
    let lesson = create_test_lesson(&pool, course, "Lesson", 1).await;

    let app = setup_test_app(pool.clone());

    let request = json_request(
        "GET",
        &format!("/api/lessons/{}", lesson),
        Some(&instructor.token),
        None,
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    // Completion is a student concern; instructors don't get the flag.
    assert!(body["lesson"].get("completed").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_lesson_as_non_owning_instructor(pool: PgPool) {
    let owner = create_test_user(&pool, UserRole::Instructor).await;
    let intruder = create_test_user(&pool, UserRole::Instructor).await;
    let course = create_test_course(&pool, owner.id, "Course").await;
    let lesson = create_test_lesson(&pool, course, "Lesson", 1).await;

    let app = setup_test_app(pool.clone());

    let request = json_request(
        "GET",
        &format!("/api/lessons/{}", lesson),
        Some(&intruder.token),
        None,
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_lesson_not_found(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool.clone());

    let request = json_request(
        "GET",
        &format!("/api/lessons/{}", Uuid::new_v4()),
        Some(&student.token),
        None,
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_complete_idempotent(pool: PgPool) {
    let instructor = create_test_user(&pool, UserRole::Instructor).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let course = create_test_course(&pool, instructor.id, "Course").await;
    let lesson = create_test_lesson(&pool, course, "Lesson", 1).await;
    enroll_student(&pool, student.id, course).await;

    let app = setup_test_app(pool.clone());
    let uri = format!("/api/lessons/{}/complete", lesson);

    let response = app
        .clone()
        .oneshot(json_request("POST", &uri, Some(&student.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let first = response_json(response).await;
    assert_eq!(first["progress"]["completed"], true);
    assert!(first["progress"]["completed_at"].is_string());

    let response = app
        .oneshot(json_request("POST", &uri, Some(&student.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let second = response_json(response).await;
    assert_eq!(second["progress"]["completed"], true);

    // Same row, same timestamp: repeated completion is a no-op.
    assert_eq!(first["progress"]["id"], second["progress"]["id"]);
    assert_eq!(
        first["progress"]["completed_at"],
        second["progress"]["completed_at"]
    );

    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM progress WHERE student_id = $1 AND lesson_id = $2",
    )
    .bind(student.id)
    .bind(lesson)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_complete_requires_enrollment(pool: PgPool) {
    let instructor = create_test_user(&pool, UserRole::Instructor).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let course = create_test_course(&pool, instructor.id, "Course").await;
    let lesson = create_test_lesson(&pool, course, "Lesson", 1).await;

    let app = setup_test_app(pool.clone());

    let request = json_request(
        "POST",
        &format!("/api/lessons/{}/complete", lesson),
        Some(&student.token),
        None,
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_complete_as_instructor_forbidden(pool: PgPool) {
    let instructor = create_test_user(&pool, UserRole::Instructor).await;
    let course = create_test_course(&pool, instructor.id, "Course").await;
    let lesson = create_test_lesson(&pool, course, "Lesson", 1).await;

    let app = setup_test_app(pool.clone());

    let request = json_request(
        "POST",
        &format!("/api/lessons/{}/complete", lesson),
        Some(&instructor.token),
        None,
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_lesson_ownership(pool: PgPool) {
    let owner = create_test_user(&pool, UserRole::Instructor).await;
    let intruder = create_test_user(&pool, UserRole::Instructor).await;
    let course = create_test_course(&pool, owner.id, "Course").await;
    let lesson = create_test_lesson(&pool, course, "Original", 1).await;

    let app = setup_test_app(pool.clone());
    let uri = format!("/api/lessons/{}", lesson);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            Some(&intruder.token),
            Some(json!({"title": "Hijacked"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(json_request(
            "PUT",
            &uri,
            Some(&owner.token),
            Some(json!({"title": "Renamed", "order_index": 5})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["lesson"]["title"], "Renamed");
    assert_eq!(body["lesson"]["order_index"], 5);
    assert_eq!(body["lesson"]["content"], "Test lesson content");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_lesson_ownership(pool: PgPool) {
    let owner = create_test_user(&pool, UserRole::Instructor).await;
    let intruder = create_test_user(&pool, UserRole::Instructor).await;
    let course = create_test_course(&pool, owner.id, "Course").await;
    let lesson = create_test_lesson(&pool, course, "Lesson", 1).await;

    let app = setup_test_app(pool.clone());
    let uri = format!("/api/lessons/{}", lesson);

    let response = app
        .clone()
        .oneshot(json_request("DELETE", &uri, Some(&intruder.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(json_request("DELETE", &uri, Some(&owner.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lessons WHERE id = $1")
        .bind(lesson)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

/// The full scenario: instructor builds a course, student enrolls, views,
/// and completes a lesson through the public API alone.
#[sqlx::test(migrations = "./migrations")]
async fn test_student_lesson_flow(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "email": "a@x.com",
                "password": "secret1",
                "full_name": "Instructor A",
                "role": "instructor"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let instructor = response_json(response).await;
    let instructor_token = instructor["token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/courses",
            Some(&instructor_token),
            Some(json!({"title": "Intro", "description": "First steps"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let course = response_json(response).await;
    let course_id = course["course"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/lessons",
            Some(&instructor_token),
            Some(json!({
                "course_id": course_id,
                "title": "Lesson One",
                "content": "Welcome aboard.",
                "order_index": 1
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let lesson = response_json(response).await;
    let lesson_id = lesson["lesson"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "email": "b@x.com",
                "password": "secret2",
                "full_name": "Student B",
                "role": "student"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let student = response_json(response).await;
    let student_token = student["token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/courses/{}/enroll", course_id),
            Some(&student_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/lessons/{}", lesson_id),
            Some(&student_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["lesson"]["completed"], false);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/lessons/{}/complete", lesson_id),
            Some(&student_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/lessons/{}", lesson_id),
            Some(&student_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["lesson"]["completed"], true);
}
