use axum::body::Body;
use axum::http::{Request, header};
use http_body_util::BodyExt;
use sqlx::PgPool;
use uuid::Uuid;

use lernio::config::cors::CorsConfig;
use lernio::config::jwt::JwtConfig;
use lernio::modules::users::model::UserRole;
use lernio::router::init_router;
use lernio::state::AppState;
use lernio::utils::jwt::create_token;
use lernio::utils::password::hash_password;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        token_expiry: 604_800,
    }
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub token: String,
}

#[allow(dead_code)]
pub async fn create_test_user(pool: &PgPool, role: UserRole) -> TestUser {
    let email = generate_unique_email();
    let password = "testpass123".to_string();
    let hashed = hash_password(&password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (email, password, full_name, role)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(&email)
    .bind(&hashed)
    .bind("Test User")
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    let token = create_token(id, role, &test_jwt_config()).unwrap();

    TestUser {
        id,
        email,
        password,
        role,
        token,
    }
}

#[allow(dead_code)]
pub async fn create_test_course(pool: &PgPool, instructor_id: Uuid, title: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO courses (instructor_id, title, description)
         VALUES ($1, $2, 'Test course description')
         RETURNING id",
    )
    .bind(instructor_id)
    .bind(title)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_lesson(
    pool: &PgPool,
    course_id: Uuid,
    title: &str,
    order_index: i32,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO lessons (course_id, title, content, order_index)
         VALUES ($1, $2, 'Test lesson content', $3)
         RETURNING id",
    )
    .bind(course_id)
    .bind(title)
    .bind(order_index)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn enroll_student(pool: &PgPool, student_id: Uuid, course_id: Uuid) {
    sqlx::query("INSERT INTO enrollments (student_id, course_id) VALUES ($1, $2)")
        .bind(student_id)
        .bind(course_id)
        .execute(pool)
        .await
        .unwrap();
}

#[allow(dead_code)]
pub async fn create_test_assignment(pool: &PgPool, course_id: Uuid, title: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO assignments (course_id, title, description)
         VALUES ($1, $2, 'Test assignment description')
         RETURNING id",
    )
    .bind(course_id)
    .bind(title)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[allow(dead_code)]
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
