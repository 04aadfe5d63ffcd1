use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lesson {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub content: String,
    /// Display ordering within the course; uniqueness is a convention, not
    /// a stored invariant.
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLessonRequest {
    pub course_id: Uuid,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    pub order_index: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLessonRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: Option<String>,
    pub order_index: Option<i32>,
}

/// Lesson as seen by an authorized caller. `completed` is reported for
/// students only (false when no progress record exists).
#[derive(Debug, Serialize, ToSchema)]
pub struct LessonDetail {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub content: String,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub course_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Per-student, per-lesson completion record.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Progress {
    pub id: Uuid,
    pub student_id: Uuid,
    pub lesson_id: Uuid,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub lesson: Lesson,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonDetailResponse {
    pub status: &'static str,
    pub lesson: LessonDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProgressResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub progress: Progress,
}
