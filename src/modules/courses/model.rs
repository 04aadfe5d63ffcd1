use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::lessons::model::Lesson;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub instructor_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Course row annotated for the catalogue listing.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct CourseSummary {
    pub id: Uuid,
    pub instructor_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub instructor_name: String,
    pub lesson_count: i64,
    pub is_enrolled: bool,
}

/// Entry in the my-courses view. `enrolled_at` is present for students,
/// `student_count` for instructors.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct MyCourse {
    pub id: Uuid,
    pub instructor_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub instructor_name: String,
    pub lesson_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrolled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_count: Option<i64>,
}

/// Course detail: header annotations plus the lessons ordered by
/// `order_index`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetail {
    pub id: Uuid,
    pub instructor_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub instructor_name: String,
    pub is_enrolled: bool,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub course: Course,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseListResponse {
    pub status: &'static str,
    pub courses: Vec<CourseSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MyCoursesResponse {
    pub status: &'static str,
    pub courses: Vec<MyCourse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    pub status: &'static str,
    pub course: CourseDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub enrollment: Enrollment,
}
