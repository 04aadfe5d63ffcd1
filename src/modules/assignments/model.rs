use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: String,
    pub due_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssignmentRequest {
    pub course_id: Uuid,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitAssignmentRequest {
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GradeSubmissionRequest {
    #[validate(range(min = 0, max = 100, message = "Grade must be between 0 and 100"))]
    pub grade: i32,
}

/// A student's answer to an assignment. `grade` stays null until an
/// instructor grades it.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Submission {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub student_id: Uuid,
    pub content: String,
    pub submitted_at: DateTime<Utc>,
    pub grade: Option<i32>,
}

/// Submission annotated with the submitting student, for the instructor's
/// review listing.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct SubmissionWithStudent {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub student_id: Uuid,
    pub content: String,
    pub submitted_at: DateTime<Utc>,
    pub grade: Option<i32>,
    pub student_name: String,
    pub student_email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub assignment: Assignment,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentDetailResponse {
    pub status: &'static str,
    pub assignment: Assignment,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentListResponse {
    pub status: &'static str,
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub submission: Submission,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MySubmissionResponse {
    pub status: &'static str,
    pub submission: Submission,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionListResponse {
    pub status: &'static str,
    pub submissions: Vec<SubmissionWithStudent>,
}
