use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{RequireInstructor, RequireStudent};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    AssignmentDetailResponse, AssignmentListResponse, AssignmentResponse, CreateAssignmentRequest,
    GradeSubmissionRequest, MySubmissionResponse, SubmissionListResponse, SubmissionResponse,
    SubmitAssignmentRequest,
};
use super::service::AssignmentService;

/// Create an assignment under one of the caller's courses
#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = CreateAssignmentRequest,
    responses(
        (status = 201, description = "Assignment created successfully", body = AssignmentResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_assignment(
    State(state): State<AppState>,
    RequireInstructor(auth_user): RequireInstructor,
    ValidatedJson(dto): ValidatedJson<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), AppError> {
    let assignment =
        AssignmentService::create_assignment(&state.db, auth_user.user_id(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(AssignmentResponse {
            status: "success",
            message: "Assignment created successfully",
            assignment,
        }),
    ))
}

/// Get an assignment (enrolled students and the owning instructor)
#[utoipa::path(
    get,
    path = "/api/assignments/{id}",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment detail", body = AssignmentDetailResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not enrolled or not the owner", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_assignment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AssignmentDetailResponse>, AppError> {
    let assignment =
        AssignmentService::get_assignment(&state.db, auth_user.user_id(), auth_user.role(), id)
            .await?;
    Ok(Json(AssignmentDetailResponse {
        status: "success",
        assignment,
    }))
}

/// List a course's assignments (enrolled students and the owning instructor)
#[utoipa::path(
    get,
    path = "/api/courses/{id}/assignments",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Assignments for the course", body = AssignmentListResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not enrolled or not the owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_course_assignments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AssignmentListResponse>, AppError> {
    let assignments = AssignmentService::get_course_assignments(
        &state.db,
        auth_user.user_id(),
        auth_user.role(),
        id,
    )
    .await?;
    Ok(Json(AssignmentListResponse {
        status: "success",
        assignments,
    }))
}

/// Submit an answer for an assignment (enrolled students, once)
#[utoipa::path(
    post,
    path = "/api/assignments/{id}/submissions",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    request_body = SubmitAssignmentRequest,
    responses(
        (status = 201, description = "Submission recorded", body = SubmissionResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an enrolled student", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse),
        (status = 409, description = "Already submitted", body = ErrorResponse),
        (status = 422, description = "Validation failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn submit_assignment(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<SubmitAssignmentRequest>,
) -> Result<(StatusCode, Json<SubmissionResponse>), AppError> {
    let submission = AssignmentService::submit(&state.db, auth_user.user_id(), id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            status: "success",
            message: "Assignment submitted successfully",
            submission,
        }),
    ))
}

/// List an assignment's submissions with student info (owning instructor)
#[utoipa::path(
    get,
    path = "/api/assignments/{id}/submissions",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Submissions for the assignment", body = SubmissionListResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the assignment", body = ErrorResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_assignment_submissions(
    State(state): State<AppState>,
    RequireInstructor(auth_user): RequireInstructor,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmissionListResponse>, AppError> {
    let submissions =
        AssignmentService::get_submissions(&state.db, auth_user.user_id(), id).await?;
    Ok(Json(SubmissionListResponse {
        status: "success",
        submissions,
    }))
}

/// Get the calling student's own submission for an assignment
#[utoipa::path(
    get,
    path = "/api/assignments/{id}/my-submission",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "The caller's submission", body = MySubmissionResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a student", body = ErrorResponse),
        (status = 404, description = "No submission yet", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_my_submission(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    Path(id): Path<Uuid>,
) -> Result<Json<MySubmissionResponse>, AppError> {
    let submission =
        AssignmentService::get_my_submission(&state.db, auth_user.user_id(), id).await?;
    Ok(Json(MySubmissionResponse {
        status: "success",
        submission,
    }))
}

/// Grade a submission (owning instructor; overwrites any previous grade)
#[utoipa::path(
    put,
    path = "/api/submissions/{id}/grade",
    params(("id" = Uuid, Path, description = "Submission ID")),
    request_body = GradeSubmissionRequest,
    responses(
        (status = 200, description = "Submission graded", body = SubmissionResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the course", body = ErrorResponse),
        (status = 404, description = "Submission not found", body = ErrorResponse),
        (status = 422, description = "Grade out of range", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Assignments"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn grade_submission(
    State(state): State<AppState>,
    RequireInstructor(auth_user): RequireInstructor,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<GradeSubmissionRequest>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let submission =
        AssignmentService::grade_submission(&state.db, auth_user.user_id(), id, dto).await?;
    Ok(Json(SubmissionResponse {
        status: "success",
        message: "Submission graded successfully",
        submission,
    }))
}
