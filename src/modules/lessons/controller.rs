use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{RequireInstructor, RequireStudent};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CreateLessonRequest, LessonDetailResponse, LessonResponse, ProgressResponse,
    UpdateLessonRequest,
};
use super::service::LessonService;

/// Create a lesson under one of the caller's courses
#[utoipa::path(
    post,
    path = "/api/lessons",
    request_body = CreateLessonRequest,
    responses(
        (status = 201, description = "Lesson created successfully", body = LessonResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_lesson(
    State(state): State<AppState>,
    RequireInstructor(auth_user): RequireInstructor,
    ValidatedJson(dto): ValidatedJson<CreateLessonRequest>,
) -> Result<(StatusCode, Json<LessonResponse>), AppError> {
    let lesson = LessonService::create_lesson(&state.db, auth_user.user_id(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(LessonResponse {
            status: "success",
            message: "Lesson created successfully",
            lesson,
        }),
    ))
}

/// Get a lesson (enrolled students and the owning instructor)
#[utoipa::path(
    get,
    path = "/api/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Lesson detail", body = LessonDetailResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not enrolled or not the owner", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_lesson(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<LessonDetailResponse>, AppError> {
    let lesson =
        LessonService::get_lesson(&state.db, auth_user.user_id(), auth_user.role(), id).await?;
    Ok(Json(LessonDetailResponse {
        status: "success",
        lesson,
    }))
}

/// Mark a lesson complete (idempotent)
#[utoipa::path(
    post,
    path = "/api/lessons/{id}/complete",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Lesson marked complete", body = ProgressResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an enrolled student", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state, auth_user))]
pub async fn mark_lesson_complete(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    Path(id): Path<Uuid>,
) -> Result<Json<ProgressResponse>, AppError> {
    let progress = LessonService::mark_complete(&state.db, auth_user.user_id(), id).await?;
    Ok(Json(ProgressResponse {
        status: "success",
        message: "Lesson marked as complete",
        progress,
    }))
}

/// Update a lesson (owning instructor only)
#[utoipa::path(
    put,
    path = "/api/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    request_body = UpdateLessonRequest,
    responses(
        (status = 200, description = "Lesson updated successfully", body = LessonResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the course", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_lesson(
    State(state): State<AppState>,
    RequireInstructor(auth_user): RequireInstructor,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateLessonRequest>,
) -> Result<Json<LessonResponse>, AppError> {
    let lesson = LessonService::update_lesson(&state.db, auth_user.user_id(), id, dto).await?;
    Ok(Json(LessonResponse {
        status: "success",
        message: "Lesson updated successfully",
        lesson,
    }))
}

/// Delete a lesson (owning instructor only)
#[utoipa::path(
    delete,
    path = "/api/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Lesson deleted successfully", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the course", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    RequireInstructor(auth_user): RequireInstructor,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    LessonService::delete_lesson(&state.db, auth_user.user_id(), id).await?;
    Ok(Json(MessageResponse {
        status: "success",
        message: "Lesson deleted successfully",
    }))
}
