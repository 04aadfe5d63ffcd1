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
    CourseDetailResponse, CourseListResponse, CourseResponse, CreateCourseRequest,
    EnrollmentResponse, MyCoursesResponse, UpdateCourseRequest,
};
use super::service::CourseService;

/// Create a course (instructors only); the caller becomes the owner
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created successfully", body = CourseResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an instructor", body = ErrorResponse),
        (status = 422, description = "Validation failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    RequireInstructor(auth_user): RequireInstructor,
    ValidatedJson(dto): ValidatedJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), AppError> {
    let course = CourseService::create_course(&state.db, auth_user.user_id(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CourseResponse {
            status: "success",
            message: "Course created successfully",
            course,
        }),
    ))
}

/// List all courses with instructor, enrollment, and lesson annotations
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Course catalogue", body = CourseListResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_all_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<CourseListResponse>, AppError> {
    let courses = CourseService::get_all_courses(&state.db, auth_user.user_id()).await?;
    Ok(Json(CourseListResponse {
        status: "success",
        courses,
    }))
}

/// List the caller's courses: enrolled for students, owned for instructors
#[utoipa::path(
    get,
    path = "/api/courses/my-courses",
    responses(
        (status = 200, description = "Role-dependent course list", body = MyCoursesResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_my_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<MyCoursesResponse>, AppError> {
    let courses =
        CourseService::get_my_courses(&state.db, auth_user.user_id(), auth_user.role()).await?;
    Ok(Json(MyCoursesResponse {
        status: "success",
        courses,
    }))
}

/// Get a course with its lessons ordered by `order_index`
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course detail", body = CourseDetailResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, auth_user))]
pub async fn get_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseDetailResponse>, AppError> {
    let course =
        CourseService::get_course(&state.db, auth_user.user_id(), auth_user.role(), id).await?;
    Ok(Json(CourseDetailResponse {
        status: "success",
        course,
    }))
}

/// Update a course (owning instructor only)
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated successfully", body = CourseResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own this course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    RequireInstructor(auth_user): RequireInstructor,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, AppError> {
    let course = CourseService::update_course(&state.db, auth_user.user_id(), id, dto).await?;
    Ok(Json(CourseResponse {
        status: "success",
        message: "Course updated successfully",
        course,
    }))
}

/// Delete a course and everything under it (owning instructor only)
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted successfully", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own this course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_course(
    State(state): State<AppState>,
    RequireInstructor(auth_user): RequireInstructor,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CourseService::delete_course(&state.db, auth_user.user_id(), id).await?;
    Ok(Json(MessageResponse {
        status: "success",
        message: "Course deleted successfully",
    }))
}

/// Enroll the calling student in a course
#[utoipa::path(
    post,
    path = "/api/courses/{id}/enroll",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 201, description = "Enrolled successfully", body = EnrollmentResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a student", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Already enrolled", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, auth_user))]
pub async fn enroll_in_course(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), AppError> {
    let enrollment = CourseService::enroll(&state.db, auth_user.user_id(), id).await?;
    Ok((
        StatusCode::CREATED,
        Json(EnrollmentResponse {
            status: "success",
            message: "Successfully enrolled in course",
            enrollment,
        }),
    ))
}
