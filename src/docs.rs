use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::assignments::model::{
    Assignment, AssignmentDetailResponse, AssignmentListResponse, AssignmentResponse,
    CreateAssignmentRequest, GradeSubmissionRequest, MySubmissionResponse, SubmissionListResponse,
    SubmissionResponse, SubmissionWithStudent, SubmitAssignmentRequest, Submission,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    AuthResponse, LoginRequest, MessageResponse, RegisterRequest, UserResponse, VerifyResponse,
};
use crate::modules::courses::model::{
    Course, CourseDetail, CourseDetailResponse, CourseListResponse, CourseResponse, CourseSummary,
    CreateCourseRequest, Enrollment, EnrollmentResponse, MyCourse, MyCoursesResponse,
    UpdateCourseRequest,
};
use crate::modules::health::controller::HealthResponse;
use crate::modules::lessons::model::{
    CreateLessonRequest, Lesson, LessonDetail, LessonDetailResponse, LessonResponse, Progress,
    ProgressResponse, UpdateLessonRequest,
};
use crate::modules::users::model::{User, UserRole};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_current_user,
        crate::modules::auth::controller::verify_token,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_all_courses,
        crate::modules::courses::controller::get_my_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::enroll_in_course,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::get_lesson,
        crate::modules::lessons::controller::mark_lesson_complete,
        crate::modules::lessons::controller::update_lesson,
        crate::modules::lessons::controller::delete_lesson,
        crate::modules::assignments::controller::create_assignment,
        crate::modules::assignments::controller::get_assignment,
        crate::modules::assignments::controller::get_course_assignments,
        crate::modules::assignments::controller::submit_assignment,
        crate::modules::assignments::controller::get_assignment_submissions,
        crate::modules::assignments::controller::get_my_submission,
        crate::modules::assignments::controller::grade_submission,
        crate::modules::health::controller::health_check,
    ),
    components(
        schemas(
            User,
            UserRole,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserResponse,
            VerifyResponse,
            MessageResponse,
            ErrorResponse,
            Course,
            CourseSummary,
            CourseDetail,
            MyCourse,
            Enrollment,
            CreateCourseRequest,
            UpdateCourseRequest,
            CourseResponse,
            CourseListResponse,
            CourseDetailResponse,
            MyCoursesResponse,
            EnrollmentResponse,
            Lesson,
            LessonDetail,
            Progress,
            CreateLessonRequest,
            UpdateLessonRequest,
            LessonResponse,
            LessonDetailResponse,
            ProgressResponse,
            Assignment,
            Submission,
            SubmissionWithStudent,
            CreateAssignmentRequest,
            SubmitAssignmentRequest,
            GradeSubmissionRequest,
            AssignmentResponse,
            AssignmentDetailResponse,
            AssignmentListResponse,
            SubmissionResponse,
            MySubmissionResponse,
            SubmissionListResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, and token checks"),
        (name = "Courses", description = "Course catalogue, ownership, and enrollment"),
        (name = "Lessons", description = "Lesson content and completion tracking"),
        (name = "Assignments", description = "Assignments, submissions, and grading"),
        (name = "Health", description = "Service health")
    ),
    info(
        title = "Lernio API",
        version = "0.1.0",
        description = "Learning-management REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
