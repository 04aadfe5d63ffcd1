use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::assignments::controller::get_course_assignments;
use crate::state::AppState;

use super::controller::{
    create_course, delete_course, enroll_in_course, get_all_courses, get_course, get_my_courses,
    update_course,
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course).get(get_all_courses))
        .route("/my-courses", get(get_my_courses))
        .route(
            "/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/{id}/enroll", post(enroll_in_course))
        .route("/{id}/assignments", get(get_course_assignments))
}
