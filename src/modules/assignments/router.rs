use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use super::controller::{
    create_assignment, get_assignment, get_assignment_submissions, get_my_submission,
    grade_submission, submit_assignment,
};

pub fn init_assignments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_assignment))
        .route("/{id}", get(get_assignment))
        .route(
            "/{id}/submissions",
            post(submit_assignment).get(get_assignment_submissions),
        )
        .route("/{id}/my-submission", get(get_my_submission))
}

pub fn init_submissions_router() -> Router<AppState> {
    Router::new().route("/{id}/grade", put(grade_submission))
}
