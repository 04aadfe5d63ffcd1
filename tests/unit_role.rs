use lernio::middleware::auth::AuthUser;
use lernio::middleware::role::check_role;
use lernio::modules::auth::model::Claims;
use lernio::modules::users::model::UserRole;
use uuid::Uuid;

fn create_test_auth_user(role: UserRole) -> AuthUser {
    AuthUser(Claims {
        user_id: Uuid::new_v4(),
        role,
        exp: 9999999999,
        iat: 1234567890,
    })
}

#[test]
fn test_check_role_exact_match() {
    let auth_user = create_test_auth_user(UserRole::Student);
    assert!(check_role(&auth_user, UserRole::Student).is_ok());

    let auth_user = create_test_auth_user(UserRole::Instructor);
    assert!(check_role(&auth_user, UserRole::Instructor).is_ok());
}

#[test]
fn test_check_role_no_match() {
    let auth_user = create_test_auth_user(UserRole::Student);
    assert!(check_role(&auth_user, UserRole::Instructor).is_err());

    let auth_user = create_test_auth_user(UserRole::Instructor);
    assert!(check_role(&auth_user, UserRole::Student).is_err());
}

#[test]
fn test_check_role_returns_forbidden() {
    let auth_user = create_test_auth_user(UserRole::Student);
    let err = check_role(&auth_user, UserRole::Instructor).unwrap_err();

    assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
}

#[test]
fn test_auth_user_helpers() {
    let student = create_test_auth_user(UserRole::Student);
    assert!(student.is_student());
    assert!(!student.is_instructor());
    assert_eq!(student.role(), UserRole::Student);

    let instructor = create_test_auth_user(UserRole::Instructor);
    assert!(instructor.is_instructor());
    assert!(!instructor.is_student());
    assert_eq!(instructor.role(), UserRole::Instructor);
}

#[test]
fn test_auth_user_user_id() {
    let user_id = Uuid::new_v4();
    let auth_user = AuthUser(Claims {
        user_id,
        role: UserRole::Student,
        exp: 9999999999,
        iat: 1234567890,
    });

    assert_eq!(auth_user.user_id(), user_id);
}

#[test]
fn test_role_as_str() {
    assert_eq!(UserRole::Student.as_str(), "student");
    assert_eq!(UserRole::Instructor.as_str(), "instructor");
}
