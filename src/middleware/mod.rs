//! Authentication and authorization extractors.
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::AuthUser`] validates the JWT and extracts claims
//! 3. [`role::RequireInstructor`] / [`role::RequireStudent`] additionally
//!    check the role claim
//! 4. Handler executes with the authenticated identity

pub mod auth;
pub mod role;
