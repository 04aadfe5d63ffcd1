//! Feature modules. Each follows the same structure: `controller.rs` (HTTP
//! handlers), `service.rs` (business logic against the injected pool),
//! `model.rs` (entities and DTOs), `router.rs`.

pub mod assignments;
pub mod auth;
pub mod courses;
pub mod health;
pub mod lessons;
pub mod users;
