//! API layer - HTTP endpoints and middleware

pub mod admin;
pub mod health;
pub mod middleware;
pub mod router;
pub mod state;
pub mod types;
pub mod upload;

pub use middleware::RequireAdmin;
pub use router::create_router;
pub use state::AppState;
