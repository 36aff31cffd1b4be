//! API Module
//!
//! Read-only HTTP inspector for a running entity cache.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Per-cache statistics
//! - `GET /users`, `/channels`, `/messages`, `/user-states` - Snapshots (`?limit=N`)
//! - `GET /users/:id`, `/channels/:id`, `/messages/:id`, `/user-states/:channel` - Single entity
//! - `GET /find/user/:name`, `/find/channel/:name` - Lookup by name (409 when ambiguous)
//! - `GET /names/:channel` - Channel participant names

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
