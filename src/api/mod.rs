//! HTTP surface for the scheduling portal.
//!
//! Routes are nested under `/api/`. Protected routes pass through
//! Auth → Audit → Handler; auth, registration and health are open.
//!
//! The router is composable: `api_router()` returns a `Router`
//! that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer, ServerInfo};
pub use types::ApiContext;
