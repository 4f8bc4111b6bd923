//! # API Shared
//!
//! Shared definitions for the Sakhi REST surface.
//!
//! Contains:
//! - Request/response DTOs with OpenAPI schemas (`dto` module)
//! - The shared `HealthService`
//! - Session extraction from request headers (`session` module)
//!
//! Used by the `sakhi-run` binary; keeping these out of the binary lets a
//! second surface (CLI, future gRPC) reuse the same shapes.

pub mod dto;
pub mod health;
pub mod session;

pub use health::{HealthRes, HealthService};
pub use session::session_from_headers;
