//! Public entry surface.
//!
//! # Data Flow
//! ```text
//! Server::new(name, debug)
//!     → observability (subscriber init, env consulted once)
//!     → auto_import(roots)
//!         → discovery → registration → binding
//!     → instance() — the underlying axum::Router, handed to the host
//! ```

pub mod server;

pub use server::{Server, ServerError};
