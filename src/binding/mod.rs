//! Binding subsystem.
//!
//! # Data Flow
//! ```text
//! (base path, endpoint definition, handler)
//!     → path.rs (pure join: one separator at the boundary)
//!     → binder.rs (collision check per declared method)
//!     → ExternalRouter::route(method, path, handler)
//!     → route table entry + one diagnostic event per binding
//! ```
//!
//! # Design Decisions
//! - The external router is behind a trait; tests use a recording fake
//! - A duplicate (method, path) with a distinct handler fails fast instead
//!   of letting the last registration silently win
//! - The route table is append-only during the pass, immutable afterwards

pub mod binder;
pub mod path;

pub use binder::{AxumRouter, BindError, ExternalRouter, RouteBinder, RouteBinding};
pub use path::join_paths;
