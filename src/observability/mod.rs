//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (declaration, discovery, binding diagnostics)
//!
//! logging.rs configures the subscriber once, at Server construction.
//! ```
//!
//! # Design Decisions
//! - Structured events via tracing; the registration pass narrates itself
//! - Minimum severity comes from one environment variable, read once
//! - Re-initialization is a no-op so multiple servers can share a process

pub mod logging;
