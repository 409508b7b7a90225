//! Registration subsystem.
//!
//! # Data Flow
//! ```text
//! Discovered { classification, symbol }
//!     → Endpoint: bind directly at the site root
//!     → Controller: resolve definition
//!         → auto-wired: container.register_service + container.resolve
//!         → direct: descriptor constructor with declared init arguments
//!         → walk the member table, late-bind each endpoint member
//!         → bind under the controller's base path
//! ```
//!
//! # Design Decisions
//! - Member classification consults the type descriptor, never the instance
//! - A controller with no endpoint members contributes nothing and is fine
//! - Container failures propagate unchanged; no translation layer

pub mod engine;

pub use engine::{RegistrationEngine, RegistrationError};
