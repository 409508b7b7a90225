//! Declarative route registration for axum.
//!
//! Applications declare endpoints and controllers with builder calls
//! inside module providers, point a [`Server`] at their code tree, and the
//! startup pass discovers every annotated symbol, resolves final request
//! paths, constructs controllers (through a service container when
//! auto-wired) and binds each (method, path, handler) triple onto an
//! `axum::Router`.
//!
//! ```text
//! Server::new(..).auto_import(&roots)?.instance()
//!     → discovery  (scan code tree, load modules once, classify symbols)
//!     → registration (construct controllers, late-bind members)
//!     → binding    (join paths, collision-check, register with axum)
//! ```
//!
//! Dispatch, content negotiation and response serialization are axum's
//! job; dependency wiring is the container's; this crate owns the
//! declarative registration pass only.

// Core subsystems
pub mod binding;
pub mod definitions;
pub mod discovery;
pub mod registration;

// Collaborator seams
pub mod container;

// Cross-cutting concerns
pub mod config;
pub mod http;
pub mod observability;

pub use binding::{BindError, RouteBinding};
pub use config::ServerConfig;
pub use container::{ServiceContainer, SingletonContainer, UnresolvedDependencyError};
pub use definitions::{
    controller, controller_type, endpoint, DefinitionError, HttpMethod, RouteHandler,
};
pub use discovery::{ModuleExports, ModuleLoader, StaticModuleLoader};
pub use http::{Server, ServerError};
