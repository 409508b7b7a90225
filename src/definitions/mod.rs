//! Definition metadata subsystem.
//!
//! # Data Flow
//! ```text
//! Declaration time (module providers run):
//!     endpoint("/path") / controller("/base")
//!     → builder.rs (collect methods, extra args)
//!     → apply() mints a SymbolRef and attaches the definition
//!     → registry.rs (identity-keyed side table, write-once per symbol)
//!
//! Registration time:
//!     registry::classify(symbol)
//!     → Endpoint | Controller | None
//!     → definition values read back for path joining and construction
//! ```
//!
//! # Design Decisions
//! - Definitions are an explicit side table, not hidden fields on handlers
//! - A symbol carries at most one definition; a second attach is an error
//! - Mismatched metadata (endpoint on a type, controller on a callable)
//!   classifies as None instead of failing discovery

pub mod builder;
pub mod model;
pub mod registry;
pub mod symbol;

pub use builder::{
    controller, controller_type, endpoint, ControllerBuilder, ControllerTypeBuilder,
    EndpointBuilder,
};
pub use model::{ControllerDefinition, EndpointDefinition, ExtraArgs, HttpMethod, OpaqueValue};
pub use registry::{classify, Classification, Definition, DefinitionError};
pub use symbol::{ControllerInstance, ControllerType, RouteHandler, SymbolId, SymbolKind, SymbolRef};
