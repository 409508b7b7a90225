//! Service container seam.
//!
//! # Responsibilities
//! - Define the contract auto-wired controllers are constructed through
//! - Ship a default construct-once singleton container
//!
//! # Design Decisions
//! - This layer never resolves dependencies itself; the container is
//!   opaque behind the trait and richer wiring can be substituted
//! - Registrations carry a factory; a real container may ignore it and do
//!   its own construction
//! - Resolution failures propagate unchanged and abort startup

pub mod singleton;

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::definitions::symbol::{ControllerInstance, ControllerType};

/// The container cannot produce an instance of the requested type.
#[derive(Debug, Error)]
#[error("cannot resolve service `{type_name}`: {reason}")]
pub struct UnresolvedDependencyError {
    pub type_name: String,
    pub reason: String,
}

/// A type handed over to the container for managed construction.
#[derive(Clone)]
pub struct ServiceRegistration {
    type_id: TypeId,
    type_name: Arc<str>,
    factory: Arc<dyn Fn() -> ControllerInstance + Send + Sync>,
}

impl ServiceRegistration {
    pub fn new(
        type_id: TypeId,
        type_name: impl Into<Arc<str>>,
        factory: Arc<dyn Fn() -> ControllerInstance + Send + Sync>,
    ) -> Self {
        Self {
            type_id,
            type_name: type_name.into(),
            factory,
        }
    }

    pub(crate) fn from_controller(controller_type: &ControllerType) -> Self {
        Self::new(
            controller_type.type_id(),
            controller_type.type_name(),
            controller_type.factory(),
        )
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn construct(&self) -> ControllerInstance {
        (self.factory)()
    }
}

impl fmt::Debug for ServiceRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistration")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// External collaborator: owns construction and lifecycle of managed
/// services. `type_name` accompanies the id for diagnostics only.
pub trait ServiceContainer: Send + Sync {
    /// Mark a type as container-managed. Registering the same type again
    /// is a no-op.
    fn register_service(&self, registration: ServiceRegistration);

    /// Construct or return the managed instance for `type_id`.
    fn resolve(
        &self,
        type_id: TypeId,
        type_name: &str,
    ) -> Result<ControllerInstance, UnresolvedDependencyError>;
}

pub use singleton::SingletonContainer;
