//! Server facade.
//!
//! # Responsibilities
//! - Tie discovery, registration and binding into one startup pass
//! - Own the axum router being assembled and the recorded route table
//! - Give each server in the process a stable index and a GUID
//!
//! # Design Decisions
//! - Fail fast: any error in the pass aborts startup, no partial tables
//! - The pass is synchronous and runs before the host starts serving
//! - `instance()` hands the router over; dispatch is axum's job from there

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::Lazy;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::binding::binder::{AxumRouter, RouteBinder, RouteBinding};
use crate::config::schema::ServerConfig;
use crate::container::{ServiceContainer, SingletonContainer};
use crate::discovery::engine::DiscoveryError;
use crate::discovery::loader::{ModuleLoader, StaticModuleLoader};
use crate::observability::logging;
use crate::registration::engine::{RegistrationEngine, RegistrationError};

static SERVER_COUNT: Lazy<Mutex<u64>> = Lazy::new(|| Mutex::new(0));

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to resolve the search root: {0}")]
    SearchRoot(#[from] std::io::Error),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

/// One registration pass and the router it produces.
pub struct Server {
    name: Option<String>,
    debug: bool,
    instance_index: u64,
    guid: Uuid,
    search_root: Option<PathBuf>,
    loader: Arc<dyn ModuleLoader>,
    container: Arc<dyn ServiceContainer>,
    binder: RouteBinder<AxumRouter>,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("name", &self.name)
            .field("debug", &self.debug)
            .field("instance_index", &self.instance_index)
            .field("guid", &self.guid)
            .field("search_root", &self.search_root)
            .finish_non_exhaustive()
    }
}

impl Server {
    /// Construct a server. Reads the log-level environment here, once.
    pub fn new(name: Option<&str>, debug: bool) -> Self {
        let instance_index = {
            let mut count = SERVER_COUNT.lock().unwrap_or_else(PoisonError::into_inner);
            let index = *count;
            *count += 1;
            index
        };

        logging::init(debug);

        let guid = Uuid::new_v4();
        tracing::debug!(
            name = name.unwrap_or("Server"),
            index = instance_index,
            guid = %guid,
            "server constructed"
        );

        Self {
            name: name.map(String::from),
            debug,
            instance_index,
            guid,
            search_root: None,
            loader: Arc::new(StaticModuleLoader::new()),
            container: Arc::new(SingletonContainer::new()),
            binder: RouteBinder::new(AxumRouter::new()),
        }
    }

    /// Construct from a validated configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        let server = Self::new(config.name.as_deref(), config.debug);
        match &config.scan.search_root {
            Some(search_root) => server.with_search_root(search_root),
            None => server,
        }
    }

    /// Use a specific module loader instead of the default empty registry.
    pub fn with_loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    /// Use a specific service container instead of the default singleton
    /// container.
    pub fn with_container(mut self, container: impl ServiceContainer + 'static) -> Self {
        self.container = Arc::new(container);
        self
    }

    /// Resolve scan roots against this directory instead of the working
    /// directory.
    pub fn with_search_root(mut self, search_root: impl Into<PathBuf>) -> Self {
        self.search_root = Some(search_root.into());
        self
    }

    /// Run one discovery + registration pass over `roots`. Empty roots
    /// derive defaults from the code tree itself.
    pub fn auto_import(mut self, roots: &[&str]) -> Result<Self, ServerError> {
        let search_root = match &self.search_root {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };
        let roots: Vec<String> = roots.iter().map(|root| root.to_string()).collect();

        tracing::debug!(
            server = self.name.as_deref().unwrap_or("Server"),
            index = self.instance_index,
            search_root = %search_root.display(),
            "auto import"
        );

        let discovery = crate::discovery::discover(self.loader.clone(), &roots, &search_root);
        let container = self.container.clone();
        let mut engine = RegistrationEngine::new(&mut self.binder, container);
        for item in discovery {
            let discovered = item?;
            engine.register(&discovered)?;
        }

        tracing::info!(
            server = self.name.as_deref().unwrap_or("Server"),
            index = self.instance_index,
            routes = self.binder.routes().len(),
            "registration complete"
        );
        Ok(self)
    }

    /// The route table built by `auto_import`.
    pub fn routes(&self) -> &[RouteBinding] {
        self.binder.routes()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Position of this server among all servers constructed in the
    /// process.
    pub fn instance_index(&self) -> u64 {
        self.instance_index
    }

    pub fn guid(&self) -> Uuid {
        self.guid
    }

    /// Hand over the underlying router for the host process to serve.
    pub fn instance(self) -> axum::Router {
        self.binder
            .into_router()
            .into_inner()
            .layer(TraceLayer::new_for_http())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_indices_increase_monotonically() {
        let first = Server::new(Some("a"), false);
        let second = Server::new(Some("b"), false);
        assert!(second.instance_index() > first.instance_index());
        assert_ne!(first.guid(), second.guid());
    }

    #[test]
    fn a_fresh_server_has_no_routes() {
        let server = Server::new(None, false);
        assert!(server.routes().is_empty());
    }
}
