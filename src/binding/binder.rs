//! Route binding.
//!
//! # Responsibilities
//! - Register each (method, path, handler) triple with the external router
//! - Keep the internal route table for validation and testing
//! - Detect duplicate (method, path) registrations before they reach the
//!   router
//!
//! # Design Decisions
//! - One router call per triple, never repeated; no retries
//! - Collisions fail the whole pass; last-wins would hide real mistakes
//! - Method tokens convert to the router's verb vocabulary here and
//!   nowhere else

use std::collections::HashMap;

use axum::body::Body;
use axum::http::Request;
use axum::routing::{on, MethodFilter};
use thiserror::Error;

use crate::binding::path::join_paths;
use crate::definitions::model::{EndpointDefinition, HttpMethod};
use crate::definitions::symbol::RouteHandler;

#[derive(Debug, Error)]
pub enum BindError {
    /// Two distinct handlers claimed the same (method, path).
    #[error("route {method} {path} is already bound to {existing}; cannot bind {duplicate}")]
    RouteCollision {
        method: HttpMethod,
        path: String,
        existing: String,
        duplicate: String,
    },
    /// The router cannot accept this path.
    #[error("router rejected path {path:?}: {reason}")]
    MalformedPath { path: String, reason: &'static str },
}

/// One entry of the built route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteBinding {
    pub method: HttpMethod,
    pub path: String,
    pub handler: String,
}

/// External collaborator: accepts one handler per (method, path) and owns
/// all request dispatch from then on.
pub trait ExternalRouter {
    fn route(
        &mut self,
        method: HttpMethod,
        path: &str,
        handler: RouteHandler,
    ) -> Result<(), BindError>;
}

/// Joins paths, checks collisions, registers with the router and records
/// the route table.
pub struct RouteBinder<R> {
    router: R,
    table: Vec<RouteBinding>,
    bound: HashMap<(HttpMethod, String), String>,
}

impl<R: ExternalRouter> RouteBinder<R> {
    pub fn new(router: R) -> Self {
        Self {
            router,
            table: Vec::new(),
            bound: HashMap::new(),
        }
    }

    /// Bind `handler` under `base_path` for every method the definition
    /// declares, in declaration order.
    pub fn bind(
        &mut self,
        base_path: Option<&str>,
        definition: &EndpointDefinition,
        handler: RouteHandler,
    ) -> Result<(), BindError> {
        let path = join_paths(base_path, &definition.path);
        for &method in &definition.methods {
            if let Some(existing) = self.bound.get(&(method, path.clone())) {
                return Err(BindError::RouteCollision {
                    method,
                    path,
                    existing: existing.clone(),
                    duplicate: handler.fqn().to_string(),
                });
            }
            self.router.route(method, &path, handler.clone())?;
            self.bound
                .insert((method, path.clone()), handler.fqn().to_string());
            self.table.push(RouteBinding {
                method,
                path: path.clone(),
                handler: handler.fqn().to_string(),
            });
            tracing::info!(
                method = method.as_token(),
                path = %path,
                handler = handler.fqn(),
                "bound"
            );
        }
        Ok(())
    }

    /// The route table built so far.
    pub fn routes(&self) -> &[RouteBinding] {
        &self.table
    }

    pub fn into_router(self) -> R {
        self.router
    }
}

/// The production router: an `axum::Router` being assembled.
#[derive(Default)]
pub struct AxumRouter {
    inner: axum::Router,
}

impl AxumRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> axum::Router {
        self.inner
    }
}

impl ExternalRouter for AxumRouter {
    fn route(
        &mut self,
        method: HttpMethod,
        path: &str,
        handler: RouteHandler,
    ) -> Result<(), BindError> {
        // axum panics on relative paths; reject them as a bind error instead.
        if !path.starts_with('/') {
            return Err(BindError::MalformedPath {
                path: path.to_string(),
                reason: "paths must start with '/'",
            });
        }

        let method_router = on(method_filter(method), move |request: Request<Body>| {
            let handler = handler.clone();
            async move { handler.call(request).await }
        });
        let router = std::mem::take(&mut self.inner);
        self.inner = router.route(path, method_router);
        Ok(())
    }
}

fn method_filter(method: HttpMethod) -> MethodFilter {
    match method {
        HttpMethod::Get => MethodFilter::GET,
        HttpMethod::Post => MethodFilter::POST,
        HttpMethod::Put => MethodFilter::PUT,
        HttpMethod::Patch => MethodFilter::PATCH,
        HttpMethod::Delete => MethodFilter::DELETE,
        HttpMethod::Head => MethodFilter::HEAD,
        HttpMethod::Option => MethodFilter::OPTIONS,
    }
}
