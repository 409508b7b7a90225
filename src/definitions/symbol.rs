//! Symbol descriptors.
//!
//! # Responsibilities
//! - Give every declared symbol a process-unique identity
//! - Carry the type-erased callable for endpoint functions
//! - Carry static controller metadata (constructor + member table)
//!
//! # Design Decisions
//! - Identity and metadata are separate: the side table owns definitions,
//!   symbols own identity and behavior
//! - Controller member metadata lives on the type descriptor; instances are
//!   produced and bound late, during registration only
//! - Handlers are type-erased once, at declaration time

use std::any::{Any, TypeId};
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

use crate::definitions::model::ExtraArgs;

/// A constructed controller, shared across all of its member bindings.
pub type ControllerInstance = Arc<dyn Any + Send + Sync>;

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a declared symbol. Keys the definition side
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(u64);

impl SymbolId {
    fn next() -> Self {
        SymbolId(NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A named, cloneable, type-erased request handler.
#[derive(Clone)]
pub struct RouteHandler {
    fqn: Arc<str>,
    func: Arc<dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync>,
}

impl RouteHandler {
    pub fn new<F, Fut, R>(fqn: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        Self {
            fqn: fqn.into(),
            func: Arc::new(
                move |request: Request<Body>| -> BoxFuture<'static, Response> {
                    let fut = func(request);
                    Box::pin(async move { fut.await.into_response() })
                },
            ),
        }
    }

    /// Qualified name used in diagnostics and the route table.
    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    pub fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        (self.func)(request)
    }
}

impl fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteHandler").field("fqn", &self.fqn).finish()
    }
}

/// What kind of thing a symbol refers to.
#[derive(Clone)]
pub enum SymbolKind {
    /// A free function with a concrete handler.
    Function(RouteHandler),
    /// A controller member; the callable exists only once an instance does.
    UnboundMethod,
    /// A controller type descriptor.
    Type(Arc<ControllerType>),
    /// Anything else a module happens to export.
    Opaque,
}

/// A reference to a declared symbol: identity, qualified name, kind.
#[derive(Clone)]
pub struct SymbolRef {
    id: SymbolId,
    fqn: Arc<str>,
    kind: SymbolKind,
}

impl SymbolRef {
    pub(crate) fn new(fqn: impl Into<Arc<str>>, kind: SymbolKind) -> Self {
        Self {
            id: SymbolId::next(),
            fqn: fqn.into(),
            kind,
        }
    }

    /// An exported value this layer has no interest in.
    pub fn opaque(fqn: impl Into<Arc<str>>) -> Self {
        Self::new(fqn, SymbolKind::Opaque)
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    pub fn kind(&self) -> &SymbolKind {
        &self.kind
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.kind, SymbolKind::Function(_) | SymbolKind::UnboundMethod)
    }

    pub fn is_type(&self) -> bool {
        matches!(self.kind, SymbolKind::Type(_))
    }
}

impl fmt::Debug for SymbolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            SymbolKind::Function(_) => "function",
            SymbolKind::UnboundMethod => "unbound-method",
            SymbolKind::Type(_) => "type",
            SymbolKind::Opaque => "opaque",
        };
        f.debug_struct("SymbolRef")
            .field("id", &self.id)
            .field("fqn", &self.fqn)
            .field("kind", &kind)
            .finish()
    }
}

/// Static descriptor of a controller type: how to construct it and which
/// members it exports. Built once at declaration time; the member table is
/// the authority on route membership, never the instance.
pub struct ControllerType {
    type_id: TypeId,
    type_name: Arc<str>,
    construct: Arc<dyn Fn(&ExtraArgs) -> ControllerInstance + Send + Sync>,
    members: Vec<ControllerMember>,
}

impl ControllerType {
    pub(crate) fn new(
        type_id: TypeId,
        type_name: Arc<str>,
        construct: Arc<dyn Fn(&ExtraArgs) -> ControllerInstance + Send + Sync>,
        members: Vec<ControllerMember>,
    ) -> Self {
        Self {
            type_id,
            type_name,
            construct,
            members,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Construct directly with the given init arguments.
    pub fn construct(&self, init: &ExtraArgs) -> ControllerInstance {
        (self.construct)(init)
    }

    /// Factory used when the container owns construction; auto-wired
    /// controllers take no declaration-time init arguments.
    pub(crate) fn factory(&self) -> Arc<dyn Fn() -> ControllerInstance + Send + Sync> {
        let construct = self.construct.clone();
        Arc::new(move || construct(&ExtraArgs::new()))
    }

    /// Exported members in declaration order.
    pub fn members(&self) -> &[ControllerMember] {
        &self.members
    }
}

impl fmt::Debug for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerType")
            .field("type_name", &self.type_name)
            .field("members", &self.members.len())
            .finish()
    }
}

/// One exported member of a controller type.
pub struct ControllerMember {
    name: String,
    symbol: SymbolRef,
    bind: Arc<dyn Fn(&ControllerInstance) -> Option<RouteHandler> + Send + Sync>,
}

impl ControllerMember {
    pub(crate) fn new(
        name: impl Into<String>,
        symbol: SymbolRef,
        bind: Arc<dyn Fn(&ControllerInstance) -> Option<RouteHandler> + Send + Sync>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol,
            bind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &SymbolRef {
        &self.symbol
    }

    /// Late-bind this member against a constructed instance. Returns None
    /// when the instance is not of the declaring type.
    pub fn bind(&self, instance: &ControllerInstance) -> Option<RouteHandler> {
        (self.bind)(instance)
    }
}
