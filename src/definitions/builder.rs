//! Declaration-time builders.
//!
//! # Responsibilities
//! - Collect endpoint / controller declaration arguments
//! - Mint tagged symbol descriptors and attach their definitions
//! - Assemble controller type descriptors with their member tables
//!
//! # Design Decisions
//! - `apply` mints a fresh symbol; `attach_to` targets an existing one and
//!   is where duplicate declarations surface
//! - An empty explicit method list falls back to GET, like an omitted one
//! - Member endpoint metadata attaches while the descriptor is built,
//!   before any controller instance exists

use std::any::{Any, TypeId};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::definitions::model::{
    ControllerDefinition, EndpointDefinition, ExtraArgs, HttpMethod,
};
use crate::definitions::registry::{self, Definition, DefinitionError};
use crate::definitions::symbol::{
    ControllerInstance, ControllerMember, ControllerType, RouteHandler, SymbolKind, SymbolRef,
};

/// Declare an endpoint at `path`. Defaults to GET when no methods are
/// given.
pub fn endpoint(path: impl Into<String>) -> EndpointBuilder {
    EndpointBuilder {
        path: path.into(),
        methods: Vec::new(),
        extra: ExtraArgs::new(),
    }
}

/// Declare a controller at `base_path`. Auto-wired unless opted out.
pub fn controller(base_path: impl Into<String>) -> ControllerBuilder {
    ControllerBuilder {
        base_path: base_path.into(),
        auto_wired: true,
        init: ExtraArgs::new(),
    }
}

#[derive(Debug)]
pub struct EndpointBuilder {
    path: String,
    methods: Vec<HttpMethod>,
    extra: ExtraArgs,
}

impl EndpointBuilder {
    /// Add one method, preserving declaration order. Re-declaring a method
    /// is a no-op; the declared list is already a set.
    pub fn method(mut self, method: HttpMethod) -> Self {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
        self
    }

    pub fn methods(self, methods: impl IntoIterator<Item = HttpMethod>) -> Self {
        methods.into_iter().fold(self, Self::method)
    }

    pub fn arg<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.extra.push(Arc::new(value));
        self
    }

    pub fn kwarg<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.extra.set(name, Arc::new(value));
        self
    }

    fn into_definition(self) -> Arc<EndpointDefinition> {
        let methods = if self.methods.is_empty() {
            vec![HttpMethod::Get]
        } else {
            self.methods
        };
        Arc::new(EndpointDefinition {
            path: self.path,
            methods,
            extra: self.extra,
        })
    }

    /// Mint a function symbol for `handler` and attach this definition.
    pub fn apply(self, handler: RouteHandler) -> Result<SymbolRef, DefinitionError> {
        let fqn: Arc<str> = handler.fqn().into();
        let symbol = SymbolRef::new(fqn, SymbolKind::Function(handler));
        registry::attach(&symbol, Definition::Endpoint(self.into_definition()))?;
        Ok(symbol)
    }

    /// Attach this definition to an existing symbol. Fails if the symbol
    /// already carries one.
    pub fn attach_to(self, symbol: &SymbolRef) -> Result<(), DefinitionError> {
        registry::attach(symbol, Definition::Endpoint(self.into_definition()))
    }
}

#[derive(Debug)]
pub struct ControllerBuilder {
    base_path: String,
    auto_wired: bool,
    init: ExtraArgs,
}

impl ControllerBuilder {
    pub fn auto_wired(mut self, auto_wired: bool) -> Self {
        self.auto_wired = auto_wired;
        self
    }

    pub fn init_arg<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.init.push(Arc::new(value));
        self
    }

    pub fn init_kwarg<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.init.set(name, Arc::new(value));
        self
    }

    fn into_definition(self) -> Arc<ControllerDefinition> {
        Arc::new(ControllerDefinition {
            base_path: self.base_path,
            auto_wired: self.auto_wired,
            init: self.init,
        })
    }

    /// Mint a type symbol for the described controller and attach this
    /// definition.
    pub fn apply<C>(self, descriptor: ControllerTypeBuilder<C>) -> Result<SymbolRef, DefinitionError>
    where
        C: Send + Sync + 'static,
    {
        let controller_type = descriptor.finish();
        let fqn: Arc<str> = controller_type.type_name().into();
        let symbol = SymbolRef::new(fqn, SymbolKind::Type(Arc::new(controller_type)));
        registry::attach(&symbol, Definition::Controller(self.into_definition()))?;
        Ok(symbol)
    }

    /// Attach this definition to an existing symbol. Fails if the symbol
    /// already carries one.
    pub fn attach_to(self, symbol: &SymbolRef) -> Result<(), DefinitionError> {
        registry::attach(symbol, Definition::Controller(self.into_definition()))
    }
}

/// Describe controller type `C`: qualified name, constructor, members.
pub fn controller_type<C, F>(type_name: &str, construct: F) -> ControllerTypeBuilder<C>
where
    C: Send + Sync + 'static,
    F: Fn(&ExtraArgs) -> C + Send + Sync + 'static,
{
    let type_name: Arc<str> = type_name.into();
    ControllerTypeBuilder {
        type_name,
        construct: Arc::new(move |init: &ExtraArgs| -> ControllerInstance {
            Arc::new(construct(init))
        }),
        members: Vec::new(),
        _marker: PhantomData,
    }
}

pub struct ControllerTypeBuilder<C> {
    type_name: Arc<str>,
    construct: Arc<dyn Fn(&ExtraArgs) -> ControllerInstance + Send + Sync>,
    members: Vec<ControllerMember>,
    _marker: PhantomData<fn() -> C>,
}

impl<C> ControllerTypeBuilder<C>
where
    C: Send + Sync + 'static,
{
    /// Declare a member endpoint. The definition attaches to the member's
    /// symbol now; `bind` produces the callable once an instance exists.
    pub fn method<F>(
        mut self,
        name: &str,
        definition: EndpointBuilder,
        bind: F,
    ) -> Result<Self, DefinitionError>
    where
        F: Fn(Arc<C>) -> RouteHandler + Send + Sync + 'static,
    {
        let fqn = format!("{}.{}", self.type_name, name);
        let symbol = SymbolRef::new(fqn, SymbolKind::UnboundMethod);
        definition.attach_to(&symbol)?;

        let erased = Arc::new(move |instance: &ControllerInstance| {
            instance.clone().downcast::<C>().ok().map(&bind)
        });
        self.members.push(ControllerMember::new(name, symbol, erased));
        Ok(self)
    }

    fn finish(self) -> ControllerType {
        ControllerType::new(
            TypeId::of::<C>(),
            self.type_name,
            self.construct,
            self.members,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::registry::{classify, endpoint_definition, Classification};
    use axum::body::Body;
    use axum::http::Request;

    fn noop_handler(fqn: &str) -> RouteHandler {
        RouteHandler::new(fqn.to_string(), |_request: Request<Body>| async { "ok" })
    }

    #[test]
    fn unspecified_methods_default_to_get() {
        let symbol = endpoint("/plain")
            .apply(noop_handler("tests.builder.plain"))
            .expect("fresh symbol");
        let definition = endpoint_definition(&symbol).expect("definition");
        assert_eq!(definition.methods, vec![HttpMethod::Get]);
    }

    #[test]
    fn empty_explicit_method_list_defaults_to_get() {
        let symbol = endpoint("/empty")
            .methods([])
            .apply(noop_handler("tests.builder.empty"))
            .expect("fresh symbol");
        let definition = endpoint_definition(&symbol).expect("definition");
        assert_eq!(definition.methods, vec![HttpMethod::Get]);
    }

    #[test]
    fn methods_keep_declaration_order_without_duplicates() {
        let symbol = endpoint("/multi")
            .methods([
                HttpMethod::Post,
                HttpMethod::Get,
                HttpMethod::Post,
                HttpMethod::Delete,
            ])
            .apply(noop_handler("tests.builder.multi"))
            .expect("fresh symbol");
        let definition = endpoint_definition(&symbol).expect("definition");
        assert_eq!(
            definition.methods,
            vec![HttpMethod::Post, HttpMethod::Get, HttpMethod::Delete]
        );
    }

    #[test]
    fn controller_members_classify_before_any_instance_exists() {
        struct Ctl;
        impl Ctl {
            fn hello(&self) -> &'static str {
                "hello"
            }
        }

        let descriptor = controller_type::<Ctl, _>("tests.builder.Ctl", |_init| Ctl)
            .method("hello", endpoint("hello"), |ctl: Arc<Ctl>| {
                RouteHandler::new("tests.builder.Ctl.hello", move |_request: Request<Body>| {
                    let ctl = ctl.clone();
                    async move { ctl.hello() }
                })
            })
            .expect("member");

        let symbol = controller("/ctl").apply(descriptor).expect("controller symbol");
        assert_eq!(classify(&symbol), Classification::Controller);

        let SymbolKind::Type(controller_type) = symbol.kind() else {
            panic!("controller symbol must be a type");
        };
        let members = controller_type.members();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name(), "hello");
        assert_eq!(classify(members[0].symbol()), Classification::Endpoint);
    }
}
