//! Per-symbol registration.

use std::sync::Arc;

use thiserror::Error;

use crate::binding::binder::{BindError, ExternalRouter, RouteBinder};
use crate::container::{ServiceContainer, ServiceRegistration, UnresolvedDependencyError};
use crate::definitions::registry::{self, Classification};
use crate::definitions::symbol::{ControllerInstance, SymbolKind};
use crate::discovery::engine::Discovered;

#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Classification promised a definition that is missing or unusable.
    #[error("no usable definition attached to classified symbol {symbol}")]
    MissingDefinition { symbol: String },
    #[error(transparent)]
    Unresolved(#[from] UnresolvedDependencyError),
    #[error(transparent)]
    Bind(#[from] BindError),
}

/// Consumes the discovery stream and turns classified symbols into route
/// bindings.
pub struct RegistrationEngine<'a, R> {
    binder: &'a mut RouteBinder<R>,
    container: Arc<dyn ServiceContainer>,
}

impl<'a, R: ExternalRouter> RegistrationEngine<'a, R> {
    pub fn new(binder: &'a mut RouteBinder<R>, container: Arc<dyn ServiceContainer>) -> Self {
        Self { binder, container }
    }

    pub fn register(&mut self, discovered: &Discovered) -> Result<(), RegistrationError> {
        match discovered.classification {
            Classification::Endpoint => self.register_endpoint(discovered),
            Classification::Controller => self.register_controller(discovered),
            // The discovery stream never yields unclassified symbols.
            Classification::None => Ok(()),
        }
    }

    fn register_endpoint(&mut self, discovered: &Discovered) -> Result<(), RegistrationError> {
        let definition = registry::endpoint_definition(&discovered.symbol).ok_or_else(|| {
            RegistrationError::MissingDefinition {
                symbol: discovered.qualified_name.clone(),
            }
        })?;
        let SymbolKind::Function(handler) = discovered.symbol.kind() else {
            // Classified callable without a concrete handler at module level.
            return Err(RegistrationError::MissingDefinition {
                symbol: discovered.qualified_name.clone(),
            });
        };
        self.binder.bind(None, &definition, handler.clone())?;
        Ok(())
    }

    fn register_controller(&mut self, discovered: &Discovered) -> Result<(), RegistrationError> {
        let SymbolKind::Type(controller_type) = discovered.symbol.kind() else {
            return Err(RegistrationError::MissingDefinition {
                symbol: discovered.qualified_name.clone(),
            });
        };
        let controller_type = controller_type.clone();
        let definition = registry::controller_definition(&discovered.symbol).ok_or_else(|| {
            RegistrationError::MissingDefinition {
                symbol: discovered.qualified_name.clone(),
            }
        })?;

        let instance: ControllerInstance = if definition.auto_wired {
            self.container
                .register_service(ServiceRegistration::from_controller(&controller_type));
            self.container
                .resolve(controller_type.type_id(), controller_type.type_name())?
        } else {
            controller_type.construct(&definition.init)
        };

        let mut bound = 0usize;
        for member in controller_type.members() {
            match registry::classify(member.symbol()) {
                Classification::Endpoint => {
                    let member_definition = registry::endpoint_definition(member.symbol())
                        .ok_or_else(|| RegistrationError::MissingDefinition {
                            symbol: member.symbol().fqn().to_string(),
                        })?;
                    let handler = member.bind(&instance).ok_or_else(|| {
                        UnresolvedDependencyError {
                            type_name: controller_type.type_name().to_string(),
                            reason: "container returned an instance of an unexpected type"
                                .to_string(),
                        }
                    })?;
                    self.binder
                        .bind(Some(&definition.base_path), &member_definition, handler)?;
                    bound += 1;
                }
                _ => {
                    tracing::debug!(member = member.symbol().fqn(), "ignored");
                }
            }
        }
        if bound == 0 {
            tracing::info!(
                controller = controller_type.type_name(),
                "controller contributed no routes"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::SingletonContainer;
    use crate::definitions::builder::{controller, controller_type, endpoint};
    use crate::definitions::model::HttpMethod;
    use crate::definitions::symbol::{RouteHandler, SymbolRef};
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Recording stand-in for the external router.
    #[derive(Default)]
    struct RecordingRouter {
        registered: Vec<(HttpMethod, String, String)>,
    }

    impl ExternalRouter for RecordingRouter {
        fn route(
            &mut self,
            method: HttpMethod,
            path: &str,
            handler: RouteHandler,
        ) -> Result<(), BindError> {
            self.registered
                .push((method, path.to_string(), handler.fqn().to_string()));
            Ok(())
        }
    }

    fn discovered(symbol: SymbolRef) -> Discovered {
        Discovered {
            qualified_name: symbol.fqn().to_string(),
            classification: registry::classify(&symbol),
            symbol,
        }
    }

    fn method_handler(fqn: &str, ctl: Arc<Counting>) -> RouteHandler {
        RouteHandler::new(fqn.to_string(), move |_request: Request<Body>| {
            let ctl = ctl.clone();
            async move { ctl.greet() }
        })
    }

    struct Counting;

    impl Counting {
        fn greet(&self) -> &'static str {
            "hi"
        }
    }

    static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

    #[test]
    fn auto_wired_controller_fans_out_from_one_instance() {
        let descriptor = controller_type::<Counting, _>("t_engine_reg.Counting", |_init| {
            CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
            Counting
        })
        .method("one", endpoint("one"), |ctl: Arc<Counting>| {
            method_handler("t_engine_reg.Counting.one", ctl)
        })
        .expect("member")
        .method("two", endpoint("two").method(HttpMethod::Post), |ctl: Arc<Counting>| {
            method_handler("t_engine_reg.Counting.two", ctl)
        })
        .expect("member");

        let symbol = controller("/counting")
            .apply(descriptor)
            .expect("controller symbol");

        let mut binder = RouteBinder::new(RecordingRouter::default());
        let container = Arc::new(SingletonContainer::new());
        let mut engine = RegistrationEngine::new(&mut binder, container);
        engine.register(&discovered(symbol)).expect("register");

        assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 1);
        let router = binder.into_router();
        assert_eq!(
            router.registered,
            vec![
                (
                    HttpMethod::Get,
                    "/counting/one".to_string(),
                    "t_engine_reg.Counting.one".to_string()
                ),
                (
                    HttpMethod::Post,
                    "/counting/two".to_string(),
                    "t_engine_reg.Counting.two".to_string()
                ),
            ]
        );
    }

    #[test]
    fn direct_construction_skips_the_container() {
        struct Direct;

        static DIRECTLY_CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

        let descriptor = controller_type::<Direct, _>("t_engine_reg.Direct", |_init| {
            DIRECTLY_CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
            Direct
        })
        .method("only", endpoint("only"), |_ctl: Arc<Direct>| {
            RouteHandler::new(
                "t_engine_reg.Direct.only",
                |_request: Request<Body>| async { "only" },
            )
        })
        .expect("member");

        let symbol = controller("/direct")
            .auto_wired(false)
            .apply(descriptor)
            .expect("controller symbol");

        let mut binder = RouteBinder::new(RecordingRouter::default());
        // An empty container: resolution would fail if it were consulted.
        let container = Arc::new(SingletonContainer::new());
        let mut engine = RegistrationEngine::new(&mut binder, container);
        engine.register(&discovered(symbol)).expect("register");

        assert_eq!(DIRECTLY_CONSTRUCTED.load(Ordering::SeqCst), 1);
        assert_eq!(binder.routes().len(), 1);
        assert_eq!(binder.routes()[0].path, "/direct/only");
    }

    #[test]
    fn memberless_controller_contributes_no_routes() {
        struct Empty;

        let descriptor = controller_type::<Empty, _>("t_engine_reg.Empty", |_init| Empty);
        let symbol = controller("/empty")
            .apply(descriptor)
            .expect("controller symbol");

        let mut binder = RouteBinder::new(RecordingRouter::default());
        let container = Arc::new(SingletonContainer::new());
        let mut engine = RegistrationEngine::new(&mut binder, container);
        engine.register(&discovered(symbol)).expect("register");

        assert!(binder.routes().is_empty());
    }

    #[test]
    fn free_endpoint_binds_at_the_site_root() {
        let symbol = endpoint("/ping")
            .apply(RouteHandler::new(
                "t_engine_reg.ping",
                |_request: Request<Body>| async { "pong" },
            ))
            .expect("symbol");

        let mut binder = RouteBinder::new(RecordingRouter::default());
        let container = Arc::new(SingletonContainer::new());
        let mut engine = RegistrationEngine::new(&mut binder, container);
        engine.register(&discovered(symbol)).expect("register");

        assert_eq!(binder.routes().len(), 1);
        assert_eq!(binder.routes()[0].path, "/ping");
        assert_eq!(binder.routes()[0].method, HttpMethod::Get);
    }
}
