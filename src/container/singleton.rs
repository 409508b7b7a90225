//! Default construct-once container.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::container::{ServiceContainer, ServiceRegistration, UnresolvedDependencyError};
use crate::definitions::symbol::ControllerInstance;

struct ServiceEntry {
    registration: ServiceRegistration,
    instance: Option<ControllerInstance>,
}

/// Constructs each registered service once, on first resolve, and shares
/// the instance from then on.
#[derive(Default)]
pub struct SingletonContainer {
    services: RwLock<HashMap<TypeId, ServiceEntry>>,
}

impl SingletonContainer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ServiceContainer for SingletonContainer {
    fn register_service(&self, registration: ServiceRegistration) {
        let mut services = self
            .services
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        services
            .entry(registration.type_id())
            .or_insert(ServiceEntry {
                registration,
                instance: None,
            });
    }

    fn resolve(
        &self,
        type_id: TypeId,
        type_name: &str,
    ) -> Result<ControllerInstance, UnresolvedDependencyError> {
        {
            let services = self.services.read().unwrap_or_else(PoisonError::into_inner);
            match services.get(&type_id) {
                Some(ServiceEntry {
                    instance: Some(instance),
                    ..
                }) => return Ok(instance.clone()),
                Some(_) => {}
                None => {
                    return Err(UnresolvedDependencyError {
                        type_name: type_name.to_string(),
                        reason: "type is not registered as a service".to_string(),
                    });
                }
            }
        }

        let mut services = self
            .services
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = services
            .get_mut(&type_id)
            .ok_or_else(|| UnresolvedDependencyError {
                type_name: type_name.to_string(),
                reason: "type is not registered as a service".to_string(),
            })?;
        if let Some(instance) = &entry.instance {
            return Ok(instance.clone());
        }
        let instance = entry.registration.construct();
        tracing::debug!(service = entry.registration.type_name(), "service constructed");
        entry.instance = Some(instance.clone());
        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Widget;

    fn registration(counter: Arc<AtomicUsize>) -> ServiceRegistration {
        ServiceRegistration::new(
            TypeId::of::<Widget>(),
            "tests.singleton.Widget",
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Arc::new(Widget) as ControllerInstance
            }),
        )
    }

    #[test]
    fn resolve_constructs_once_and_shares() {
        let counter = Arc::new(AtomicUsize::new(0));
        let container = SingletonContainer::new();
        container.register_service(registration(counter.clone()));

        let first = container
            .resolve(TypeId::of::<Widget>(), "tests.singleton.Widget")
            .expect("resolve");
        let second = container
            .resolve(TypeId::of::<Widget>(), "tests.singleton.Widget")
            .expect("resolve");

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn re_registration_keeps_the_first_factory() {
        let first_counter = Arc::new(AtomicUsize::new(0));
        let second_counter = Arc::new(AtomicUsize::new(0));
        let container = SingletonContainer::new();
        container.register_service(registration(first_counter.clone()));
        container.register_service(registration(second_counter.clone()));

        container
            .resolve(TypeId::of::<Widget>(), "tests.singleton.Widget")
            .expect("resolve");
        assert_eq!(first_counter.load(Ordering::SeqCst), 1);
        assert_eq!(second_counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unregistered_type_is_unresolvable() {
        let container = SingletonContainer::new();
        let err = container
            .resolve(TypeId::of::<Widget>(), "tests.singleton.Widget")
            .expect_err("unresolved");
        assert!(err.to_string().contains("tests.singleton.Widget"));
    }
}
