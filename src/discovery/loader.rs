//! Module loading.
//!
//! # Responsibilities
//! - Map qualified module names to symbol tables
//! - Guarantee each module loads at most once per process
//!
//! # Design Decisions
//! - Loading is behind a trait; the host decides what a "module" is
//! - The default loader is an explicit name → provider registry
//! - The loaded-set mutex is held across the provider call, serializing
//!   module loading the way an import lock does

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;

use crate::definitions::registry::DefinitionError;
use crate::definitions::symbol::SymbolRef;

/// A module's exported symbols, in declaration order.
#[derive(Default)]
pub struct ModuleExports {
    symbols: Vec<(String, SymbolRef)>,
}

impl ModuleExports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, symbol: SymbolRef) {
        self.symbols.push((name.into(), symbol));
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub(crate) fn into_symbols(self) -> Vec<(String, SymbolRef)> {
        self.symbols
    }
}

/// External collaborator: resolves a qualified module name to its symbol
/// table. Returning `None` means the name is not loadable here.
pub trait ModuleLoader: Send + Sync {
    fn load(&self, qualified_name: &str) -> Result<Option<ModuleExports>, DefinitionError>;
}

/// Materializes one module's symbol table. Runs declaration-time builders,
/// so it can fail with a definition error.
pub type ModuleProvider = fn() -> Result<ModuleExports, DefinitionError>;

/// The in-crate loader: a registry of providers the host application
/// builds up front.
#[derive(Default)]
pub struct StaticModuleLoader {
    providers: HashMap<String, ModuleProvider>,
}

impl StaticModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provide(mut self, qualified_name: impl Into<String>, provider: ModuleProvider) -> Self {
        self.providers.insert(qualified_name.into(), provider);
        self
    }
}

impl ModuleLoader for StaticModuleLoader {
    fn load(&self, qualified_name: &str) -> Result<Option<ModuleExports>, DefinitionError> {
        match self.providers.get(qualified_name) {
            Some(provider) => provider().map(Some),
            None => Ok(None),
        }
    }
}

static LOADED_MODULES: Lazy<Mutex<HashSet<String>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// Load `qualified_name` through `loader` unless this process has already
/// loaded it. The lock spans the load itself; module loading is not
/// reentrant-safe.
pub(crate) fn load_once(
    loader: &dyn ModuleLoader,
    qualified_name: &str,
) -> Result<Option<ModuleExports>, DefinitionError> {
    let mut loaded = LOADED_MODULES
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if !loaded.insert(qualified_name.to_string()) {
        tracing::debug!(module = qualified_name, "module already loaded");
        return Ok(None);
    }

    tracing::debug!(module = qualified_name, "import");
    match loader.load(qualified_name)? {
        Some(exports) => Ok(Some(exports)),
        None => {
            tracing::debug!(module = qualified_name, "no provider registered; skipped");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static LOAD_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn counting_provider() -> Result<ModuleExports, DefinitionError> {
        LOAD_CALLS.fetch_add(1, Ordering::SeqCst);
        let mut exports = ModuleExports::new();
        exports.insert("value", SymbolRef::opaque("t_loader.counting.value"));
        Ok(exports)
    }

    #[test]
    fn second_load_of_the_same_module_is_a_noop() {
        let loader = StaticModuleLoader::new().provide("t_loader.counting", counting_provider);

        let first = load_once(&loader, "t_loader.counting").expect("load");
        assert!(first.is_some());
        assert_eq!(LOAD_CALLS.load(Ordering::SeqCst), 1);

        let second = load_once(&loader, "t_loader.counting").expect("load");
        assert!(second.is_none());
        assert_eq!(LOAD_CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unprovided_module_loads_as_nothing() {
        let loader = StaticModuleLoader::new();
        let outcome = load_once(&loader, "t_loader.unknown").expect("load");
        assert!(outcome.is_none());
    }
}
