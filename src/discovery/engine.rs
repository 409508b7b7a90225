//! Classification stream.
//!
//! # Responsibilities
//! - Load each candidate module once and walk its exports
//! - Classify every public symbol; yield endpoints and controllers
//! - Keep the framework's own namespace out of application discovery
//!
//! # Design Decisions
//! - Lazy iterator: a module loads only when the stream reaches it
//! - Single pass, non-restartable; one stream per auto_import
//! - Underscore-prefixed and unclassified exports are log events, not items

use std::collections::VecDeque;
use std::sync::Arc;

use thiserror::Error;

use crate::definitions::registry::{classify, Classification, DefinitionError};
use crate::definitions::symbol::SymbolRef;
use crate::discovery::loader::{self, ModuleLoader};

/// This crate's own module namespace; never discovered as application code.
const FRAMEWORK_NAMESPACE: &str = "routewire";

fn is_framework_module(qualified_name: &str) -> bool {
    qualified_name == FRAMEWORK_NAMESPACE
        || qualified_name
            .strip_prefix(FRAMEWORK_NAMESPACE)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// One classified symbol out of the discovery stream.
#[derive(Debug)]
pub struct Discovered {
    /// `module.symbol` qualified name.
    pub qualified_name: String,
    pub classification: Classification,
    pub symbol: SymbolRef,
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to load module {module}: {source}")]
    ModuleLoad {
        module: String,
        source: DefinitionError,
    },
}

/// Lazy, single-pass stream of classified symbols across a set of modules.
pub struct Discovery {
    loader: Arc<dyn ModuleLoader>,
    pending: VecDeque<String>,
    current_module: String,
    current: VecDeque<(String, SymbolRef)>,
}

impl Discovery {
    pub(crate) fn new(loader: Arc<dyn ModuleLoader>, modules: Vec<String>) -> Self {
        Self {
            loader,
            pending: modules.into(),
            current_module: String::new(),
            current: VecDeque::new(),
        }
    }
}

impl Iterator for Discovery {
    type Item = Result<Discovered, DiscoveryError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some((name, symbol)) = self.current.pop_front() {
                if name.starts_with('_') {
                    tracing::trace!(module = %self.current_module, symbol = %name, "private symbol skipped");
                    continue;
                }
                let qualified_name = format!("{}.{}", self.current_module, name);
                match classify(&symbol) {
                    Classification::None => {
                        tracing::debug!(symbol = %qualified_name, "ignored");
                    }
                    classification => {
                        let kind = if classification == Classification::Endpoint {
                            "endpoint"
                        } else {
                            "controller"
                        };
                        tracing::info!(symbol = %qualified_name, kind, "discovered");
                        return Some(Ok(Discovered {
                            qualified_name,
                            classification,
                            symbol,
                        }));
                    }
                }
            }

            let module = self.pending.pop_front()?;
            if is_framework_module(&module) {
                tracing::debug!(module = %module, "framework module skipped");
                continue;
            }
            match loader::load_once(&*self.loader, &module) {
                Ok(Some(exports)) => {
                    self.current = exports.into_symbols().into();
                    self.current_module = module;
                }
                Ok(None) => {}
                Err(source) => {
                    return Some(Err(DiscoveryError::ModuleLoad { module, source }));
                }
            }
        }
    }
}
