//! Definition side table.
//!
//! # Responsibilities
//! - Attach a definition to a symbol identity, exactly once
//! - Read definitions back during registration
//! - Classify symbols for the discovery stream
//!
//! # Design Decisions
//! - Process-wide concurrent map, write-once per key, never torn down
//! - Attaching twice is a declaration-time error, not an overwrite
//! - Classification is defensive: metadata on the wrong kind of symbol is
//!   inert (None), never a discovery failure

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::definitions::model::{ControllerDefinition, EndpointDefinition};
use crate::definitions::symbol::{SymbolId, SymbolRef};

/// A definition attached to exactly one symbol.
#[derive(Debug, Clone)]
pub enum Definition {
    Endpoint(Arc<EndpointDefinition>),
    Controller(Arc<ControllerDefinition>),
}

/// What registration should do with a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    None,
    Endpoint,
    Controller,
}

#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The symbol already carries a definition; declarations never
    /// overwrite each other.
    #[error("{symbol} already has an API definition; it cannot be defined twice")]
    Duplicate { symbol: String },
}

static DEFINITIONS: Lazy<DashMap<SymbolId, Definition>> = Lazy::new(DashMap::new);

/// Attach `definition` to `symbol`. Fails if the symbol already carries
/// any definition, regardless of what the new one says.
pub(crate) fn attach(symbol: &SymbolRef, definition: Definition) -> Result<(), DefinitionError> {
    match DEFINITIONS.entry(symbol.id()) {
        Entry::Occupied(_) => Err(DefinitionError::Duplicate {
            symbol: symbol.fqn().to_string(),
        }),
        Entry::Vacant(slot) => {
            tracing::debug!(symbol = symbol.fqn(), "definition attached");
            slot.insert(definition);
            Ok(())
        }
    }
}

pub fn definition_of(symbol: &SymbolRef) -> Option<Definition> {
    DEFINITIONS.get(&symbol.id()).map(|entry| entry.value().clone())
}

pub fn endpoint_definition(symbol: &SymbolRef) -> Option<Arc<EndpointDefinition>> {
    match definition_of(symbol) {
        Some(Definition::Endpoint(definition)) => Some(definition),
        _ => None,
    }
}

pub fn controller_definition(symbol: &SymbolRef) -> Option<Arc<ControllerDefinition>> {
    match definition_of(symbol) {
        Some(Definition::Controller(definition)) => Some(definition),
        _ => None,
    }
}

/// Classify a symbol from its attached definition and its kind. Kind and
/// definition must agree; anything else is None.
pub fn classify(symbol: &SymbolRef) -> Classification {
    match definition_of(symbol) {
        Some(Definition::Endpoint(_)) if symbol.is_callable() => Classification::Endpoint,
        Some(Definition::Controller(_)) if symbol.is_type() => Classification::Controller,
        _ => Classification::None,
    }
}
