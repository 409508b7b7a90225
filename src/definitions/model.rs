//! Definition value types.
//!
//! # Responsibilities
//! - Closed HTTP method vocabulary shared with the external router
//! - Immutable endpoint and controller definition values
//! - Opaque construction-argument carriers
//!
//! # Design Decisions
//! - Methods are case-insensitive at the boundary, canonical lowercase inside
//! - Definitions are values: built once at declaration time, never mutated
//! - Extra arguments stay opaque (`dyn Any`); this layer never reads them

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Recognized HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Option,
}

impl HttpMethod {
    /// Canonical lowercase token, matching the router's verb vocabulary.
    pub fn as_token(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Option => "option",
        }
    }

    /// Case-insensitive parse from the boundary spelling.
    pub fn parse(value: &str) -> Option<Self> {
        let methods = [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
            HttpMethod::Head,
            HttpMethod::Option,
        ];
        methods
            .into_iter()
            .find(|method| method.as_token().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// A value this layer stores but never inspects.
pub type OpaqueValue = Arc<dyn Any + Send + Sync>;

/// Ordered positional values plus named values, passed through to whoever
/// constructs or mounts the annotated symbol.
#[derive(Clone, Default)]
pub struct ExtraArgs {
    positional: Vec<OpaqueValue>,
    named: BTreeMap<String, OpaqueValue>,
}

impl ExtraArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: OpaqueValue) {
        self.positional.push(value);
    }

    pub fn set(&mut self, name: impl Into<String>, value: OpaqueValue) {
        self.named.insert(name.into(), value);
    }

    pub fn positional(&self) -> &[OpaqueValue] {
        &self.positional
    }

    pub fn named(&self) -> &BTreeMap<String, OpaqueValue> {
        &self.named
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

impl fmt::Debug for ExtraArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtraArgs")
            .field("positional", &self.positional.len())
            .field("named", &self.named.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// An endpoint: one sub-path, one or more HTTP methods, opaque extras.
#[derive(Debug, Clone)]
pub struct EndpointDefinition {
    /// Sub-path below the owning controller's base path (or below `/`).
    pub path: String,
    /// Declared methods in declaration order. Never empty.
    pub methods: Vec<HttpMethod>,
    pub extra: ExtraArgs,
}

/// A controller: a base path shared by its member endpoints plus
/// construction policy.
#[derive(Debug, Clone)]
pub struct ControllerDefinition {
    pub base_path: String,
    /// Construct through the service container (true) or directly with
    /// `init` (false).
    pub auto_wired: bool,
    pub init: ExtraArgs,
}
