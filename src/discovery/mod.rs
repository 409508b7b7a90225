//! Discovery subsystem.
//!
//! # Data Flow
//! ```text
//! auto_import(roots, search_root)
//!     → scanner.rs (walk code tree, derive dotted module names)
//!     → loader.rs (load each unseen module exactly once, under lock)
//!     → engine.rs (classify exported symbols, lazily)
//!     → stream of (qualified name, classification, symbol)
//! ```
//!
//! # Design Decisions
//! - The loaded-module set is process-wide and never reset; a second load
//!   of the same name is a no-op
//! - The framework never discovers its own namespace
//! - The stream is lazy, single-pass and non-restartable; discovery runs
//!   once per auto_import invocation

pub mod engine;
pub mod loader;
pub mod scanner;

use std::path::Path;
use std::sync::Arc;

pub use engine::{Discovered, Discovery, DiscoveryError};
pub use loader::{ModuleExports, ModuleLoader, ModuleProvider, StaticModuleLoader};

/// Scan `roots` beneath `search_root` and stream classified symbols.
/// Empty `roots` derives defaults from the code tree itself.
pub fn discover(loader: Arc<dyn ModuleLoader>, roots: &[String], search_root: &Path) -> Discovery {
    let modules = scanner::candidate_modules(roots, search_root);
    tracing::debug!(
        search_root = %search_root.display(),
        candidates = modules.len(),
        "scan finished"
    );
    Discovery::new(loader, modules)
}
