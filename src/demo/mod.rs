//! Sample application modules.
//!
//! The demo binary scans `src/demo` as its code tree; each file here is a
//! scannable module with a matching provider in [`loader`].

pub mod clsctl;
pub mod root;

use routewire::StaticModuleLoader;

/// Providers for every demo module the scanner can find.
pub fn loader() -> StaticModuleLoader {
    StaticModuleLoader::new()
        .provide("demo.root", root::exports)
        .provide("demo.clsctl.alpha", clsctl::alpha::exports)
}
