//! Free endpoints at the site root.

use axum::body::Body;
use axum::http::Request;
use routewire::{endpoint, DefinitionError, ModuleExports, RouteHandler};

pub fn exports() -> Result<ModuleExports, DefinitionError> {
    let mut module = ModuleExports::new();
    module.insert(
        "root",
        endpoint("/").apply(RouteHandler::new(
            "demo.root.root",
            |_request: Request<Body>| async { "hello, world" },
        ))?,
    );
    module.insert(
        "abc",
        endpoint("/abc").apply(RouteHandler::new(
            "demo.root.abc",
            |_request: Request<Body>| async { "hello, world" },
        ))?,
    );
    Ok(module)
}
