//! A controller with one endpoint and no construction parameters.

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use routewire::{
    controller, controller_type, endpoint, DefinitionError, ModuleExports, RouteHandler,
};

#[derive(Default)]
pub struct AlphaController;

impl AlphaController {
    fn do_one(&self) -> &'static str {
        "abc"
    }
}

pub fn exports() -> Result<ModuleExports, DefinitionError> {
    let descriptor = controller_type::<AlphaController, _>(
        "demo.clsctl.alpha.AlphaController",
        |_init| AlphaController::default(),
    )
    .method("do_one", endpoint("one"), |ctl: Arc<AlphaController>| {
        RouteHandler::new(
            "demo.clsctl.alpha.AlphaController.do_one",
            move |_request: Request<Body>| {
                let ctl = ctl.clone();
                async move { ctl.do_one() }
            },
        )
    })?;

    let alpha = controller("/clsctl/alpha").apply(descriptor)?;

    let mut module = ModuleExports::new();
    module.insert("AlphaController", alpha);
    Ok(module)
}
