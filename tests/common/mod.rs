//! Shared utilities for integration tests.

use std::fs;
use std::path::Path;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

/// Create an empty code file for every relative path, with parents.
/// The scanner only looks at file names, so empty files are enough.
pub fn write_tree(dir: &Path, files: &[&str]) {
    for relative in files {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, b"").expect("create file");
    }
}

/// Drive one request through the router and collect the response.
pub async fn request(
    router: &axum::Router,
    method: Method,
    path: &str,
) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(path)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

pub async fn get(router: &axum::Router, path: &str) -> (StatusCode, String) {
    request(router, Method::GET, path).await
}
