pub mod handlers;
pub mod requests;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::extractors::UPLOAD_BODY_LIMIT;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/scan/manual", post(handlers::scan_manual))
        // The body cap is MAX_UPLOAD_BYTES plus 64 KiB of multipart framing;
        // CsvUpload enforces the 5 MiB limit on the file content itself.
        .route(
            "/scan/file",
            post(handlers::scan_file).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/scan/url", post(handlers::scan_url))
}
