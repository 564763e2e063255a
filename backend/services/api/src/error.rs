use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hunter_common::error::HunterError;
use hunter_detector::FeatureError;

use crate::view::{self, ScanView};

pub struct ApiError(pub HunterError);

impl From<HunterError> for ApiError {
    fn from(err: HunterError) -> Self {
        Self(err)
    }
}

impl From<FeatureError> for ApiError {
    fn from(err: FeatureError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HunterError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            HunterError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            HunterError::UnreachableSource => (StatusCode::BAD_REQUEST, self.0.to_string()),
            other => {
                tracing::error!(error = %other, "scan failed");
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };

        (status, view::render(&ScanView::Error(message))).into_response()
    }
}
