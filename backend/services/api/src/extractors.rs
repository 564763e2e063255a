use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;
use hunter_common::error::HunterError;

use crate::error::ApiError;

/// Largest accepted CSV upload.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Request body cap for the upload route; leaves room for multipart framing.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

const UPLOAD_FIELD: &str = "file";

/// The `file` part of a multipart upload, read fully into memory.
///
/// The size cap is enforced while streaming, so an oversized upload is
/// rejected before any of it is parsed.
pub struct CsvUpload {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl<S: Send + Sync> FromRequest<S> for CsvUpload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await.map_err(|e| {
            HunterError::Validation(format!("expected a multipart upload: {}", e.body_text()))
        })?;

        while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(UPLOAD_FIELD) {
                continue;
            }

            let file_name = field.file_name().map(str::to_owned);
            let mut bytes = Vec::new();
            while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                    return Err(too_large());
                }
                bytes.extend_from_slice(&chunk);
            }

            return Ok(Self { file_name, bytes });
        }

        Err(HunterError::Validation("no file uploaded".to_string()).into())
    }
}

fn too_large() -> ApiError {
    HunterError::PayloadTooLarge(format!(
        "upload exceeds the {} MiB limit",
        MAX_UPLOAD_BYTES / (1024 * 1024)
    ))
    .into()
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return too_large();
    }
    HunterError::Validation(format!("malformed upload: {}", err.body_text())).into()
}
