//! Image upload, listing, fetch, and delete route handlers.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use imagebin_core::{Error, ImageId, ImageMetadata, ImageMime, ImageRecord};

use crate::context::AppContext;
use crate::error::AppError;

/// Name of the multipart form field carrying the file.
const UPLOAD_FIELD: &str = "image";

/// Response body for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: ImageId,
}

/// POST /upload
///
/// Accepts a multipart form with an `image` field, validates mimetype and
/// size before the store is touched, and returns the new record's metadata.
/// Repeated identical uploads create distinct records with distinct ids.
pub async fn upload_image(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut file: Option<(String, ImageMime, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("Malformed multipart request: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_owned)
            .unwrap_or_else(|| "upload".into());
        let mime: ImageMime = field.content_type().unwrap_or_default().parse()?;

        let data = field.bytes().await.map_err(|e| {
            // The transport body cap surfaces as a length-limit read error.
            if e.to_string().to_ascii_lowercase().contains("length limit") {
                Error::Validation("File too large".into())
            } else {
                Error::Validation(format!("Failed to read upload: {e}"))
            }
        })?;

        file = Some((filename, mime, data));
        break;
    }

    let Some((filename, mime, data)) = file else {
        return Err(Error::Validation("No file uploaded".into()).into());
    };

    // Size invariants (non-empty, <= 3 MiB) are enforced by the constructor,
    // so an invalid record never exists, not even transiently.
    let record = ImageRecord::new(filename, mime, data)?;
    let metadata = record.metadata();
    ctx.store.put(record);

    tracing::info!(
        id = %metadata.id,
        size = metadata.size,
        mime = %metadata.mime_type,
        "Image stored"
    );

    Ok((StatusCode::CREATED, Json(metadata)))
}

/// GET /images
///
/// Metadata for every live record, in insertion order. Presentation layers
/// that want newest-first reorder on their side.
pub async fn list_images(State(ctx): State<AppContext>) -> Json<Vec<ImageMetadata>> {
    Json(ctx.store.list())
}

/// GET /images/:id
///
/// The raw stored bytes, served verbatim with the stored mimetype.
pub async fn get_image(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = parse_id(&id)
        .and_then(|id| ctx.store.get(id))
        .ok_or_else(|| Error::not_found("image", &id))?;

    Ok((
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, record.mime.as_str())],
        record.data.clone(),
    ))
}

/// DELETE /images/:id
///
/// Removes the record and confirms with its id. Deleting an already-absent
/// id fails with 404 rather than succeeding silently; double-deletes are
/// surfaced to the caller on purpose.
pub async fn delete_image(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let image_id = parse_id(&id)
        .filter(|&id| ctx.store.delete(id))
        .ok_or_else(|| Error::not_found("image", &id))?;

    tracing::info!(id = %image_id, "Image deleted");

    Ok(Json(DeleteResponse {
        message: "Deleted".into(),
        id: image_id,
    }))
}

/// Ids are opaque map keys on this API: a path segment that does not parse
/// as a UUID cannot name a live record, so lookups treat it as absent (404)
/// rather than malformed (400).
fn parse_id(raw: &str) -> Option<ImageId> {
    raw.parse().ok()
}
