//! The image data model: mimetype allow-list, stored record, and the
//! metadata view returned by the listing API.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::ids::ImageId;

/// Maximum accepted image payload size in bytes (3 MiB).
pub const MAX_IMAGE_BYTES: usize = 3 * 1024 * 1024;

/// The closed set of accepted image mimetypes.
///
/// Constructing an [`ImageRecord`] requires one of these, so every stored
/// record satisfies the mimetype invariant by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageMime {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
}

impl ImageMime {
    /// The wire representation, also used as the `Content-Type` header
    /// when serving raw bytes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageMime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "image/jpeg" => Ok(ImageMime::Jpeg),
            "image/png" => Ok(ImageMime::Png),
            _ => Err(Error::Validation("Only JPEG and PNG allowed".into())),
        }
    }
}

/// One stored image plus its metadata.
///
/// Records are immutable: they are created by a successful upload and
/// destroyed by a delete, never mutated in place.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    pub id: ImageId,
    /// Original client-supplied name. Untrusted; used for display only,
    /// never for filesystem paths.
    pub filename: String,
    pub mime: ImageMime,
    /// Raw image bytes. `Bytes` so handlers can respond without copying.
    pub data: Bytes,
    pub uploaded_at: DateTime<Utc>,
}

impl ImageRecord {
    /// Build a new record with a fresh id and the current timestamp.
    ///
    /// Enforces the size invariant `0 < len <= MAX_IMAGE_BYTES`; the mimetype
    /// invariant is carried by the [`ImageMime`] parameter itself.
    pub fn new(filename: impl Into<String>, mime: ImageMime, data: Bytes) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::Validation("Empty file".into()));
        }
        if data.len() > MAX_IMAGE_BYTES {
            return Err(Error::Validation("File too large".into()));
        }

        Ok(Self {
            id: ImageId::new(),
            filename: filename.into(),
            mime,
            data,
            uploaded_at: Utc::now(),
        })
    }

    /// Byte length of the stored payload.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// The metadata view of this record (everything except the bytes).
    pub fn metadata(&self) -> ImageMetadata {
        ImageMetadata {
            id: self.id,
            filename: self.filename.clone(),
            mime_type: self.mime,
            size: self.size(),
            uploaded_at: self.uploaded_at,
        }
    }
}

/// The subset of an [`ImageRecord`] exposed by the listing and upload
/// responses: `{id, filename, mimeType, size, uploadedAt}` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub id: ImageId,
    pub filename: String,
    pub mime_type: ImageMime,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}
