//! Multipart form reader for the upload routes.
//!
//! Posts reference uploaded media by original filename only; the bytes are
//! drained here and storage is an external collaborator.

use std::collections::HashMap;

use actix_multipart::Multipart;
use futures_util::StreamExt;

use crate::middleware::error::AppError;

/// Upload guardrail.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// A parsed multipart form: the text fields plus the filename of the file
/// field, if any.
pub struct FormData {
    texts: HashMap<String, String>,
    filename: Option<String>,
}

impl FormData {
    /// Read every field of the form. File parts contribute their original
    /// filename; their content is discarded.
    pub async fn read(mut payload: Multipart) -> Result<Self, AppError> {
        let mut texts = HashMap::new();
        let mut filename = None;
        let mut total_bytes: usize = 0;

        while let Some(item) = payload.next().await {
            let mut field =
                item.map_err(|e| AppError::Validation(format!("Malformed form data: {}", e)))?;

            let cd = field.content_disposition();
            let field_name = cd.and_then(|c| c.get_name()).map(String::from);
            let file_name = cd.and_then(|c| c.get_filename()).map(String::from);

            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                let bytes = chunk
                    .map_err(|e| AppError::Validation(format!("Malformed form data: {}", e)))?;
                total_bytes += bytes.len();
                if total_bytes > MAX_UPLOAD_BYTES {
                    return Err(AppError::Validation("Upload exceeds the 20MB limit.".into()));
                }
                // File bytes are drained, not kept
                if file_name.is_none() {
                    value.extend_from_slice(&bytes);
                }
            }

            if let Some(name) = file_name {
                filename = Some(name);
            } else if let Some(name) = field_name {
                texts.insert(name, String::from_utf8_lossy(&value).into_owned());
            }
        }

        Ok(Self { texts, filename })
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}
