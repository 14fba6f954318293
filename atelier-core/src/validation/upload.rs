use super::ValidationErrors;
use std::fmt;

/// Largest painting image the API accepts.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// An image file about to be uploaded. Bytes are never inspected beyond
/// their length.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name);
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.bytes.is_empty() {
            errors.add("image", "file is empty");
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            errors.add("image", "file must be 10 MB or smaller");
        }
        if !self.content_type.to_ascii_lowercase().starts_with("image/") {
            errors.add("image", "file must be an image");
        }
        errors.into_result()
    }
}

/// MIME type from the file extension, `application/octet-stream` when unknown.
pub fn guess_content_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
