use bytes::Bytes;

/// An image as received from the caller, before validation.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub data: Bytes,
    pub filename: String,
    pub content_type: String,
}

impl ImagePayload {
    pub fn new(data: Bytes, filename: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            data,
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }
}
