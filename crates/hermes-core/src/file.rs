//! Uploaded file items.

use bytes::Bytes;

/// A file uploaded through a `multipart/form-data` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

impl FileItem {
    /// Creates a file item for the given form field.
    #[must_use]
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: None,
            data: data.into(),
        }
    }

    /// Sets the client-supplied file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the form field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the original file name.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the file content.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the extension of the file name.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext))
    }
}
