//! `multipart/form-data` parsing for file uploads.
//!
//! The transport layer parses an upload once, before resolution, and
//! attaches the result to the request view:
//!
//! ```rust,ignore
//! use hermes_extract::{ExtractionContextBuilder, Multipart};
//!
//! let form = Multipart::from_request_default(&headers, body.clone())?
//!     .collect()
//!     .await?;
//! let ctx = ExtractionContextBuilder::new()
//!     .headers(headers)
//!     .multipart_form(form)
//!     .build();
//! ```

use std::io;

use bytes::Bytes;
use hermes_core::FileItem;
use http::{header, HeaderMap, StatusCode};
use thiserror::Error;

/// Default maximum total body size for multipart (50 MB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 50 * 1024 * 1024;

/// Default maximum size per field (10 MB).
pub const DEFAULT_MAX_FIELD_SIZE: usize = 10 * 1024 * 1024;

/// Default maximum number of fields.
pub const DEFAULT_MAX_FIELDS: usize = 100;

/// Errors raised while parsing a multipart body.
#[derive(Debug, Error)]
pub enum MultipartError {
    /// The request has no usable `Content-Type`.
    #[error("missing or unreadable Content-Type, expected multipart/form-data")]
    MissingContentType,

    /// The `Content-Type` has no multipart boundary.
    #[error("missing or invalid boundary in multipart Content-Type")]
    InvalidBoundary,

    /// The body or a field exceeds its limit.
    #[error("multipart payload too large: max {max} bytes, got {actual} bytes")]
    TooLarge {
        /// Configured limit.
        max: usize,
        /// Actual size.
        actual: usize,
    },

    /// More fields than allowed.
    #[error("too many multipart fields (max {max})")]
    TooManyFields {
        /// Configured limit.
        max: usize,
    },

    /// The body is not valid multipart data.
    #[error("malformed multipart body: {0}")]
    Malformed(#[from] multer::Error),
}

impl MultipartError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingContentType | Self::InvalidBoundary => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::TooManyFields { .. } | Self::Malformed(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Limits applied while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartConfig {
    /// Maximum total body size in bytes.
    pub max_body_size: usize,
    /// Maximum size per field in bytes.
    pub max_field_size: usize,
    /// Maximum number of fields allowed.
    pub max_fields: usize,
}

impl Default for MultipartConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            max_field_size: DEFAULT_MAX_FIELD_SIZE,
            max_fields: DEFAULT_MAX_FIELDS,
        }
    }
}

impl MultipartConfig {
    /// Create a configuration with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum body size.
    #[must_use]
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Set the maximum field size.
    #[must_use]
    pub fn max_field_size(mut self, size: usize) -> Self {
        self.max_field_size = size;
        self
    }

    /// Set the maximum number of fields.
    #[must_use]
    pub fn max_fields(mut self, count: usize) -> Self {
        self.max_fields = count;
        self
    }
}

/// Fields and files of a parsed multipart body, in body order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    /// Text fields as `(name, value)` pairs.
    pub fields: Vec<(String, String)>,
    /// File fields.
    pub files: Vec<FileItem>,
}

/// Streaming parser over a buffered `multipart/form-data` body.
pub struct Multipart {
    inner: multer::Multipart<'static>,
    config: MultipartConfig,
    field_count: usize,
}

impl Multipart {
    /// Prepares a parser for `body`.
    ///
    /// # Errors
    ///
    /// Returns an error if the `Content-Type` is missing or has no boundary,
    /// or the body exceeds `config.max_body_size`.
    pub fn from_request(
        headers: &HeaderMap,
        body: Bytes,
        config: MultipartConfig,
    ) -> Result<Self, MultipartError> {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .ok_or(MultipartError::MissingContentType)?;

        let boundary =
            multer::parse_boundary(content_type).map_err(|_| MultipartError::InvalidBoundary)?;

        if body.len() > config.max_body_size {
            return Err(MultipartError::TooLarge {
                max: config.max_body_size,
                actual: body.len(),
            });
        }

        let stream = futures_util::stream::once(async move { Ok::<_, io::Error>(body) });
        let inner = multer::Multipart::new(stream, boundary);

        Ok(Self {
            inner,
            config,
            field_count: 0,
        })
    }

    /// Prepares a parser with default limits.
    ///
    /// # Errors
    ///
    /// See [`Multipart::from_request`].
    pub fn from_request_default(headers: &HeaderMap, body: Bytes) -> Result<Self, MultipartError> {
        Self::from_request(headers, body, MultipartConfig::default())
    }

    /// Reads the next field, returning `None` at the end of the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the field limit is exceeded, the field is larger
    /// than `max_field_size`, or the data is malformed.
    pub async fn next_field(&mut self) -> Result<Option<Part>, MultipartError> {
        let Some(field) = self.inner.next_field().await? else {
            return Ok(None);
        };

        self.field_count += 1;
        if self.field_count > self.config.max_fields {
            return Err(MultipartError::TooManyFields {
                max: self.config.max_fields,
            });
        }

        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(String::from);
        let content_type = field.content_type().map(ToString::to_string);
        let data = field.bytes().await?;

        if data.len() > self.config.max_field_size {
            return Err(MultipartError::TooLarge {
                max: self.config.max_field_size,
                actual: data.len(),
            });
        }

        Ok(Some(Part {
            name,
            file_name,
            content_type,
            data,
        }))
    }

    /// Reads the whole body, splitting text fields from file fields.
    ///
    /// A field is a file when it carries a `filename`.
    ///
    /// # Errors
    ///
    /// See [`Multipart::next_field`].
    pub async fn collect(mut self) -> Result<MultipartForm, MultipartError> {
        let mut form = MultipartForm::default();

        while let Some(part) = self.next_field().await? {
            if part.is_file() {
                form.files.push(part.into_file_item());
            } else {
                form.fields
                    .push((part.name, String::from_utf8_lossy(&part.data).into_owned()));
            }
        }

        Ok(form)
    }

    /// Reads the whole body and keeps only file fields.
    ///
    /// # Errors
    ///
    /// See [`Multipart::next_field`].
    pub async fn collect_files(self) -> Result<Vec<FileItem>, MultipartError> {
        self.collect().await.map(|form| form.files)
    }
}

impl std::fmt::Debug for Multipart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Multipart")
            .field("config", &self.config)
            .field("field_count", &self.field_count)
            .finish_non_exhaustive()
    }
}

/// One buffered multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

impl Part {
    /// Returns the form field name (empty when the part has none).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the client file name, for file fields.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Returns the part's MIME type.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the part content.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns `true` if the part is a file upload.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.file_name.is_some()
    }

    /// Converts the part into a [`FileItem`].
    #[must_use]
    pub fn into_file_item(self) -> FileItem {
        let mut item = FileItem::new(self.name, self.data);
        if let Some(file_name) = self.file_name {
            item = item.with_file_name(file_name);
        }
        if let Some(content_type) = self.content_type {
            item = item.with_content_type(content_type);
        }
        item
    }
}
