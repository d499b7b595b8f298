//! Multipart payloads and upload progress reporting

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use geoview_domain::{ApiError, FALLBACK_CONTENT_TYPE, UPLOAD_CHUNK_SIZE, UPLOAD_FIELD_NAME};
use reqwest::multipart::{Form, Part};
use reqwest::Body;

/// Progress event reported while the upload body is handed to the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    /// File bytes handed to the transport so far
    pub loaded: u64,
    /// Total file bytes in the payload
    pub total: u64,
}

/// Callback receiving [`UploadProgress`] events
pub type ProgressCallback = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// A file held in memory, ready to be uploaded
#[derive(Clone, PartialEq, Eq)]
pub struct FileInput {
    /// File name sent in the part's `Content-Disposition`
    pub file_name: String,
    /// MIME type of the part
    pub content_type: String,
    /// File contents; chunks taken for the upload body share this buffer
    pub bytes: Bytes,
}

impl FileInput {
    /// Wrap in-memory contents.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self { file_name: file_name.into(), content_type: content_type.into(), bytes: bytes.into() }
    }

    /// Read a file from disk, guessing its content type from the extension.
    ///
    /// # Errors
    ///
    /// Returns an unsendable error if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            ApiError::unsendable(format!("failed to read {}: {err}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| UPLOAD_FIELD_NAME.to_string(), |name| name.to_string_lossy().into_owned());
        let content_type = guess_content_type(path).to_string();
        Ok(Self { file_name, content_type, bytes: Bytes::from(bytes) })
    }

    /// Size in bytes
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the file has no contents
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for FileInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileInput")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn guess_content_type(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("geojson") => "application/geo+json",
        Some("json") => "application/json",
        Some("kml") => "application/vnd.google-earth.kml+xml",
        Some("gpx") => "application/gpx+xml",
        Some("csv") => "text/csv",
        Some("zip") => "application/zip",
        Some("tif" | "tiff") => "image/tiff",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("pdf") => "application/pdf",
        _ => FALLBACK_CONTENT_TYPE,
    }
}

/// One named part of a [`MultipartForm`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// Plain text field
    Text(String),
    /// File field
    File(FileInput),
}

/// Pre-built multipart payload, forwarded part by part as given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<(String, FormPart)>,
}

impl MultipartForm {
    /// Empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push((name.into(), FormPart::Text(value.into())));
        self
    }

    /// Append a file field.
    pub fn file(mut self, name: impl Into<String>, file: FileInput) -> Self {
        self.parts.push((name.into(), FormPart::File(file)));
        self
    }

    /// Parts in the order they will be sent
    pub fn parts(&self) -> &[(String, FormPart)] {
        &self.parts
    }

    /// Total size of all file parts, the `total` of progress events
    pub fn total_file_bytes(&self) -> u64 {
        self.parts
            .iter()
            .map(|(_, part)| match part {
                FormPart::File(file) => file.len(),
                FormPart::Text(_) => 0,
            })
            .sum()
    }
}

/// Input accepted by the upload operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPayload {
    /// A bare file, wrapped under the `file` field
    File(FileInput),
    /// A pre-built form, forwarded unchanged
    Form(MultipartForm),
}

impl UploadPayload {
    /// Form to encode for the transport.
    pub fn into_form(self) -> MultipartForm {
        match self {
            Self::File(file) => MultipartForm::new().file(UPLOAD_FIELD_NAME, file),
            Self::Form(form) => form,
        }
    }
}

impl From<FileInput> for UploadPayload {
    fn from(file: FileInput) -> Self {
        Self::File(file)
    }
}

impl From<MultipartForm> for UploadPayload {
    fn from(form: MultipartForm) -> Self {
        Self::Form(form)
    }
}

#[derive(Clone)]
struct ProgressTracker {
    loaded: Arc<AtomicU64>,
    total: u64,
    callback: Option<ProgressCallback>,
}

impl ProgressTracker {
    fn new(total: u64, callback: Option<ProgressCallback>) -> Self {
        Self { loaded: Arc::new(AtomicU64::new(0)), total, callback }
    }

    fn advance(&self, bytes: u64) {
        let loaded = self.loaded.fetch_add(bytes, Ordering::SeqCst) + bytes;
        if let Some(callback) = &self.callback {
            callback(UploadProgress { loaded, total: self.total });
        }
    }

    /// Emit the completion event for payloads without file bytes.
    fn finish_if_empty(&self) {
        if self.total == 0 {
            self.advance(0);
        }
    }

    /// Stream `bytes` in chunks, reporting each chunk as it is pulled.
    fn body(&self, bytes: Bytes) -> Body {
        let tracker = self.clone();
        let stream = futures::stream::iter(chunk_bytes(bytes)).map(move |chunk| {
            tracker.advance(chunk.len() as u64);
            Ok::<_, std::io::Error>(chunk)
        });
        Body::wrap_stream(stream)
    }
}

/// Split into views of at most [`UPLOAD_CHUNK_SIZE`] bytes over one buffer.
fn chunk_bytes(bytes: Bytes) -> Vec<Bytes> {
    (0..bytes.len())
        .step_by(UPLOAD_CHUNK_SIZE)
        .map(|start| bytes.slice(start..bytes.len().min(start + UPLOAD_CHUNK_SIZE)))
        .collect()
}

/// Encode a form for the transport, attaching progress reporting to file
/// parts.
pub(crate) fn encode(form: MultipartForm, progress: Option<ProgressCallback>) -> Result<Form, ApiError> {
    let tracker = ProgressTracker::new(form.total_file_bytes(), progress);

    let mut encoded = Form::new();
    for (name, part) in form.parts {
        encoded = match part {
            FormPart::Text(value) => encoded.text(name, value),
            FormPart::File(file) => {
                let length = file.len();
                let content_type = file.content_type;
                let part = Part::stream_with_length(tracker.body(file.bytes), length)
                    .file_name(file.file_name)
                    .mime_str(&content_type)
                    .map_err(|err| {
                        ApiError::unsendable(format!("invalid content type '{content_type}': {err}"))
                    })?;
                encoded.part(name, part)
            }
        };
    }

    tracker.finish_if_empty();
    Ok(encoded)
}
