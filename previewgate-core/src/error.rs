//! Wire-visible error taxonomy (§7).
//!
//! The blob client and office bridge never surface these directly — they
//! return typed outcomes or empty byte streams. The dispatcher crate is the
//! sole site that turns a [`PipelineError`] into an HTTP response.

use thiserror::Error;

/// Fixed message strings, mirrored from the original source's
/// `message.py` constants table.
pub mod messages {
    pub const STORAGE_UNAVAILABLE: &str = "Storage is currently unavailable";
    pub const GENERIC_STORAGE_ERROR: &str = "Storage returned an error";
    pub const ITEM_NOT_FOUND: &str = "Requested item was not found";
    pub const INPUT_ERROR: &str = "Input is not valid";
    pub const DOCS_EDITOR_UNAVAILABLE: &str = "Document converter is currently unavailable";
    pub const DOC_PREVIEW_DISABLED: &str = "Document preview is disabled on this instance";
    pub const DOC_THUMBNAIL_DISABLED: &str = "Document thumbnail is disabled on this instance";
    pub const NUMBER_OF_PAGES_NOT_VALID: &str = "Requested page range is not valid";
    pub const HEIGHT_OR_WIDTH_NOT_VALID: &str = "Requested width or height is not valid";
    pub const ID_NOT_VALID: &str = "Requested identifier is not a valid UUID";
    pub const VERSION_NOT_VALID: &str = "Requested version is not valid";
    pub const FORMAT_NOT_SUPPORTED: &str = "Requested output format is not supported";
}

/// A convenience [`Result`] for `previewgate-core`.
pub type CoreResult<T> = Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Area parse failure, page-range validation failure, unsupported
    /// output format, or an unparseable PDF at the rasterize step (§4.3).
    #[error("{0}")]
    InvalidInput(String),

    /// `enable_document_preview = false` and a document-preview endpoint
    /// was called.
    #[error("{}", messages::DOC_PREVIEW_DISABLED)]
    DocPreviewDisabled,

    /// `enable_document_thumbnail = false` and a document-thumbnail
    /// endpoint was called.
    #[error("{}", messages::DOC_THUMBNAIL_DISABLED)]
    DocThumbnailDisabled,

    /// Storage responded 404.
    #[error("{}", messages::ITEM_NOT_FOUND)]
    ItemNotFound,

    /// UUID / enum / page-range validator rejection.
    #[error("{0}")]
    Unprocessable(String),

    /// `/ready` probe found the converter down while documents are enabled.
    #[error("{}", messages::DOCS_EDITOR_UNAVAILABLE)]
    DocsEditorUnavailable,

    /// Storage responded with a 4xx other than 404; propagated with that
    /// status code.
    #[error("storage returned {status}")]
    GenericStorageError { status: u16 },

    /// Storage 5xx, a transport error, or a timeout — re-coded 502.
    #[error("{}", messages::STORAGE_UNAVAILABLE)]
    StorageUnavailable,
}

impl PipelineError {
    /// The HTTP status code this error maps to (§7).
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::DocPreviewDisabled | Self::DocThumbnailDisabled => 400,
            Self::ItemNotFound => 404,
            Self::Unprocessable(_) => 422,
            Self::DocsEditorUnavailable => 429,
            Self::GenericStorageError { status } => *status,
            Self::StorageUnavailable => 502,
        }
    }
}
