use thiserror::Error;

/// Errors produced by the store layer and the operations driving it.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Generic I/O error (index writes, image payloads).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Index (de)serialization failure.
    #[error("Index error: {0}")]
    Json(#[from] serde_json::Error),

    /// A note reached the store without a storage-assigned identifier.
    #[error("Note has no id")]
    MissingId,

    /// Base64 image payload could not be decoded.
    #[error("Invalid image data: {0}")]
    InvalidImage(#[from] base64::DecodeError),

    /// Image payload decoded to zero bytes.
    #[error("Image data is empty")]
    EmptyImage,

    /// A relative path tried to escape the storage root.
    #[error("Invalid path")]
    InvalidPath,
}

/// Validation failures caught before any command is constructed.
/// Surfaced verbatim as user-visible messages; no state mutation has
/// happened when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Note title can't be empty!")]
    EmptyTitle,

    #[error("Note can't be empty!")]
    EmptyContent,

    #[error("Enter URL")]
    EmptyUrl,

    #[error("Enter valid URL")]
    InvalidUrl,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
