use thiserror::Error;

/// Local rejection of a chosen image. No request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a valid image (JPEG or PNG).")]
    UnsupportedType(String),
    #[error("Image size should be less than 5MB.")]
    TooLarge { size: u64, limit: u64 },
}

/// Failure of a call to either remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Server error: {status} - {body}")]
    ServerRejected { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),
    #[error("Download failed: {0}")]
    Download(String),
}
