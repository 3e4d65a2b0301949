use thiserror::Error;

/// Errors from document synthesis or the final save step.
///
/// Packaging errors propagate to the caller; no partial file is ever left
/// behind (saving goes through a temporary file that is renamed only after
/// a complete write).
#[derive(Debug, Error)]
pub enum DocError {
    /// The OPC container could not be written.
    #[error("Failed to package document: {0}")]
    Package(#[from] zip::result::ZipError),

    /// Filesystem error while saving the generated bytes.
    #[error("Failed to save document: {0}")]
    Io(#[from] std::io::Error),
}
