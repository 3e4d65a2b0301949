use thiserror::Error;

/// Domain-level errors raised by the core before any network I/O.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A display key could not be resolved back to a backend identity.
    ///
    /// This is always a local bug (a malformed or foreign key reached a
    /// mutation entry point) and must be surfaced without issuing a request.
    #[error("Invalid record identifier `{key}`: {reason}")]
    InvalidIdentifier { key: String, reason: String },

    /// The operation is not applicable to the record's kind
    /// (e.g. batch-selecting a non-issue record).
    #[error("Operation not supported for {kind} records")]
    KindNotSupported { kind: &'static str },
}
