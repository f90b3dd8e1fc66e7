// Path: crates/types/src/error.rs

//! Core error types for the Agora proposal layer.
//!
//! The taxonomy distinguishes transient failures (safe to retry), absent
//! records (`NotFound`), malformed input (requires correction, never
//! retried), and authorization failures. Address-mismatch conflicts during
//! publishing are reported, not raised, so they carry no variant here.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors produced when parsing an account address from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    /// The `0x` prefix was missing.
    #[error("address `{0}` is missing the 0x prefix")]
    MissingPrefix(String),
    /// The address did not have exactly 40 hex digits.
    #[error("address has {got} hex digits, expected {expected}")]
    WrongLength {
        /// Number of digits found after the prefix.
        got: usize,
        /// Number of digits required.
        expected: usize,
    },
    /// The address contained non-hexadecimal characters.
    #[error("address `{0}` contains non-hexadecimal characters")]
    InvalidHex(String),
}

impl ErrorCode for AddressParseError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingPrefix(_) => "ADDRESS_MISSING_PREFIX",
            Self::WrongLength { .. } => "ADDRESS_WRONG_LENGTH",
            Self::InvalidHex(_) => "ADDRESS_INVALID_HEX",
        }
    }
}

/// Errors raised by the JSON-RPC transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A network-level failure that is safe to retry.
    #[error("transient transport failure: {0}")]
    Transient(String),
    /// The upstream node returned a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc {
        /// The JSON-RPC error code.
        code: i64,
        /// The JSON-RPC error message.
        message: String,
    },
    /// The response could not be decoded.
    #[error("malformed rpc response: {0}")]
    Malformed(String),
    /// Every configured endpoint was exhausted without a response.
    #[error("all {0} endpoints exhausted")]
    Exhausted(usize),
}

impl TransportError {
    /// Whether the failure is transient and safe to retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_) | Self::Exhausted(_))
    }
}

impl ErrorCode for TransportError {
    fn code(&self) -> &'static str {
        match self {
            Self::Transient(_) => "TRANSPORT_TRANSIENT",
            Self::Rpc { .. } => "TRANSPORT_RPC_ERROR",
            Self::Malformed(_) => "TRANSPORT_MALFORMED",
            Self::Exhausted(_) => "TRANSPORT_EXHAUSTED",
        }
    }
}

/// Errors raised by a content-store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No content exists at the requested address.
    #[error("content not found")]
    NotFound,
    /// A network-level failure that is safe to retry.
    #[error("transient store failure: {0}")]
    Transient(String),
    /// A non-retryable backend failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl ErrorCode for StoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "STORE_NOT_FOUND",
            Self::Transient(_) => "STORE_TRANSIENT",
            Self::Backend(_) => "STORE_BACKEND_ERROR",
        }
    }
}

/// Errors raised by the content-addressing pipeline.
#[derive(Debug, Error)]
pub enum ContentError {
    /// No content exists at the requested address. User-visible as an
    /// empty state; not retryable.
    #[error("no content at address `{0}`")]
    NotFound(String),
    /// The fetched bytes were not a well-formed document. Requires input
    /// correction; not retryable.
    #[error("malformed content: {0}")]
    Malformed(String),
    /// A network-level failure that is safe to retry automatically.
    #[error("transient content failure: {0}")]
    Transient(String),
    /// Canonical serialization of the structured content failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(String),
}

impl ContentError {
    /// Whether the failure is transient; only these are safe to retry
    /// automatically.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    /// Lifts a store-level error into the pipeline taxonomy.
    pub fn from_store(err: StoreError, address: &str) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound(address.to_string()),
            StoreError::Transient(msg) => Self::Transient(msg),
            StoreError::Backend(msg) => Self::Malformed(msg),
        }
    }
}

impl ErrorCode for ContentError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "CONTENT_NOT_FOUND",
            Self::Malformed(_) => "CONTENT_MALFORMED",
            Self::Transient(_) => "CONTENT_TRANSIENT",
            Self::Canonicalization(_) => "CONTENT_CANONICALIZATION",
        }
    }
}

/// Errors raised while parsing a contract interface description or an
/// embedded transaction string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbiError {
    /// The interface JSON was invalid or missing required fields. Always
    /// recoverable at the caller: show the error, let the user fix the text.
    #[error("malformed interface: {0}")]
    MalformedInterface(String),
    /// An embedded transaction string did not match the canonical grammar.
    /// Callers fall back to displaying the raw string.
    #[error("malformed embedded transaction: {0}")]
    MalformedEncoding(String),
    /// A parameter type name was outside the supported grammar.
    #[error("unsupported parameter type `{0}`")]
    UnsupportedType(String),
}

impl ErrorCode for AbiError {
    fn code(&self) -> &'static str {
        match self {
            Self::MalformedInterface(_) => "ABI_MALFORMED_INTERFACE",
            Self::MalformedEncoding(_) => "ABI_MALFORMED_ENCODING",
            Self::UnsupportedType(_) => "ABI_UNSUPPORTED_TYPE",
        }
    }
}

/// Errors raised when validating free-text input against a parameter type.
///
/// Messages are written to be shown next to the offending field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input was not a base-10 integer (with an optional leading sign
    /// for signed types).
    #[error("`{raw}` is not a base-10 integer")]
    NotAnInteger {
        /// The rejected input.
        raw: String,
    },
    /// The integer did not fit the type's bit width.
    #[error("`{raw}` is out of range for {type_name}")]
    OutOfRange {
        /// The rejected input.
        raw: String,
        /// The parameter type name, e.g. `uint8`.
        type_name: String,
    },
    /// A signed value was given for an unsigned type.
    #[error("`{raw}` is negative but {type_name} is unsigned")]
    UnexpectedSign {
        /// The rejected input.
        raw: String,
        /// The parameter type name.
        type_name: String,
    },
    /// The input was not valid hexadecimal.
    #[error("`{raw}` is not valid hexadecimal")]
    NotHex {
        /// The rejected input.
        raw: String,
    },
    /// A fixed-size byte string had the wrong length.
    #[error("expected {expected} bytes, got {got}")]
    WrongByteLength {
        /// Number of bytes found.
        got: usize,
        /// Number of bytes required.
        expected: usize,
    },
    /// The input was not a well-formed address.
    #[error(transparent)]
    Address(#[from] AddressParseError),
    /// The input was neither `true` nor `false`.
    #[error("`{raw}` is not `true` or `false`")]
    NotABoolean {
        /// The rejected input.
        raw: String,
    },
    /// One element of an array input failed validation; the index is
    /// zero-based.
    #[error("element {index}: {source}")]
    ArrayElement {
        /// Zero-based index of the failing element.
        index: usize,
        /// The element's own validation failure.
        #[source]
        source: Box<ValidationError>,
    },
}

impl ErrorCode for ValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotAnInteger { .. } => "VALIDATE_NOT_AN_INTEGER",
            Self::OutOfRange { .. } => "VALIDATE_OUT_OF_RANGE",
            Self::UnexpectedSign { .. } => "VALIDATE_UNEXPECTED_SIGN",
            Self::NotHex { .. } => "VALIDATE_NOT_HEX",
            Self::WrongByteLength { .. } => "VALIDATE_WRONG_BYTE_LENGTH",
            Self::Address(_) => "VALIDATE_ADDRESS",
            Self::NotABoolean { .. } => "VALIDATE_NOT_A_BOOLEAN",
            Self::ArrayElement { .. } => "VALIDATE_ARRAY_ELEMENT",
        }
    }
}

/// Errors raised by the registry sync engine.
///
/// The engine swallows per-record and per-batch failures to keep returning
/// partial results; these variants are for failures of the operation as a
/// whole.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The requested proposal number has no populated record.
    #[error("proposal {0} not found")]
    NotFound(u64),
    /// The transport failed in a way that prevented any result.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The proposal's content could not be fetched or parsed.
    #[error(transparent)]
    Content(#[from] ContentError),
    /// The registry returned a record the engine could not interpret.
    #[error("malformed registry record: {0}")]
    Malformed(String),
}

impl ErrorCode for SyncError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "SYNC_NOT_FOUND",
            Self::Transport(e) => e.code(),
            Self::Content(e) => e.code(),
            Self::Malformed(_) => "SYNC_MALFORMED_RECORD",
        }
    }
}

/// Errors raised by the status transition gate.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// The client-side permission check rejected the request before any
    /// network call. Mirrors, but does not replace, the registry's own
    /// enforcement.
    #[error("{role:?} may not move a proposal from `{from}` to `{to}`")]
    Unauthorized {
        /// The caller's permission tier.
        role: crate::app::Role,
        /// Display name of the current status.
        from: String,
        /// Display name of the requested status.
        to: String,
    },
    /// The requested target status is not in the registered vocabulary.
    #[error("`{0}` is not a registered status")]
    UnknownStatus(String),
    /// The on-chain submission failed; the upstream message is surfaced
    /// verbatim rather than reinterpreted.
    #[error(transparent)]
    Submission(#[from] TransportError),
}

impl ErrorCode for TransitionError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "TRANSITION_UNAUTHORIZED",
            Self::UnknownStatus(_) => "TRANSITION_UNKNOWN_STATUS",
            Self::Submission(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(TransportError::Transient("timeout".into()).is_transient());
        assert!(!TransportError::Rpc {
            code: -32000,
            message: "revert".into()
        }
        .is_transient());

        assert!(ContentError::Transient("reset".into()).is_transient());
        assert!(!ContentError::NotFound("Qm".into()).is_transient());
        assert!(!ContentError::Malformed("bad header".into()).is_transient());
    }

    #[test]
    fn store_errors_lift_into_content_taxonomy() {
        let err = ContentError::from_store(StoreError::NotFound, "QmMissing");
        assert_eq!(err.code(), "CONTENT_NOT_FOUND");
        let err = ContentError::from_store(StoreError::Transient("eof".into()), "Qm");
        assert!(err.is_transient());
    }

    #[test]
    fn codes_are_stable_strings() {
        assert_eq!(
            SyncError::NotFound(7).code(),
            "SYNC_NOT_FOUND",
            "codes are part of the public contract"
        );
        assert_eq!(
            ValidationError::NotABoolean { raw: "yes".into() }.code(),
            "VALIDATE_NOT_A_BOOLEAN"
        );
    }
}
