//! Error types for case decoding.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for case decoding operations.
pub type FoamIoResult<T> = Result<T, FoamIoError>;

/// Errors that can occur while decoding a case.
///
/// Token-level malformations inside an otherwise well-formed list are not
/// errors: decoders substitute zero and continue (a deliberate tolerance
/// for non-conformant real-world exports). "Unsupported field class" and
/// "empty field" are likewise not errors; the field loader reports them as
/// the `None` ("no data") outcome.
#[derive(Debug, Error)]
pub enum FoamIoError {
    /// No `FoamFile { ... }` header block in the artifact.
    #[error("FoamFile header not found")]
    HeaderNotFound,

    /// The `<count> ( ... )` list pattern is absent.
    #[error("malformed list: {reason}")]
    MalformedList {
        /// What was missing or unreadable.
        reason: String,
    },

    /// Neither the plain file nor its `.gz` sibling exists.
    #[error("file not found: {path} (also tried .gz)")]
    FileNotFound {
        /// The plain path that was tried first.
        path: PathBuf,
    },

    /// A core mesh artifact could not be read or parsed.
    ///
    /// Mesh loading is all-or-nothing: the first unreadable artifact
    /// aborts the whole assembly and is named here.
    #[error("failed to read mesh artifact `{artifact}`: {source}")]
    MeshRead {
        /// The artifact that failed (`points`, `faces`, `owner`,
        /// `neighbour`, or `boundary`).
        artifact: &'static str,
        /// The underlying failure.
        #[source]
        source: Box<FoamIoError>,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FoamIoError {
    /// Create a `MalformedList` error with the given reason.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedList {
            reason: reason.into(),
        }
    }

    /// Wrap an error as a `MeshRead` failure for the named artifact.
    #[must_use]
    pub fn mesh_read(artifact: &'static str, source: Self) -> Self {
        Self::MeshRead {
            artifact,
            source: Box::new(source),
        }
    }
}
