//! File acquisition seam.
//!
//! The decode pipeline is pure over in-memory buffers; this module is the
//! one place that touches the filesystem. Any leaf file of a case may
//! exist either plain or gzip-compressed with a `.gz` suffix, and both
//! must decode identically, so [`CaseSource::read`] resolves the suffix
//! and decompresses transparently before the decoders ever see the bytes.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::debug;

use crate::error::{FoamIoError, FoamIoResult};

/// Magic prefix of a gzip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Supplies raw artifact bytes for a case.
///
/// Implementations resolve plain-vs-`.gz` storage and decompress
/// transparently; callers always receive decoded bytes.
pub trait CaseSource {
    /// Read the artifact at a case-relative path.
    ///
    /// # Errors
    ///
    /// [`FoamIoError::FileNotFound`] when neither the plain path nor its
    /// `.gz` sibling exists; I/O errors otherwise.
    fn read(&self, relative: &Path) -> FoamIoResult<Vec<u8>>;

    /// List the names of subdirectories at a case-relative path.
    ///
    /// # Errors
    ///
    /// I/O errors from the underlying listing.
    fn list_dirs(&self, relative: &Path) -> FoamIoResult<Vec<String>>;

    /// List the names of files at a case-relative path.
    ///
    /// # Errors
    ///
    /// I/O errors from the underlying listing.
    fn list_files(&self, relative: &Path) -> FoamIoResult<Vec<String>>;
}

/// A case rooted at a directory on the local filesystem.
///
/// # Example
///
/// ```no_run
/// use foam_io::{CaseSource, DirSource};
/// use std::path::Path;
///
/// let source = DirSource::new("/data/cavity");
/// let bytes = source.read(Path::new("constant/polyMesh/points")).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Create a source rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The case root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CaseSource for DirSource {
    fn read(&self, relative: &Path) -> FoamIoResult<Vec<u8>> {
        let plain = self.root.join(relative);
        if plain.is_file() {
            return decompress_if_gzip(fs::read(&plain)?);
        }

        let gz = append_gz(&plain);
        if gz.is_file() {
            debug!(path = %gz.display(), "reading gzip sibling");
            return decompress_if_gzip(fs::read(&gz)?);
        }

        Err(FoamIoError::FileNotFound { path: plain })
    }

    fn list_dirs(&self, relative: &Path) -> FoamIoResult<Vec<String>> {
        list_entries(&self.root.join(relative), true)
    }

    fn list_files(&self, relative: &Path) -> FoamIoResult<Vec<String>> {
        list_entries(&self.root.join(relative), false)
    }
}

/// Decompress when the gzip magic is present; pass through otherwise.
///
/// Checking the magic rather than the file name also catches compressed
/// files stored without the `.gz` suffix.
fn decompress_if_gzip(bytes: Vec<u8>) -> FoamIoResult<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }
    let mut decoded = Vec::new();
    GzDecoder::new(bytes.as_slice()).read_to_end(&mut decoded)?;
    Ok(decoded)
}

fn append_gz(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".gz");
    PathBuf::from(name)
}

fn list_entries(dir: &Path, dirs: bool) -> FoamIoResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let is_dir = entry.file_type()?.is_dir();
        if is_dir == dirs {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}
