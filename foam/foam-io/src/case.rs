//! Case session.
//!
//! Owns the loaded mesh, the interpolation cache, and the filesystem
//! source for one case directory. Field loading at this level applies the
//! browse-friendly error policy: a field that fails to load is surfaced
//! as unavailable (`None`) with a warning, never as an aborted case.

use std::path::{Path, PathBuf};

use tracing::warn;

use foam_interp::InterpCache;
use foam_types::{FieldData, PolyMesh};

use crate::error::FoamIoResult;
use crate::field;
use crate::polymesh::read_poly_mesh;
use crate::source::{CaseSource, DirSource};

/// Reserved case subdirectories that are never timesteps.
const NON_TIME_DIRS: &[&str] = &["constant", "system"];

/// One opened case: mesh, source, and interpolation cache.
///
/// The mesh is read once at open; re-opening the case mints a fresh mesh
/// token, so cached interpolations can never leak across reloads.
///
/// # Example
///
/// ```no_run
/// use foam_io::FoamCase;
///
/// let mut case = FoamCase::open("/data/cavity").unwrap();
/// for time in case.time_directories().unwrap() {
///     if let Some(field) = case.load_field(&time, "p") {
///         println!("{time}: {} cells", field.cell_values.len());
///     }
/// }
/// ```
#[derive(Debug)]
pub struct FoamCase {
    source: DirSource,
    mesh: PolyMesh,
    cache: InterpCache,
}

impl FoamCase {
    /// Open a case directory and read its mesh.
    ///
    /// # Errors
    ///
    /// `MeshRead` naming the first mesh artifact that could not be read;
    /// mesh failures are fatal for the case.
    pub fn open(root: impl Into<PathBuf>) -> FoamIoResult<Self> {
        let source = DirSource::new(root.into());
        let mesh = read_poly_mesh(&source)?;
        Ok(Self {
            source,
            mesh,
            cache: InterpCache::new(),
        })
    }

    /// The loaded mesh.
    #[must_use]
    pub const fn mesh(&self) -> &PolyMesh {
        &self.mesh
    }

    /// Timestep directory names, sorted by numeric value.
    ///
    /// A child directory is a timestep when its name parses as a finite
    /// number; `constant` and `system` never qualify.
    ///
    /// # Errors
    ///
    /// I/O errors from listing the case root.
    pub fn time_directories(&self) -> FoamIoResult<Vec<String>> {
        let mut times: Vec<(f64, String)> = self
            .source
            .list_dirs(Path::new(""))?
            .into_iter()
            .filter(|name| !NON_TIME_DIRS.contains(&name.as_str()))
            .filter_map(|name| {
                name.parse::<f64>()
                    .ok()
                    .filter(|t| t.is_finite())
                    .map(|t| (t, name))
            })
            .collect();
        times.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(times.into_iter().map(|(_, name)| name).collect())
    }

    /// Field file names available in a timestep directory.
    ///
    /// `.gz` suffixes are stripped, so a compressed field lists under its
    /// plain name.
    ///
    /// # Errors
    ///
    /// I/O errors from listing the timestep directory.
    pub fn field_names(&self, time: &str) -> FoamIoResult<Vec<String>> {
        let mut names: Vec<String> = self
            .source
            .list_files(Path::new(time))?
            .into_iter()
            .map(|name| {
                name.strip_suffix(".gz")
                    .map_or(name.clone(), str::to_string)
            })
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Load one field for one timestep.
    ///
    /// Returns `None` both for "no data" (unsupported class, empty
    /// decode) and for load failures; failures are logged and never abort
    /// the case.
    pub fn load_field(&mut self, time: &str, name: &str) -> Option<FieldData> {
        match field::load_field(&self.source, time, name, &self.mesh, &mut self.cache) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(%error, time, name, "field unavailable");
                None
            }
        }
    }
}
