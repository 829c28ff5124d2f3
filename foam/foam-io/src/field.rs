//! Field loading.
//!
//! Decodes one timestep's field file into cell-centered values and runs
//! the interpolator to populate per-point values. "No data" (an
//! unsupported class or an empty decode) is the `Ok(None)` outcome, not
//! an error; only I/O and parse failures propagate as `Err`.

use std::path::Path;

use tracing::debug;

use foam_interp::{cell_to_point, CacheKey, InterpCache};
use foam_types::{DataMode, FieldData, PolyMesh};

use crate::ascii::{self, InternalField};
use crate::error::FoamIoResult;
use crate::header::FoamHeader;
use crate::source::CaseSource;

/// Load one field for one timestep.
///
/// Resolves `<time>/<name>` through the source, checks the header class
/// (only `ScalarField`/`VectorField` classes carry displayable data),
/// decodes the `internalField` grammar, broadcasts uniform values to the
/// mesh cell count, and interpolates point values (consulting the cache
/// keyed by mesh token, field path, and mode).
///
/// Returns `Ok(None)` when the file holds no displayable data.
///
/// # Errors
///
/// I/O failures (including a missing file) and malformed-list parse
/// failures.
pub fn load_field(
    source: &dyn CaseSource,
    time: &str,
    name: &str,
    mesh: &PolyMesh,
    cache: &mut InterpCache,
) -> FoamIoResult<Option<FieldData>> {
    let bytes = source.read(&Path::new(time).join(name))?;
    let header = FoamHeader::parse(&bytes)?;

    let class = header.class().unwrap_or("").to_string();
    if !class.contains("ScalarField") && !class.contains("VectorField") {
        debug!(name, %class, "field class carries no displayable data");
        return Ok(None);
    }

    let body = String::from_utf8_lossy(&bytes[header.body_offset()..]);
    let Some(internal) = ascii::decode_internal_field(&body)? else {
        debug!(name, "field file has no internalField entry");
        return Ok(None);
    };

    let cell_values = match internal {
        InternalField::Uniform(value) => vec![value; mesh.cell_count()],
        InternalField::Nonuniform(values) => values,
    };
    if cell_values.is_empty() {
        debug!(name, "field decoded to zero values");
        return Ok(None);
    }

    let key = CacheKey {
        mesh_token: mesh.token(),
        field_key: format!("{time}/{name}"),
        mode: DataMode::Point,
    };
    let point_values = match cache.get(&key) {
        Some(cached) => cached.to_vec(),
        None => {
            let values = cell_to_point(&cell_values, mesh);
            cache.store(key, values.clone());
            values
        }
    };

    Ok(Some(FieldData {
        name: name.to_string(),
        class,
        cell_values,
        point_values: Some(point_values),
    }))
}
