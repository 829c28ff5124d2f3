//! Cell-to-point field interpolation.
//!
//! Cell-centered field values are scattered onto mesh points by averaging
//! over shared-face adjacency: every face contributes its owner cell's
//! value to each of its points, and internal faces additionally contribute
//! the neighbour cell's value. Each point ends up with the mean of all
//! contributions; points referenced by no face stay at `0`.
//!
//! The result is deterministic and order-independent for a fixed
//! mesh/field pair, and always has length `mesh.point_count()`.
//!
//! # Example
//!
//! ```
//! use foam_interp::cell_to_point;
//! use foam_types::{Face, PolyMesh, Point3};
//! use std::collections::BTreeMap;
//!
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let faces = vec![Face::new(vec![0, 1, 2])];
//! let mesh = PolyMesh::new(points, faces, vec![0], vec![], BTreeMap::new());
//!
//! let point_values = cell_to_point(&[5.0], &mesh);
//! assert_eq!(point_values, vec![5.0, 5.0, 5.0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod cache;

pub use cache::{CacheKey, InterpCache};

use foam_types::PolyMesh;
use tracing::warn;

/// Scatter cell-centered values onto mesh points.
///
/// For every face, the owner cell's value is added to an accumulator for
/// each point the face references, with a per-point contribution counter;
/// internal faces also add the neighbour cell's value. Accumulators are
/// divided by their counters; untouched points remain `0`.
///
/// Owner, neighbour, or point indices outside their arrays are skipped
/// (sparse or malformed exports carry such faces; dropping the
/// contribution keeps the rest of the field usable).
///
/// The output always has length `mesh.point_count()`.
#[must_use]
pub fn cell_to_point(cell_values: &[f64], mesh: &PolyMesh) -> Vec<f64> {
    let n_points = mesh.point_count();
    let mut sums = vec![0.0f64; n_points];
    let mut counts = vec![0u32; n_points];
    let mut skipped = 0usize;

    let mut scatter = |cell: i32, face: &foam_types::Face, skipped: &mut usize| {
        let Some(&value) = usize::try_from(cell).ok().and_then(|c| cell_values.get(c)) else {
            *skipped += 1;
            return;
        };
        for &point in face.indices() {
            let point = point as usize;
            if point < n_points {
                sums[point] += value;
                counts[point] += 1;
            } else {
                *skipped += 1;
            }
        }
    };

    for (face_index, face) in mesh.faces.iter().enumerate() {
        let Some(&owner) = mesh.owner.get(face_index) else {
            skipped += 1;
            continue;
        };
        scatter(owner, face, &mut skipped);

        if let Some(&neighbour) = mesh.neighbour.get(face_index) {
            scatter(neighbour, face, &mut skipped);
        }
    }

    if skipped > 0 {
        warn!(skipped, "dropped out-of-range contributions during cell-to-point interpolation");
    }

    for (sum, &count) in sums.iter_mut().zip(&counts) {
        if count > 0 {
            *sum /= f64::from(count);
        }
    }
    sums
}
