//! Core data model for FoamSight.
//!
//! This crate provides the foundational types for the decode pipeline:
//!
//! - [`PolyMesh`] - An immutable polyhedral mesh with owner/neighbour topology
//! - [`Face`] - An ordered polygon face (point indices, length >= 3)
//! - [`Boundary`] - A named boundary patch covering a face range
//! - [`FieldData`] - Cell-centered values for one field at one timestep
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with no I/O or rendering dependencies. It can be
//! used in CLI tools, servers, and WASM targets.
//!
//! # Cell Topology
//!
//! Cells are never stored directly. Every face knows the cell on its owner
//! side (`owner[face]`) and, for internal faces, the cell on the other side
//! (`neighbour[face]`). Internal faces occupy indices
//! `[0, neighbour.len())`; boundary faces occupy the tail
//! `[neighbour.len(), faces.len())` and belong to named [`Boundary`]
//! patches.
//!
//! # Example
//!
//! ```
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
//! assert_eq!(mesh.cell_count(), 1);
//! assert_eq!(mesh.internal_face_count(), 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod field;
mod mesh;

pub use bounds::Aabb;
pub use field::{DataMode, FieldData};
pub use mesh::{Boundary, Face, PolyMesh};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
