//! GPU geometry preparation for FoamSight.
//!
//! Consumes a decoded [`PolyMesh`](foam_types::PolyMesh) and optional
//! [`FieldData`](foam_types::FieldData) and produces the flat buffers the
//! external renderer uploads verbatim: f32 positions (3 per vertex), u32
//! triangle indices, f32 RGBA colors (4 per vertex), a view center, and
//! an auto-zoom factor.
//!
//! Camera, shading, depth ordering, and draw calls live in the external
//! renderer; this crate stops at the buffer boundary.
//!
//! # Example
//!
//! ```
//! use foam_render::{to_render_geometry, RenderOptions};
//! use foam_types::{Face, PolyMesh, Point3};
//! use std::collections::BTreeMap;
//!
//! let mesh = PolyMesh::new(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![Face::new(vec![0, 1, 2])],
//!     vec![0],
//!     vec![],
//!     BTreeMap::new(),
//! );
//!
//! let geometry = to_render_geometry(&mesh, None, &RenderOptions::default());
//! assert_eq!(geometry.vertex_count(), 3);
//! assert_eq!(geometry.triangle_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod colormap;
mod geometry;

pub use colormap::colormap;
pub use geometry::{
    to_render_geometry, RenderGeometry, RenderOptions, FALLBACK_COLOR,
};
