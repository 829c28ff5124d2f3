//! Face triangulation and GPU buffer preparation.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use foam_types::{DataMode, FieldData, PolyMesh};

use crate::colormap::colormap;

/// Fallback per-vertex color when no field data is displayed
/// (light steel blue, the renderer's neutral surface color).
pub const FALLBACK_COLOR: [f32; 4] = [0.5, 0.7, 1.0, 1.0];

/// Numerator of the auto-zoom factor: `auto_zoom = 200 / max_extent`.
const AUTO_ZOOM_NUMERATOR: f32 = 200.0;

/// Auto-zoom when the mesh is empty or degenerate (all extents zero).
const FALLBACK_AUTO_ZOOM: f32 = 1.0;

/// What to include and how to color it.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Color vertices from interpolated point values (default) or
    /// normalize against the raw cell-value range.
    pub data_mode: DataMode,
    /// Include internal faces (off by default: only the domain surface
    /// is visible).
    pub show_internal_mesh: bool,
    /// Boundary patches to hide; patches not listed are visible.
    pub hidden_boundaries: BTreeSet<String>,
}

/// Flat buffers ready for GPU upload, plus view parameters.
///
/// Layout matches the external renderer's contract: 3 floats per vertex
/// position, 3 indices per triangle, 4 floats (RGBA) per vertex color.
/// No depth ordering is performed here; that is the renderer's job.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderGeometry {
    /// Vertex positions, `[x0, y0, z0, x1, ...]`.
    pub positions: Vec<f32>,
    /// Triangle indices, three per triangle.
    pub indices: Vec<u32>,
    /// Vertex colors, `[r0, g0, b0, a0, r1, ...]`.
    pub colors: Vec<f32>,
    /// Bounding-box midpoint.
    pub center: [f32; 3],
    /// View zoom that frames the whole mesh.
    pub auto_zoom: f32,
}

impl RenderGeometry {
    /// Number of vertices in the buffers.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles in the index buffer.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Convert a mesh (and optionally one field) into GPU-ready buffers.
///
/// Emits one vertex per mesh point with raw coordinates. Faces are fan
/// triangulated: a face of `n` points yields `n - 2` triangles
/// `(0, i, i+1)`. Internal faces are included only when
/// `options.show_internal_mesh`; a boundary face is included unless its
/// owning patch is hidden (faces matching no patch stay visible).
///
/// Coloring uses the interpolated point values, normalized over the
/// range of the source selected by `options.data_mode`; without field
/// data (or without interpolated values) every vertex gets
/// [`FALLBACK_COLOR`].
#[must_use]
pub fn to_render_geometry(
    mesh: &PolyMesh,
    field: Option<&FieldData>,
    options: &RenderOptions,
) -> RenderGeometry {
    let mut positions = Vec::with_capacity(mesh.point_count() * 3);
    for point in &mesh.points {
        #[allow(clippy::cast_possible_truncation)]
        // Truncation: GPU positions are f32 by contract
        positions.extend_from_slice(&[point.x as f32, point.y as f32, point.z as f32]);
    }

    let colors = vertex_colors(mesh, field, options.data_mode);
    let indices = triangulate(mesh, options);

    let bounds = mesh.bounds();
    let (center, auto_zoom) = if bounds.is_empty() {
        ([0.0, 0.0, 0.0], FALLBACK_AUTO_ZOOM)
    } else {
        let c = bounds.center();
        #[allow(clippy::cast_possible_truncation)]
        // Truncation: view parameters are f32 by contract
        let center = [c.x as f32, c.y as f32, c.z as f32];
        #[allow(clippy::cast_possible_truncation)]
        let extent = bounds.max_extent() as f32;
        let auto_zoom = if extent > 0.0 {
            AUTO_ZOOM_NUMERATOR / extent
        } else {
            FALLBACK_AUTO_ZOOM
        };
        (center, auto_zoom)
    };

    debug!(
        vertices = mesh.point_count(),
        triangles = indices.len() / 3,
        auto_zoom,
        "prepared render geometry"
    );

    RenderGeometry {
        positions,
        indices,
        colors,
        center,
        auto_zoom,
    }
}

/// One RGBA color per mesh point.
///
/// Per-vertex scalars always come from the interpolated point values
/// (the only per-vertex data there is); the selected data mode only
/// changes which source defines the normalization range, so cell mode
/// spreads the palette over the raw cell-value range.
fn vertex_colors(mesh: &PolyMesh, field: Option<&FieldData>, mode: DataMode) -> Vec<f32> {
    let n_points = mesh.point_count();

    let colored = field.and_then(|f| {
        let point_values = f.values(DataMode::Point)?;
        let (min, max) = f.value_range(mode)?;
        Some((point_values, min, max))
    });

    let mut colors = Vec::with_capacity(n_points * 4);
    match colored {
        Some((values, min, max)) => {
            for i in 0..n_points {
                let value = values.get(i).copied().unwrap_or(min);
                colors.extend_from_slice(&colormap(value, min, max));
            }
        }
        None => {
            for _ in 0..n_points {
                colors.extend_from_slice(&FALLBACK_COLOR);
            }
        }
    }
    colors
}

/// Fan-triangulate every included face.
fn triangulate(mesh: &PolyMesh, options: &RenderOptions) -> Vec<u32> {
    let n_points = mesh.point_count();
    let mut indices = Vec::new();
    let mut skipped_triangles = 0usize;

    for (face_index, face) in mesh.faces.iter().enumerate() {
        if mesh.is_internal_face(face_index) {
            if !options.show_internal_mesh {
                continue;
            }
        } else if let Some(boundary) = mesh.boundary_of_face(face_index) {
            if options.hidden_boundaries.contains(&boundary.name) {
                continue;
            }
        }

        let face = face.indices();
        if face.len() < 3 {
            continue;
        }
        for i in 1..face.len() - 1 {
            let tri = [face[0], face[i], face[i + 1]];
            // Out-of-range indices occur in sparse exports; the triangle
            // is dropped, not the whole face.
            if tri.iter().all(|&idx| (idx as usize) < n_points) {
                indices.extend_from_slice(&tri);
            } else {
                skipped_triangles += 1;
            }
        }
    }

    if skipped_triangles > 0 {
        warn!(skipped_triangles, "skipped triangles with out-of-range point indices");
    }
    indices
}
