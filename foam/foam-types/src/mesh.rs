//! Polyhedral mesh with implicit cell topology.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Aabb;

/// Process-wide counter for mesh identity tokens.
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// An ordered polygon face.
///
/// A face is a sequence of indices into the mesh point list; the order
/// defines the polygon winding. Valid faces have at least 3 points, but
/// shorter faces can appear in malformed exports and are carried through
/// (the geometry stage emits no triangles for them).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face(pub Vec<u32>);

impl Face {
    /// Create a face from point indices.
    #[inline]
    #[must_use]
    pub const fn new(indices: Vec<u32>) -> Self {
        Self(indices)
    }

    /// Number of points in the face.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the face has no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The point indices, in winding order.
    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.0
    }
}

impl From<Vec<u32>> for Face {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

/// A named boundary patch.
///
/// A patch covers the contiguous face range
/// `[start_face, start_face + n_faces)`, which always lies inside the
/// boundary-face range of the mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Boundary {
    /// Patch name (e.g. `movingWall`).
    pub name: String,
    /// Patch type word (e.g. `wall`, `patch`, `empty`).
    pub kind: String,
    /// Number of faces in the patch.
    pub n_faces: usize,
    /// Index of the first face of the patch.
    pub start_face: usize,
}

impl Boundary {
    /// Check whether a face index falls inside this patch.
    #[inline]
    #[must_use]
    pub const fn contains_face(&self, face_index: usize) -> bool {
        face_index >= self.start_face && face_index < self.start_face + self.n_faces
    }
}

/// An unstructured polyhedral mesh.
///
/// Built once per case load and immutable thereafter. Cells are implicit:
/// the owner array gives the cell on one side of every face, the neighbour
/// array the cell on the other side of every *internal* face. The cell
/// count is inferred as `max(owner) + 1`.
///
/// # Invariants
///
/// - `faces.len() >= owner.len() >= neighbour.len()`
/// - internal faces occupy indices `[0, neighbour.len())`
/// - boundary faces occupy `[neighbour.len(), faces.len())`
/// - each boundary's face range lies within the boundary-face range
///
/// # Example
///
/// ```
/// use foam_types::{Boundary, Face, PolyMesh, Point3};
/// use std::collections::BTreeMap;
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let faces = vec![Face::new(vec![0, 1, 2])];
/// let mut boundaries = BTreeMap::new();
/// boundaries.insert(
///     "wall".to_string(),
///     Boundary { name: "wall".into(), kind: "wall".into(), n_faces: 1, start_face: 0 },
/// );
/// let mesh = PolyMesh::new(points, faces, vec![0], vec![], boundaries);
///
/// assert_eq!(mesh.cell_count(), 1);
/// assert!(!mesh.is_internal_face(0));
/// assert_eq!(mesh.boundary_of_face(0).map(|b| b.name.as_str()), Some("wall"));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolyMesh {
    /// Point coordinates.
    pub points: Vec<Point3<f64>>,
    /// Polygon faces as indices into `points`.
    pub faces: Vec<Face>,
    /// Owner cell per face, parallel to `faces`.
    pub owner: Vec<i32>,
    /// Neighbour cell per internal face; shorter than `owner`.
    pub neighbour: Vec<i32>,
    /// Boundary patches by name.
    pub boundaries: BTreeMap<String, Boundary>,
    /// Identity token minted at assembly, unique per loaded mesh.
    ///
    /// Caches key interpolation results by this value, so a reloaded case
    /// (same paths, new mesh) never reuses stale results.
    token: u64,
}

impl PolyMesh {
    /// Assemble a mesh from decoded artifacts.
    ///
    /// Mints a fresh identity token; two meshes built from identical input
    /// never share one.
    #[must_use]
    pub fn new(
        points: Vec<Point3<f64>>,
        faces: Vec<Face>,
        owner: Vec<i32>,
        neighbour: Vec<i32>,
        boundaries: BTreeMap<String, Boundary>,
    ) -> Self {
        Self {
            points,
            faces,
            owner,
            neighbour,
            boundaries,
            token: NEXT_TOKEN.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// The mesh identity token.
    #[inline]
    #[must_use]
    pub const fn token(&self) -> u64 {
        self.token
    }

    /// Number of points.
    #[inline]
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of internal faces (faces shared by two cells).
    #[inline]
    #[must_use]
    pub fn internal_face_count(&self) -> usize {
        self.neighbour.len()
    }

    /// Inferred number of cells: `max(owner) + 1`, 0 for an empty owner
    /// array.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.owner
            .iter()
            .copied()
            .max()
            .map_or(0, |m| usize::try_from(m + 1).unwrap_or(0))
    }

    /// Check whether the mesh has no points and no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.faces.is_empty()
    }

    /// Check whether a face index denotes an internal face.
    #[inline]
    #[must_use]
    pub fn is_internal_face(&self, face_index: usize) -> bool {
        face_index < self.neighbour.len()
    }

    /// Find the boundary patch owning a face index, if any.
    ///
    /// Resolution matches the face index against each patch's
    /// `[start_face, start_face + n_faces)` range. Faces outside every
    /// declared range yield `None`.
    #[must_use]
    pub fn boundary_of_face(&self, face_index: usize) -> Option<&Boundary> {
        self.boundaries
            .values()
            .find(|b| b.contains_face(face_index))
    }

    /// Bounding box over all points.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.points.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cell_mesh() -> PolyMesh {
        // Two cells sharing one internal face (face 0); faces 1-4 are
        // boundary faces split across two patches.
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![
            Face::new(vec![0, 1, 2, 3]),
            Face::new(vec![0, 1, 2]),
            Face::new(vec![1, 2, 3]),
            Face::new(vec![2, 3, 0]),
            Face::new(vec![3, 0, 1]),
        ];
        let owner = vec![0, 0, 0, 1, 1];
        let neighbour = vec![1];
        let mut boundaries = BTreeMap::new();
        boundaries.insert(
            "walls".to_string(),
            Boundary {
                name: "walls".into(),
                kind: "wall".into(),
                n_faces: 2,
                start_face: 1,
            },
        );
        boundaries.insert(
            "outlet".to_string(),
            Boundary {
                name: "outlet".into(),
                kind: "patch".into(),
                n_faces: 2,
                start_face: 3,
            },
        );
        PolyMesh::new(points, faces, owner, neighbour, boundaries)
    }

    #[test]
    fn cell_count_inferred_from_owner() {
        let mesh = two_cell_mesh();
        assert_eq!(mesh.cell_count(), 2);
    }

    #[test]
    fn cell_count_zero_for_empty_owner() {
        let mesh = PolyMesh::new(vec![], vec![], vec![], vec![], BTreeMap::new());
        assert_eq!(mesh.cell_count(), 0);
        assert!(mesh.is_empty());
    }

    #[test]
    fn internal_face_range() {
        let mesh = two_cell_mesh();
        assert!(mesh.is_internal_face(0));
        assert!(!mesh.is_internal_face(1));
        assert_eq!(mesh.internal_face_count(), 1);
    }

    #[test]
    fn boundary_resolution_by_face_range() {
        let mesh = two_cell_mesh();
        assert_eq!(
            mesh.boundary_of_face(1).map(|b| b.name.as_str()),
            Some("walls")
        );
        assert_eq!(
            mesh.boundary_of_face(4).map(|b| b.name.as_str()),
            Some("outlet")
        );
        assert!(mesh.boundary_of_face(0).is_none());
        assert!(mesh.boundary_of_face(99).is_none());
    }

    #[test]
    fn tokens_are_unique() {
        let a = two_cell_mesh();
        let b = two_cell_mesh();
        assert_ne!(a.token(), b.token());
    }

    #[test]
    fn face_accessors() {
        let face = Face::new(vec![3, 1, 4, 1]);
        assert_eq!(face.len(), 4);
        assert!(!face.is_empty());
        assert_eq!(face.indices(), &[3, 1, 4, 1]);
    }
}
