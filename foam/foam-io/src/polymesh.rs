//! Mesh assembly.
//!
//! Reads the five `constant/polyMesh` artifacts, sniffs each one's
//! encoding, runs the matching decoder, and assembles one immutable
//! [`PolyMesh`]. Assembly is all-or-nothing: the first unreadable or
//! unparsable artifact fails the whole load with a
//! [`MeshRead`](crate::FoamIoError::MeshRead) error naming it; partial
//! meshes are never returned.

use std::borrow::Cow;
use std::path::Path;

use tracing::{info, warn};

use foam_types::PolyMesh;

use crate::error::{FoamIoError, FoamIoResult};
use crate::header::{is_binary, FoamHeader};
use crate::source::CaseSource;
use crate::{ascii, binary};

/// Case-relative directory holding the mesh artifacts.
pub const POLY_MESH_DIR: &str = "constant/polyMesh";

/// The payload of an artifact, split off after its header.
enum Payload<'a> {
    Ascii(Cow<'a, str>),
    Binary(&'a [u8]),
}

fn split_payload(bytes: &[u8]) -> FoamIoResult<Payload<'_>> {
    let header = FoamHeader::parse(bytes)?;
    let tail = &bytes[header.body_offset()..];
    if is_binary(bytes) {
        Ok(Payload::Binary(tail))
    } else {
        Ok(Payload::Ascii(String::from_utf8_lossy(tail)))
    }
}

/// Read and assemble the mesh of a case.
///
/// # Errors
///
/// `MeshRead` naming the first artifact that could not be read or parsed.
pub fn read_poly_mesh(source: &dyn CaseSource) -> FoamIoResult<PolyMesh> {
    let points = read_artifact(source, "points", |payload| match payload {
        Payload::Ascii(text) => ascii::decode_vector_list(&text),
        Payload::Binary(bytes) => binary::decode_vector_list(bytes),
    })?;
    let faces = read_artifact(source, "faces", |payload| match payload {
        Payload::Ascii(text) => ascii::decode_face_list(&text),
        Payload::Binary(bytes) => binary::decode_face_list(bytes),
    })?;
    let owner = read_artifact(source, "owner", |payload| match payload {
        Payload::Ascii(text) => ascii::decode_label_list(&text),
        Payload::Binary(bytes) => binary::decode_label_list(bytes),
    })?;
    let neighbour = read_artifact(source, "neighbour", |payload| match payload {
        Payload::Ascii(text) => ascii::decode_label_list(&text),
        Payload::Binary(bytes) => binary::decode_label_list(bytes),
    })?;

    // Boundary is always ASCII, whatever the other artifacts use.
    let boundaries = read_artifact(source, "boundary", |payload| {
        let text = match payload {
            Payload::Ascii(text) => text,
            Payload::Binary(bytes) => String::from_utf8_lossy(bytes),
        };
        ascii::decode_boundary(&text)
    })?;

    let mesh = PolyMesh::new(points, faces, owner, neighbour, boundaries);
    check_invariants(&mesh);

    info!(
        points = mesh.point_count(),
        faces = mesh.face_count(),
        cells = mesh.cell_count(),
        boundaries = mesh.boundaries.len(),
        "loaded polyMesh"
    );
    Ok(mesh)
}

fn read_artifact<T>(
    source: &dyn CaseSource,
    artifact: &'static str,
    decode: impl FnOnce(Payload<'_>) -> FoamIoResult<T>,
) -> FoamIoResult<T> {
    let run = || {
        let bytes = source.read(&Path::new(POLY_MESH_DIR).join(artifact))?;
        decode(split_payload(&bytes)?)
    };
    run().map_err(|e| FoamIoError::mesh_read(artifact, e))
}

/// Warn about violated structural invariants without failing the load;
/// downstream stages guard their own index accesses.
fn check_invariants(mesh: &PolyMesh) {
    if mesh.owner.len() > mesh.face_count() {
        warn!(
            owner = mesh.owner.len(),
            faces = mesh.face_count(),
            "owner array longer than face list"
        );
    }
    if mesh.neighbour.len() > mesh.owner.len() {
        warn!(
            neighbour = mesh.neighbour.len(),
            owner = mesh.owner.len(),
            "neighbour array longer than owner array"
        );
    }
    for boundary in mesh.boundaries.values() {
        let end = boundary.start_face + boundary.n_faces;
        if boundary.start_face < mesh.internal_face_count() || end > mesh.face_count() {
            warn!(
                patch = %boundary.name,
                start = boundary.start_face,
                end,
                "boundary face range outside the boundary-face region"
            );
        }
    }
}
