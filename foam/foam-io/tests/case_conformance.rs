//! End-to-end conformance tests over on-disk cases.
//!
//! These tests write small synthetic cases (a unit-cube cavity cut into
//! two cells) to a temp directory and drive the whole decode pipeline
//! through the public API, including the `.gz` storage variant and mixed
//! ASCII/binary encodings.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::tempdir;

use foam_io::FoamCase;

fn header(class: &str, object: &str, format: &str) -> String {
    format!(
        "FoamFile\n{{\n    version 2.0;\n    format {format};\n    class {class};\n    object {object};\n}}\n"
    )
}

/// Two unit cubes stacked along x, sharing one internal face.
///
/// 12 points, 11 faces: face 0 internal, faces 1-10 boundary, split into
/// a `walls` patch (8 faces) and a `frontAndBack` patch (2 faces).
struct TwoCellCase;

impl TwoCellCase {
    const POINTS: &'static str = "12\n(\n(0 0 0) (1 0 0) (2 0 0)\n(0 1 0) (1 1 0) (2 1 0)\n(0 0 1) (1 0 1) (2 0 1)\n(0 1 1) (1 1 1) (2 1 1)\n)\n";

    const FACES: &'static str = concat!(
        "11\n(\n",
        "4(1 4 10 7)\n",  // 0: internal, x=1 plane
        "4(0 3 9 6)\n",   // 1: x=0
        "4(2 5 11 8)\n",  // 2: x=2
        "4(0 1 7 6)\n",   // 3: y=0 left
        "4(1 2 8 7)\n",   // 4: y=0 right
        "4(3 4 10 9)\n",  // 5: y=1 left
        "4(4 5 11 10)\n", // 6: y=1 right
        "4(0 1 4 3)\n",   // 7: z=0 left
        "4(1 2 5 4)\n",   // 8: z=0 right
        "4(6 7 10 9)\n",  // 9: z=1 left
        "4(7 8 11 10)\n", // 10: z=1 right
        ")\n"
    );

    const OWNER: &'static str = "11\n(\n0 0 1 0 1 0 1 0 1 0 1\n)\n";
    const NEIGHBOUR: &'static str = "1\n(\n1\n)\n";

    const BOUNDARY: &'static str = concat!(
        "2\n(\n",
        "    walls\n    {\n        type wall;\n        nFaces 8;\n        startFace 1;\n",
        "        inGroups 1(wallGroup);\n    }\n",
        "    frontAndBack\n    {\n        type patch;\n        nFaces 2;\n        startFace 9;\n    }\n",
        ")\n"
    );

    fn write(root: &Path, gz_fields: bool) {
        let mesh_dir = root.join("constant/polyMesh");
        fs::create_dir_all(&mesh_dir).unwrap();
        fs::write(
            mesh_dir.join("points"),
            header("vectorField", "points", "ascii") + Self::POINTS,
        )
        .unwrap();
        fs::write(
            mesh_dir.join("faces"),
            header("faceList", "faces", "ascii") + Self::FACES,
        )
        .unwrap();
        fs::write(
            mesh_dir.join("owner"),
            header("labelList", "owner", "ascii") + Self::OWNER,
        )
        .unwrap();
        fs::write(
            mesh_dir.join("neighbour"),
            header("labelList", "neighbour", "ascii") + Self::NEIGHBOUR,
        )
        .unwrap();
        fs::write(
            mesh_dir.join("boundary"),
            header("polyBoundaryMesh", "boundary", "ascii") + Self::BOUNDARY,
        )
        .unwrap();

        let field = header("volScalarField", "p", "ascii")
            + "dimensions [0 2 -2 0 0 0 0];\ninternalField nonuniform List<scalar> 2 ( 1 3 );\nboundaryField\n{\n}\n";
        fs::create_dir(root.join("0")).unwrap();
        if gz_fields {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(field.as_bytes()).unwrap();
            fs::write(root.join("0/p.gz"), encoder.finish().unwrap()).unwrap();
        } else {
            fs::write(root.join("0/p"), field).unwrap();
        }
    }
}

#[test]
fn loads_two_cell_case() {
    let dir = tempdir().unwrap();
    TwoCellCase::write(dir.path(), false);

    let case = FoamCase::open(dir.path()).unwrap();
    let mesh = case.mesh();

    assert_eq!(mesh.point_count(), 12);
    assert_eq!(mesh.face_count(), 11);
    assert_eq!(mesh.internal_face_count(), 1);
    assert_eq!(mesh.cell_count(), 2);

    // The inGroups entry is dropped; only named patches survive.
    assert_eq!(mesh.boundaries.len(), 2);
    assert_eq!(mesh.boundaries["walls"].n_faces, 8);
    assert_eq!(mesh.boundaries["frontAndBack"].start_face, 9);
}

#[test]
fn field_interpolates_onto_points() {
    let dir = tempdir().unwrap();
    TwoCellCase::write(dir.path(), false);

    let mut case = FoamCase::open(dir.path()).unwrap();
    let field = case.load_field("0", "p").unwrap();

    assert_eq!(field.cell_values, vec![1.0, 3.0]);
    let points = field.point_values.unwrap();
    assert_eq!(points.len(), 12);

    // Points 0,3,6,9 lie on the x=0 plane: only cell 0 faces touch them.
    assert!((points[0] - 1.0).abs() < 1e-12);
    // Points 2,5,8,11 lie on the x=2 plane: only cell 1 faces touch them.
    assert!((points[2] - 3.0).abs() < 1e-12);
    // Shared-plane points see both cells.
    assert!(points[1] > 1.0 && points[1] < 3.0);
}

#[test]
fn gz_case_decodes_identically_to_plain() {
    let plain_dir = tempdir().unwrap();
    let gz_dir = tempdir().unwrap();
    TwoCellCase::write(plain_dir.path(), false);
    TwoCellCase::write(gz_dir.path(), true);

    let mut plain = FoamCase::open(plain_dir.path()).unwrap();
    let mut gz = FoamCase::open(gz_dir.path()).unwrap();

    assert_eq!(gz.field_names("0").unwrap(), vec!["p"]);

    let plain_field = plain.load_field("0", "p").unwrap();
    let gz_field = gz.load_field("0", "p").unwrap();
    assert_eq!(plain_field.cell_values, gz_field.cell_values);
    assert_eq!(plain_field.point_values, gz_field.point_values);
}

#[test]
fn reload_mints_a_fresh_mesh_token() {
    let dir = tempdir().unwrap();
    TwoCellCase::write(dir.path(), false);

    let first = FoamCase::open(dir.path()).unwrap();
    let second = FoamCase::open(dir.path()).unwrap();
    assert_ne!(first.mesh().token(), second.mesh().token());
}
