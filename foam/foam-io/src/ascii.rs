//! ASCII list decoders.
//!
//! Operates on the payload text after the `FoamFile` header (see
//! [`FoamHeader::body_offset`](crate::FoamHeader::body_offset)). All
//! decoders share the `<count> ( <elements> )` list shape and the same
//! leniency rules:
//!
//! - an element token that fails to parse as a number is substituted with
//!   zero and decoding continues;
//! - a face group whose declared point count disagrees with the parsed
//!   index count keeps the parsed indices and logs a warning;
//! - an `inGroups` entry in the boundary dictionary is skipped entirely.
//!
//! These tolerances match what real-world exports require; only a missing
//! `<count> (` pattern is a hard [`MalformedList`](crate::FoamIoError)
//! error.

use std::collections::BTreeMap;

use nalgebra::Point3;
use tracing::{debug, warn};

use foam_types::{Boundary, Face};

use crate::error::{FoamIoError, FoamIoResult};
use crate::lexer::{Lexer, Token};

/// A decoded `internalField` entry.
#[derive(Debug, Clone, PartialEq)]
pub enum InternalField {
    /// `uniform <value>;` — a single representative value the caller
    /// broadcasts to the cell count.
    Uniform(f64),
    /// `nonuniform List<...> <N> ( ... );` — one value per cell.
    Nonuniform(Vec<f64>),
}

/// Decode a scalar list `<N> ( v0 v1 ... )`.
///
/// # Errors
///
/// `MalformedList` when the count/parenthesis pattern is absent.
pub fn decode_scalar_list(body: &str) -> FoamIoResult<Vec<f64>> {
    let mut lexer = Lexer::new(body);
    let count = find_list_start(&mut lexer)?;
    let values = read_scalar_elements(&mut lexer, count);
    check_count("scalar list", count, values.len());
    Ok(values)
}

/// Decode a vector list `<N> ( (x y z) ... )`.
///
/// # Errors
///
/// `MalformedList` when the count/parenthesis pattern is absent.
pub fn decode_vector_list(body: &str) -> FoamIoResult<Vec<Point3<f64>>> {
    let mut lexer = Lexer::new(body);
    let count = find_list_start(&mut lexer)?;
    let values = read_vector_elements(&mut lexer, count);
    check_count("vector list", count, values.len());
    Ok(values)
}

/// Decode a label list (owner/neighbour arrays).
///
/// Decoded as a scalar list, then narrowed to integers. Fractional values
/// only appear in non-conformant exports; they are truncated with a
/// warning rather than rejected.
///
/// # Errors
///
/// `MalformedList` when the count/parenthesis pattern is absent.
pub fn decode_label_list(body: &str) -> FoamIoResult<Vec<i32>> {
    let values = decode_scalar_list(body)?;
    let mut fractional = 0usize;
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: labels are 32-bit in the format; larger values do not occur
    let labels = values
        .iter()
        .map(|&v| {
            if v.fract() != 0.0 {
                fractional += 1;
            }
            v as i32
        })
        .collect();
    if fractional > 0 {
        warn!(fractional, "label list contains fractional values; truncating");
    }
    Ok(labels)
}

/// Decode a face list: repeated `<n>( i0 i1 ... )` groups inside the
/// outer list parentheses.
///
/// A mismatch between a group's declared `n` and the parsed index count
/// is tolerated; the parsed indices win.
///
/// # Errors
///
/// `MalformedList` when the outer count/parenthesis pattern is absent.
pub fn decode_face_list(body: &str) -> FoamIoResult<Vec<Face>> {
    let mut lexer = Lexer::new(body);
    let count = find_list_start(&mut lexer)?;
    let mut faces = Vec::with_capacity(count);

    loop {
        match lexer.next_token() {
            Some(Token::RParen) | None => break,
            Some(Token::Number(n)) => {
                if !matches!(lexer.peek(), Some(Token::LParen)) {
                    continue;
                }
                lexer.next_token();
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                // Truncation: declared counts are small positive integers
                let declared = n.max(0.0) as usize;
                let indices = read_index_elements(&mut lexer, declared);
                if indices.len() != declared {
                    warn!(
                        declared,
                        parsed = indices.len(),
                        "face point count mismatch; keeping parsed indices"
                    );
                }
                faces.push(Face::new(indices));
            }
            Some(_) => {}
        }
    }

    check_count("face list", count, faces.len());
    Ok(faces)
}

/// Decode the boundary dictionary:
/// `<N> ( <name> { type <word>; nFaces <int>; startFace <int>; ... } ... )`.
///
/// An entry named `inGroups` is skipped entirely. Any other named block
/// becomes a [`Boundary`] only if it declares both `type` and
/// `nFaces > 0`.
///
/// # Errors
///
/// `MalformedList` when the outer count/parenthesis pattern is absent.
pub fn decode_boundary(body: &str) -> FoamIoResult<BTreeMap<String, Boundary>> {
    let mut lexer = Lexer::new(body);
    let _count = find_list_start(&mut lexer)?;
    let mut boundaries = BTreeMap::new();

    loop {
        match lexer.next_token() {
            Some(Token::RParen) | None => break,
            Some(Token::Ident(name)) => {
                if name == "inGroups" {
                    skip_entry(&mut lexer);
                    continue;
                }
                if !matches!(lexer.peek(), Some(Token::LBrace)) {
                    continue;
                }
                lexer.next_token();
                let entries = read_block(&mut lexer);

                let kind = entries.get("type");
                let n_faces = entries
                    .get("nFaces")
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(0);
                if let Some(kind) = kind {
                    if n_faces > 0 {
                        let start_face = entries
                            .get("startFace")
                            .and_then(|v| v.parse::<usize>().ok())
                            .unwrap_or(0);
                        boundaries.insert(
                            name.to_string(),
                            Boundary {
                                name: name.to_string(),
                                kind: kind.clone(),
                                n_faces,
                                start_face,
                            },
                        );
                    } else {
                        debug!(patch = name, "skipping boundary with no faces");
                    }
                } else {
                    debug!(patch = name, "skipping boundary without a type");
                }
            }
            Some(_) => {}
        }
    }

    Ok(boundaries)
}

/// Decode the `internalField` entry of a field file.
///
/// Supports `uniform <scalar|(x y z)>;` and
/// `nonuniform List<scalar|vector> <N> ( ... );`. Vector values are
/// reduced to their Euclidean magnitude; raw vectors never leave the
/// decoder. Returns `Ok(None)` when no `internalField` entry exists.
///
/// # Errors
///
/// `MalformedList` when a nonuniform entry lacks the count/parenthesis
/// pattern, or a uniform entry has no value.
pub fn decode_internal_field(body: &str) -> FoamIoResult<Option<InternalField>> {
    let mut lexer = Lexer::new(body);
    loop {
        match lexer.next_token() {
            None => return Ok(None),
            Some(Token::Ident("internalField")) => break,
            Some(_) => {}
        }
    }

    match lexer.next_token() {
        Some(Token::Ident("uniform")) => match lexer.next_token() {
            Some(Token::Number(v)) => Ok(Some(InternalField::Uniform(v))),
            Some(Token::LParen) => {
                let components = read_scalar_elements(&mut lexer, 3);
                Ok(Some(InternalField::Uniform(magnitude(&components))))
            }
            _ => Err(FoamIoError::malformed("uniform value missing")),
        },
        Some(Token::Ident("nonuniform")) => {
            // The List<scalar|vector> tag is normally present; when it is
            // not, the element shape disambiguates below.
            let mut is_vector = None;
            if let Some(Token::Ident(tag)) = lexer.peek() {
                if tag.starts_with("List<") {
                    is_vector = Some(tag.contains("vector"));
                    lexer.next_token();
                }
            }
            let count = find_list_start(&mut lexer)?;
            let is_vector =
                is_vector.unwrap_or_else(|| matches!(lexer.peek(), Some(Token::LParen)));
            let values = if is_vector {
                read_vector_elements(&mut lexer, count)
                    .iter()
                    .map(|p| magnitude(&[p.x, p.y, p.z]))
                    .collect()
            } else {
                read_scalar_elements(&mut lexer, count)
            };
            check_count("internalField", count, values.len());
            Ok(Some(InternalField::Nonuniform(values)))
        }
        _ => Ok(None),
    }
}

/// Scan for the `<count> (` list opening, consuming both tokens.
fn find_list_start(lexer: &mut Lexer<'_>) -> FoamIoResult<usize> {
    while let Some(token) = lexer.next_token() {
        if let Token::Number(n) = token {
            if matches!(lexer.peek(), Some(Token::LParen)) {
                lexer.next_token();
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                // Truncation: counts are non-negative integers in practice
                return Ok(n.max(0.0) as usize);
            }
        }
    }
    Err(FoamIoError::malformed(
        "count/parenthesis pattern absent",
    ))
}

/// Read bare numbers until the closing parenthesis (or end of input).
/// Unparsable tokens become zero.
fn read_scalar_elements(lexer: &mut Lexer<'_>, capacity: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(capacity);
    loop {
        match lexer.next_token() {
            Some(Token::RParen) | None => break,
            Some(Token::Number(v)) => values.push(v),
            Some(other) => {
                warn!(?other, "unparsable scalar element; substituting 0");
                values.push(0.0);
            }
        }
    }
    values
}

/// Read parenthesized 3-tuples until the closing parenthesis.
/// Unparsable components become zero; stray tokens between tuples are
/// skipped.
fn read_vector_elements(lexer: &mut Lexer<'_>, capacity: usize) -> Vec<Point3<f64>> {
    let mut values = Vec::with_capacity(capacity);
    loop {
        match lexer.next_token() {
            Some(Token::RParen) | None => break,
            Some(Token::LParen) => {
                let mut components = [0.0f64; 3];
                let mut i = 0;
                loop {
                    match lexer.next_token() {
                        Some(Token::RParen) | None => break,
                        Some(Token::Number(v)) => {
                            if i < 3 {
                                components[i] = v;
                            }
                            i += 1;
                        }
                        Some(other) => {
                            warn!(?other, "unparsable vector component; substituting 0");
                            i += 1;
                        }
                    }
                }
                values.push(Point3::new(components[0], components[1], components[2]));
            }
            Some(other) => {
                warn!(?other, "stray token in vector list; skipping");
            }
        }
    }
    values
}

/// Read face point indices until the closing parenthesis.
/// Unparsable or negative indices become zero.
fn read_index_elements(lexer: &mut Lexer<'_>, capacity: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(capacity);
    loop {
        match lexer.next_token() {
            Some(Token::RParen) | None => break,
            Some(Token::Number(v)) if v >= 0.0 => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                // Truncation: point indices are 32-bit in the format
                indices.push(v as u32);
            }
            Some(other) => {
                warn!(?other, "unparsable face index; substituting 0");
                indices.push(0);
            }
        }
    }
    indices
}

/// Read `key value...;` pairs until the closing brace.
///
/// Multi-token values are joined with single spaces; nested
/// sub-dictionaries and parenthesized lists are skipped.
fn read_block(lexer: &mut Lexer<'_>) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();
    let mut current: Vec<String> = Vec::new();
    loop {
        match lexer.next_token() {
            Some(Token::RBrace) | None => break,
            Some(Token::Semi) => {
                if current.len() >= 2 {
                    entries.insert(current[0].clone(), current[1..].join(" "));
                }
                current.clear();
            }
            Some(Token::Ident(word) | Token::Str(word)) => {
                current.push(word.to_string());
            }
            Some(Token::Number(v)) => current.push(format_number(v)),
            Some(Token::LParen) => skip_to_rparen(lexer),
            Some(Token::LBrace) => skip_to_rbrace(lexer),
            Some(Token::RParen) => {}
        }
    }
    entries
}

/// Skip the value of a `name ...;` entry or a `name { ... }` block.
fn skip_entry(lexer: &mut Lexer<'_>) {
    if matches!(lexer.peek(), Some(Token::LBrace)) {
        lexer.next_token();
        skip_to_rbrace(lexer);
        return;
    }
    while let Some(token) = lexer.next_token() {
        if token == Token::Semi {
            break;
        }
    }
}

fn skip_to_rparen(lexer: &mut Lexer<'_>) {
    let mut depth = 1usize;
    while let Some(token) = lexer.next_token() {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
            _ => {}
        }
    }
}

fn skip_to_rbrace(lexer: &mut Lexer<'_>) {
    let mut depth = 1usize;
    while let Some(token) = lexer.next_token() {
        match token {
            Token::LBrace => depth += 1,
            Token::RBrace => {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
            _ => {}
        }
    }
}

fn check_count(what: &str, declared: usize, parsed: usize) {
    if declared != parsed {
        debug!(what, declared, parsed, "list count mismatch; keeping parsed elements");
    }
}

fn magnitude(components: &[f64]) -> f64 {
    components.iter().map(|c| c * c).sum::<f64>().sqrt()
}

/// Render a number the way the dictionary wrote it (integers without a
/// trailing `.0`), so block values like `nFaces 10` stay parseable.
fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 9.0e18 {
        #[allow(clippy::cast_possible_truncation)]
        // Truncation guarded by the fract() and range checks
        let int = v as i64;
        return int.to_string();
    }
    v.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scalar_list_roundtrip() {
        let values = decode_scalar_list("4 ( 1.5 -2 3e2 0 )").unwrap();
        assert_eq!(values, vec![1.5, -2.0, 300.0, 0.0]);
    }

    #[test]
    fn vector_list_roundtrip() {
        let body = "3 ( (0 0 0) (1 0.5 -1) (2 2 2) )";
        let values = decode_vector_list(body).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values[1], Point3::new(1.0, 0.5, -1.0));
    }

    #[test]
    fn bad_scalar_token_becomes_zero() {
        let values = decode_scalar_list("3 ( 1 oops 3 )").unwrap();
        assert_eq!(values, vec![1.0, 0.0, 3.0]);
    }

    #[test]
    fn missing_parenthesis_is_malformed() {
        let err = decode_scalar_list("just words, no list").unwrap_err();
        assert!(matches!(err, FoamIoError::MalformedList { .. }));
    }

    #[test]
    fn comments_are_ignored() {
        let body = "// count\n2 /* inline */ ( 1 2 )";
        assert_eq!(decode_scalar_list(body).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn label_list_narrows_to_integers() {
        let labels = decode_label_list("3 ( 0 1 2 )").unwrap();
        assert_eq!(labels, vec![0, 1, 2]);
    }

    #[test]
    fn label_list_truncates_fractional_values() {
        let labels = decode_label_list("2 ( 1.7 2 )").unwrap();
        assert_eq!(labels, vec![1, 2]);
    }

    #[test]
    fn face_list_basic() {
        let faces = decode_face_list("2 ( 3(0 1 2) 4(0 1 2 3) )").unwrap();
        assert_eq!(faces.len(), 2);
        assert_eq!(faces[0].indices(), &[0, 1, 2]);
        assert_eq!(faces[1].indices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn face_count_mismatch_keeps_parsed_indices() {
        let faces = decode_face_list("1 ( 4(0 1 2) )").unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].indices(), &[0, 1, 2]);
    }

    #[test]
    fn boundary_with_in_groups_sibling() {
        let body = r"
            2
            (
                movingWall
                {
                    type wall;
                    nFaces 10;
                    startFace 50;
                }
                inGroups (wallGroup);
            )
        ";
        let boundaries = decode_boundary(body).unwrap();
        assert_eq!(boundaries.len(), 1);
        let wall = &boundaries["movingWall"];
        assert_eq!(wall.kind, "wall");
        assert_eq!(wall.n_faces, 10);
        assert_eq!(wall.start_face, 50);
    }

    #[test]
    fn boundary_in_groups_inside_block_is_skipped() {
        let body = r"
            1
            (
                walls
                {
                    type wall;
                    inGroups 1(wallGroup);
                    nFaces 4;
                    startFace 8;
                }
            )
        ";
        let boundaries = decode_boundary(body).unwrap();
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries["walls"].n_faces, 4);
        assert_eq!(boundaries["walls"].start_face, 8);
    }

    #[test]
    fn boundary_without_type_or_faces_is_dropped() {
        let body = r"
            2
            (
                empty0 { nFaces 3; startFace 0; }
                empty1 { type patch; nFaces 0; startFace 0; }
            )
        ";
        let boundaries = decode_boundary(body).unwrap();
        assert!(boundaries.is_empty());
    }

    #[test]
    fn uniform_scalar_field() {
        let field = decode_internal_field("internalField uniform 5;").unwrap();
        assert_eq!(field, Some(InternalField::Uniform(5.0)));
    }

    #[test]
    fn uniform_vector_field_reduces_to_magnitude() {
        let field = decode_internal_field("internalField uniform (3 4 0);").unwrap();
        match field {
            Some(InternalField::Uniform(v)) => assert_relative_eq!(v, 5.0),
            other => panic!("expected uniform, got {other:?}"),
        }
    }

    #[test]
    fn nonuniform_scalar_field() {
        let body = "internalField nonuniform List<scalar> 3 ( 1 2 3 );";
        let field = decode_internal_field(body).unwrap();
        assert_eq!(field, Some(InternalField::Nonuniform(vec![1.0, 2.0, 3.0])));
    }

    #[test]
    fn nonuniform_vector_field_reduces_to_magnitudes() {
        let body = "internalField nonuniform List<vector> 2 ( (3 4 0) (0 0 2) );";
        let field = decode_internal_field(body).unwrap();
        match field {
            Some(InternalField::Nonuniform(values)) => {
                assert_relative_eq!(values[0], 5.0);
                assert_relative_eq!(values[1], 2.0);
            }
            other => panic!("expected nonuniform, got {other:?}"),
        }
    }

    #[test]
    fn nonuniform_without_type_tag_sniffs_element_shape() {
        let body = "internalField nonuniform 2 ( (1 0 0) (0 2 0) );";
        let field = decode_internal_field(body).unwrap();
        match field {
            Some(InternalField::Nonuniform(values)) => {
                assert_relative_eq!(values[0], 1.0);
                assert_relative_eq!(values[1], 2.0);
            }
            other => panic!("expected nonuniform, got {other:?}"),
        }
    }

    #[test]
    fn absent_internal_field_is_none() {
        assert_eq!(decode_internal_field("dimensions [0 1 0 0 0 0 0];").unwrap(), None);
    }

    #[test]
    fn surrounding_entries_are_skipped() {
        let body = r"
            dimensions [0 2 -2 0 0 0 0];
            internalField nonuniform List<scalar> 2 ( 7 8 );
            boundaryField { inlet { type fixedValue; } }
        ";
        let field = decode_internal_field(body).unwrap();
        assert_eq!(field, Some(InternalField::Nonuniform(vec![7.0, 8.0])));
    }
}
