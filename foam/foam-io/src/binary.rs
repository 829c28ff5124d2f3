//! Binary list decoders.
//!
//! Operates on the raw bytes following the `FoamFile` header. A binary
//! list still opens with an ASCII `<count> (` prelude; the payload starts
//! right after the whitespace following `(`. Three record layouts exist:
//!
//! - **vector list** - `count` × 24-byte records of three little-endian
//!   f64 components;
//! - **label list** - `count` × 4-byte little-endian i32;
//! - **face list** - `count` variable-length records: a little-endian
//!   i32 point count `n` followed by `n` little-endian i32 indices.
//!
//! Decoding works on slices (no whole-file text materialization) and
//! stops silently when the remaining bytes cannot satisfy a full record;
//! partial trailing bytes are dropped.

use nalgebra::Point3;
use tracing::debug;

use foam_types::Face;

use crate::error::{FoamIoError, FoamIoResult};

/// How far past the header the decoder looks for the opening `(` of a
/// binary list before declaring the artifact malformed.
pub const BINARY_SCAN_WINDOW: usize = 4096;

/// Decode a binary vector list (24-byte records of three LE f64).
///
/// # Errors
///
/// `MalformedList` when the `<count> (` prelude is absent within the
/// bounded scan window.
pub fn decode_vector_list(body: &[u8]) -> FoamIoResult<Vec<Point3<f64>>> {
    let (count, mut pos) = find_payload(body)?;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(chunk) = body.get(pos..pos + 24) else {
            note_shortfall("vector", count, values.len());
            break;
        };
        values.push(Point3::new(
            read_f64_le(chunk, 0),
            read_f64_le(chunk, 8),
            read_f64_le(chunk, 16),
        ));
        pos += 24;
    }
    Ok(values)
}

/// Decode a binary label list (4-byte LE i32 records).
///
/// # Errors
///
/// `MalformedList` when the `<count> (` prelude is absent within the
/// bounded scan window.
pub fn decode_label_list(body: &[u8]) -> FoamIoResult<Vec<i32>> {
    let (count, mut pos) = find_payload(body)?;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(chunk) = body.get(pos..pos + 4) else {
            note_shortfall("label", count, values.len());
            break;
        };
        values.push(read_i32_le(chunk, 0));
        pos += 4;
    }
    Ok(values)
}

/// Decode a binary face list (variable-length records: LE i32 point
/// count, then that many LE i32 indices).
///
/// A record whose index payload runs past the end of the buffer is
/// dropped along with everything after it.
///
/// # Errors
///
/// `MalformedList` when the `<count> (` prelude is absent within the
/// bounded scan window.
pub fn decode_face_list(body: &[u8]) -> FoamIoResult<Vec<Face>> {
    let (count, mut pos) = find_payload(body)?;
    let mut faces = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(chunk) = body.get(pos..pos + 4) else {
            note_shortfall("face", count, faces.len());
            break;
        };
        let n = read_i32_le(chunk, 0);
        let Ok(n) = usize::try_from(n) else {
            note_shortfall("face", count, faces.len());
            break;
        };
        pos += 4;

        let Some(index_bytes) = body.get(pos..pos + n * 4) else {
            note_shortfall("face", count, faces.len());
            break;
        };
        #[allow(clippy::cast_sign_loss)]
        // Sign loss: point indices are non-negative in conformant files
        let indices = index_bytes
            .chunks_exact(4)
            .map(|c| read_i32_le(c, 0) as u32)
            .collect();
        faces.push(Face::new(indices));
        pos += n * 4;
    }
    Ok(faces)
}

/// Locate the `<count> (` prelude and the first payload byte.
///
/// Scans at most [`BINARY_SCAN_WINDOW`] bytes for the literal `(`; the
/// last whitespace-separated ASCII token before it is the element count.
/// Whitespace immediately after `(` is skipped.
fn find_payload(body: &[u8]) -> FoamIoResult<(usize, usize)> {
    let window = &body[..body.len().min(BINARY_SCAN_WINDOW)];
    let paren = window
        .iter()
        .position(|&b| b == b'(')
        .ok_or_else(|| FoamIoError::malformed("no opening parenthesis in binary list"))?;

    let prelude = String::from_utf8_lossy(&window[..paren]);
    let count = prelude
        .split_whitespace()
        .last()
        .and_then(|token| token.parse::<usize>().ok())
        .ok_or_else(|| FoamIoError::malformed("no element count before binary list"))?;

    let mut payload = paren + 1;
    while payload < body.len() && body[payload].is_ascii_whitespace() {
        payload += 1;
    }
    Ok((count, payload))
}

fn note_shortfall(what: &str, declared: usize, decoded: usize) {
    debug!(what, declared, decoded, "binary list truncated; dropping partial record");
}

fn read_f64_le(bytes: &[u8], pos: usize) -> f64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[pos..pos + 8]);
    f64::from_le_bytes(buf)
}

fn read_i32_le(bytes: &[u8], pos: usize) -> i32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[pos..pos + 4]);
    i32::from_le_bytes(buf)
}
