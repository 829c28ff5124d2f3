//! FoamFile header parsing and encoding detection.

use std::collections::HashMap;

use crate::error::{FoamIoError, FoamIoResult};

/// How far into an artifact the encoding sniffer looks for a
/// `format <word>;` pair before giving up.
///
/// Binary artifacts carry megabytes of payload after the header; bounding
/// the scan keeps detection cheap and guarantees it terminates.
pub const HEADER_SNIFF_WINDOW: usize = 4096;

/// The parsed `FoamFile { ... }` metadata block.
///
/// Every artifact (mesh files and field files alike) opens with this
/// block. The parser records where the block ends, so binary decoders can
/// slice the payload without re-scanning.
///
/// # Example
///
/// ```
/// use foam_io::FoamHeader;
///
/// let src = b"FoamFile\n{\n    version 2.0;\n    format ascii;\n    class vectorField;\n    object points;\n}\n3 ( )";
/// let header = FoamHeader::parse(src).unwrap();
///
/// assert_eq!(header.format(), Some("ascii"));
/// assert_eq!(header.class(), Some("vectorField"));
/// assert_eq!(&src[header.body_offset()..], b"\n3 ( )");
/// ```
#[derive(Debug, Clone)]
pub struct FoamHeader {
    entries: HashMap<String, String>,
    body_offset: usize,
}

impl FoamHeader {
    /// Parse the `FoamFile { ... }` block out of an artifact.
    ///
    /// Brace matching tracks nesting depth, so sub-dictionaries inside the
    /// header do not end the block early.
    ///
    /// # Errors
    ///
    /// [`FoamIoError::HeaderNotFound`] when the `FoamFile` marker, its
    /// opening brace, or the matching closing brace is absent.
    pub fn parse(bytes: &[u8]) -> FoamIoResult<Self> {
        let marker = find(bytes, b"FoamFile").ok_or(FoamIoError::HeaderNotFound)?;
        let open = bytes[marker..]
            .iter()
            .position(|&b| b == b'{')
            .map(|i| marker + i)
            .ok_or(FoamIoError::HeaderNotFound)?;

        let mut depth = 0usize;
        let mut close = None;
        for (i, &b) in bytes[open..].iter().enumerate() {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(open + i);
                        break;
                    }
                }
                _ => {}
            }
        }
        let close = close.ok_or(FoamIoError::HeaderNotFound)?;

        let inner = String::from_utf8_lossy(&bytes[open + 1..close]);
        let mut entries = HashMap::new();
        for stmt in inner.split(';') {
            let stmt = stmt.trim();
            if let Some((key, value)) = stmt.split_once(char::is_whitespace) {
                entries.insert(
                    key.to_string(),
                    value.trim().trim_matches('"').to_string(),
                );
            }
        }

        Ok(Self {
            entries,
            body_offset: close + 1,
        })
    }

    /// Look up a header entry by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// The `format` entry (`ascii` or `binary`).
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.get("format")
    }

    /// The `class` entry (e.g. `vectorField`, `volScalarField`).
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        self.get("class")
    }

    /// The `object` entry (the artifact name).
    #[must_use]
    pub fn object(&self) -> Option<&str> {
        self.get("object")
    }

    /// The `version` entry.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.get("version")
    }

    /// Byte offset of the first payload byte after the header block.
    #[inline]
    #[must_use]
    pub const fn body_offset(&self) -> usize {
        self.body_offset
    }
}

/// Decide whether an artifact is binary-encoded.
///
/// Scans at most [`HEADER_SNIFF_WINDOW`] bytes for a `format <word>;`
/// pair and returns true only when the word is exactly `binary`. An
/// absent or unreadable pair resolves to false (ASCII), never blocks.
#[must_use]
pub fn is_binary(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SNIFF_WINDOW)];
    let text = String::from_utf8_lossy(window);
    let mut tokens = text.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == "format" {
            return tokens
                .next()
                .is_some_and(|value| value.trim_end_matches(';').trim_matches('"') == "binary");
        }
    }
    false
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ASCII_HEADER: &[u8] = b"/*----*/\nFoamFile\n{\n    version 2.0;\n    format ascii;\n    class faceList;\n    object faces;\n}\npayload";

    #[test]
    fn parses_entries_and_body_offset() {
        let header = FoamHeader::parse(ASCII_HEADER).unwrap();
        assert_eq!(header.version(), Some("2.0"));
        assert_eq!(header.format(), Some("ascii"));
        assert_eq!(header.class(), Some("faceList"));
        assert_eq!(header.object(), Some("faces"));
        assert_eq!(&ASCII_HEADER[header.body_offset()..], b"\npayload");
    }

    #[test]
    fn tracks_brace_nesting() {
        let src = b"FoamFile { format ascii; sub { a b; } class faceList; } tail";
        let header = FoamHeader::parse(src).unwrap();
        assert_eq!(header.class(), Some("faceList"));
        assert_eq!(&src[header.body_offset()..], b" tail");
    }

    #[test]
    fn missing_marker_is_header_not_found() {
        let err = FoamHeader::parse(b"no header here").unwrap_err();
        assert!(matches!(err, FoamIoError::HeaderNotFound));
    }

    #[test]
    fn unclosed_brace_is_header_not_found() {
        let err = FoamHeader::parse(b"FoamFile { format ascii;").unwrap_err();
        assert!(matches!(err, FoamIoError::HeaderNotFound));
    }

    #[test]
    fn quoted_values_are_stripped() {
        let src = b"FoamFile { note \"some note\"; format ascii; }";
        let header = FoamHeader::parse(src).unwrap();
        assert_eq!(header.get("note"), Some("some note"));
    }

    #[test]
    fn sniffer_detects_binary() {
        assert!(is_binary(b"FoamFile { format binary; }"));
        assert!(!is_binary(b"FoamFile { format ascii; }"));
    }

    #[test]
    fn sniffer_defaults_to_ascii_when_absent() {
        assert!(!is_binary(b"no format entry anywhere"));
        assert!(!is_binary(b""));
    }

    #[test]
    fn sniffer_is_bounded() {
        // A `format binary;` pair beyond the window is not seen.
        let mut bytes = vec![b' '; HEADER_SNIFF_WINDOW];
        bytes.extend_from_slice(b"format binary;");
        assert!(!is_binary(&bytes));
    }
}
