//! Case decoding for FoamSight.
//!
//! This crate turns an on-disk OpenFOAM-style case into the in-memory
//! model of `foam-types`:
//!
//! - [`FoamHeader`] / [`is_binary`] - header parsing and encoding
//!   detection
//! - [`ascii`] - lexer-based decoders for the semi-structured text
//!   grammar
//! - [`binary`] - byte-exact decoders for fixed/variable-length binary
//!   records
//! - [`CaseSource`] / [`DirSource`] - file acquisition with transparent
//!   `.gz` handling
//! - [`read_poly_mesh`] - all-or-nothing mesh assembly
//! - [`load_field`] - per-timestep field loading with interpolation
//! - [`FoamCase`] - a session over one case directory
//!
//! # Leniency
//!
//! Real-world exports are frequently non-conformant. The decoders
//! tolerate them deliberately: unparsable tokens inside a well-formed
//! list become zero, declared-vs-actual face point counts are reconciled
//! in favor of the parsed indices, and truncated binary payloads drop
//! their partial trailing record. Only structural failures (no header, no
//! `<count> (` pattern, missing core mesh artifacts) abort a load.
//!
//! # Example
//!
//! ```no_run
//! use foam_io::FoamCase;
//!
//! let mut case = FoamCase::open("/data/cavity").unwrap();
//! println!("{} cells", case.mesh().cell_count());
//! let field = case.load_field("0.5", "p");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod ascii;
pub mod binary;
mod case;
mod error;
mod field;
mod header;
mod lexer;
mod polymesh;
mod source;

pub use ascii::InternalField;
pub use case::FoamCase;
pub use error::{FoamIoError, FoamIoResult};
pub use field::load_field;
pub use header::{is_binary, FoamHeader, HEADER_SNIFF_WINDOW};
pub use polymesh::{read_poly_mesh, POLY_MESH_DIR};
pub use source::{CaseSource, DirSource, GZIP_MAGIC};
