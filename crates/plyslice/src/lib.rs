//! Anatomical cross-section extraction from PLY head scans.
//!
//! This crate slices a 3D head-scan surface mesh along a cutting plane
//! derived from named anatomical landmarks and writes the ordered boundary
//! contour to a CSV file for downstream craniofacial measurement. It
//! processes one scan at a time or a whole directory in batch, skipping
//! scans that fail rather than aborting the run.
//!
//! # Pipeline
//!
//! 1. Parse the scan's landmark table ([`LandmarkSet::load`])
//! 2. Derive the cutting plane from the tragion/orbitale triangle and the
//!    glabella ([`slicing_plane`])
//! 3. Intersect the mesh with the plane ([`intersect`])
//! 4. Order the boundary points into a traversable contour
//!    ([`order_contour`])
//! 5. Write `<scan>_zslice_<Z>.CSV` ([`write_slice_csv`])
//!
//! # Units and Scale
//!
//! Coordinates are assumed to be in millimeters, matching scanner exports.
//! The default plane offset above the glabella is 15 mm
//! ([`DEFAULT_Z_OFFSET_MM`]).
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! // Slice one scan; landmarks are found beside it as subject01.txt
//! let out = plyslice::slice_pipeline(Path::new("scans/subject01.ply"), None, None).unwrap();
//! println!("Wrote {:?}", out);
//!
//! // Batch process a directory
//! let params = plyslice::BatchParams::default();
//! let report = plyslice::batch_slice_pipeline(Path::new("scans"), None, &params).unwrap();
//! println!("{}", report);
//! ```
//!
//! # Logging
//!
//! Operations emit `tracing` events. Set `RUST_LOG=plyslice=debug` for
//! detailed progress, or `RUST_LOG=plyslice::timing=debug` for per-scan
//! timing.

pub mod error;
pub mod io;
pub mod landmarks;
pub mod mesh;
pub mod pipeline;
pub mod plane;
pub mod section;
pub mod tracing_ext;
pub mod writer;

pub use error::{ErrorCode, SliceError, SliceResult};
pub use io::load_mesh;
pub use landmarks::LandmarkSet;
pub use mesh::{Mesh, Vertex};
pub use pipeline::{
    batch_slice_pipeline, slice_pipeline, BatchParams, BatchReport, ScanUnit,
    DEFAULT_LANDMARK_EXTENSION, DEFAULT_SCAN_EXTENSION,
};
pub use plane::{
    plane_normal, slicing_plane, Plane, DEFAULT_Z_OFFSET_MM, GLABELLA, ORBITALE_RIGHT,
    TRAGION_LEFT, TRAGION_RIGHT,
};
pub use section::{intersect, order_contour};
pub use writer::write_slice_csv;
