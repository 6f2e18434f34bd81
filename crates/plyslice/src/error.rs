//! Error types for the slicing pipeline.
//!
//! Every error carries a machine-readable code in the format `SLICE-XXXX`:
//! - `SLICE-1xxx`: I/O errors (reading scans and landmark tables, writing output)
//! - `SLICE-2xxx`: Validation errors (missing landmarks, degenerate geometry)
//! - `SLICE-3xxx`: Slicing errors (empty intersections, unpaired scans)
//!
//! Codes let batch tooling tell an empty intersection (`SLICE-3001`, a valid
//! outcome for an out-of-range offset) apart from a hard failure without
//! string-matching messages.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for slicing operations.
pub type SliceResult<T> = Result<T, SliceError>;

/// Machine-readable error codes for slicing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // I/O errors (1xxx)
    /// SLICE-1001: Failed to read landmark file
    LandmarkRead = 1001,
    /// SLICE-1002: Failed to parse landmark file
    LandmarkParse = 1002,
    /// SLICE-1003: Failed to read scan mesh
    MeshRead = 1003,
    /// SLICE-1004: Failed to parse scan mesh
    MeshParse = 1004,
    /// SLICE-1005: Failed to write slice output
    OutputWrite = 1005,
    /// SLICE-1006: Failed to enumerate scan directory
    ScanDiscovery = 1006,

    // Validation errors (2xxx)
    /// SLICE-2001: Required landmark absent from the landmark set
    MissingLandmark = 2001,
    /// SLICE-2002: Plane-defining landmarks are collinear
    DegenerateTriangle = 2002,
    /// SLICE-2003: Scan mesh has no vertices or faces
    EmptyMesh = 2003,

    // Slicing errors (3xxx)
    /// SLICE-3001: Cutting plane does not intersect the mesh
    EmptySlice = 3001,
    /// SLICE-3002: No landmark file found for a scan
    MissingLandmarksFile = 3002,
}

impl ErrorCode {
    /// Returns the error code as a string in the format `SLICE-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::LandmarkRead => "SLICE-1001",
            ErrorCode::LandmarkParse => "SLICE-1002",
            ErrorCode::MeshRead => "SLICE-1003",
            ErrorCode::MeshParse => "SLICE-1004",
            ErrorCode::OutputWrite => "SLICE-1005",
            ErrorCode::ScanDiscovery => "SLICE-1006",
            ErrorCode::MissingLandmark => "SLICE-2001",
            ErrorCode::DegenerateTriangle => "SLICE-2002",
            ErrorCode::EmptyMesh => "SLICE-2003",
            ErrorCode::EmptySlice => "SLICE-3001",
            ErrorCode::MissingLandmarksFile => "SLICE-3002",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while slicing a scan.
#[derive(Debug, Error, Diagnostic)]
pub enum SliceError {
    /// Error reading a landmark file.
    #[error("failed to read landmark file {path}")]
    #[diagnostic(
        code(slice::landmarks::read),
        help("Check that the file exists and is readable. Try: ls -la {}", path.display())
    )]
    LandmarkRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed landmark table row.
    #[error("failed to parse landmark file {path} at line {line}: {details}")]
    #[diagnostic(
        code(slice::landmarks::parse),
        help("Landmark files are one header line followed by `name x y z` rows, space delimited")
    )]
    LandmarkParse {
        path: PathBuf,
        line: usize,
        details: String,
    },

    /// Error reading a scan mesh file.
    #[error("failed to read scan mesh from {path}")]
    #[diagnostic(
        code(slice::mesh::read),
        help("Check that the file exists and is readable")
    )]
    MeshRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing a scan mesh file.
    #[error("failed to parse scan mesh from {path}: {details}")]
    #[diagnostic(
        code(slice::mesh::parse),
        help("The scan may be corrupted or not a PLY file. Try re-exporting from the scanner software.")
    )]
    MeshParse { path: PathBuf, details: String },

    /// Error writing the slice output file.
    #[error("failed to write slice output to {path}")]
    #[diagnostic(
        code(slice::output::write),
        help("Check that the output directory exists and is writable")
    )]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error enumerating a scan directory during batch discovery.
    #[error("failed to enumerate scan directory {path}")]
    #[diagnostic(
        code(slice::batch::discovery),
        help("Check that the directory exists and is readable")
    )]
    ScanDiscovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required landmark is absent from the landmark set.
    #[error("required landmark {name:?} is not present in the landmark set")]
    #[diagnostic(
        code(slice::landmarks::missing),
        help("The slicing plane needs the f_t_l, r_t_r, k_or_r, and h_g landmarks")
    )]
    MissingLandmark { name: String },

    /// The plane-defining landmarks are collinear.
    #[error("cannot derive slicing plane: {details}")]
    #[diagnostic(
        code(slice::plane::degenerate),
        help("The tragion and orbitale landmarks must not be collinear. Check the landmark coordinates.")
    )]
    DegenerateTriangle { details: String },

    /// Scan mesh has no geometry.
    #[error("scan mesh is empty: {details}")]
    #[diagnostic(
        code(slice::mesh::empty),
        help("The mesh must have at least one vertex and one face. Check that the scan exported correctly.")
    )]
    EmptyMesh { details: String },

    /// The cutting plane does not intersect the mesh.
    #[error("slicing plane at Z' = {z:.3} does not intersect the mesh")]
    #[diagnostic(
        code(slice::section::empty),
        help("The plane offset may place the cut outside the scanned region. Check the glabella landmark and the z offset.")
    )]
    EmptySlice { z: f64 },

    /// No landmark file found alongside a scan.
    #[error("no landmark file found for scan: expected {path}")]
    #[diagnostic(
        code(slice::batch::unpaired),
        help("Landmark files must share the scan's file stem, e.g. subject01.ply + subject01.txt")
    )]
    MissingLandmarksFile { path: PathBuf },
}

impl SliceError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            SliceError::LandmarkRead { .. } => ErrorCode::LandmarkRead,
            SliceError::LandmarkParse { .. } => ErrorCode::LandmarkParse,
            SliceError::MeshRead { .. } => ErrorCode::MeshRead,
            SliceError::MeshParse { .. } => ErrorCode::MeshParse,
            SliceError::OutputWrite { .. } => ErrorCode::OutputWrite,
            SliceError::ScanDiscovery { .. } => ErrorCode::ScanDiscovery,
            SliceError::MissingLandmark { .. } => ErrorCode::MissingLandmark,
            SliceError::DegenerateTriangle { .. } => ErrorCode::DegenerateTriangle,
            SliceError::EmptyMesh { .. } => ErrorCode::EmptyMesh,
            SliceError::EmptySlice { .. } => ErrorCode::EmptySlice,
            SliceError::MissingLandmarksFile { .. } => ErrorCode::MissingLandmarksFile,
        }
    }

    // Constructor helpers for common error patterns

    /// Create a LandmarkRead error.
    pub fn landmark_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SliceError::LandmarkRead {
            path: path.into(),
            source,
        }
    }

    /// Create a LandmarkParse error.
    pub fn landmark_parse(path: impl Into<PathBuf>, line: usize, details: impl Into<String>) -> Self {
        SliceError::LandmarkParse {
            path: path.into(),
            line,
            details: details.into(),
        }
    }

    /// Create a MeshRead error.
    pub fn mesh_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SliceError::MeshRead {
            path: path.into(),
            source,
        }
    }

    /// Create a MeshParse error.
    pub fn mesh_parse(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        SliceError::MeshParse {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Create an OutputWrite error.
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SliceError::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a ScanDiscovery error.
    pub fn scan_discovery(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SliceError::ScanDiscovery {
            path: path.into(),
            source,
        }
    }

    /// Create a MissingLandmark error.
    pub fn missing_landmark(name: impl Into<String>) -> Self {
        SliceError::MissingLandmark { name: name.into() }
    }

    /// Create a DegenerateTriangle error.
    pub fn degenerate_triangle(details: impl Into<String>) -> Self {
        SliceError::DegenerateTriangle {
            details: details.into(),
        }
    }

    /// Create an EmptyMesh error.
    pub fn empty_mesh(details: impl Into<String>) -> Self {
        SliceError::EmptyMesh {
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = SliceError::missing_landmark("h_g");
        assert_eq!(err.code(), ErrorCode::MissingLandmark);
        assert_eq!(err.code().as_str(), "SLICE-2001");

        let err = SliceError::EmptySlice { z: 42.0 };
        assert_eq!(err.code().as_str(), "SLICE-3001");
    }

    #[test]
    fn test_error_display() {
        let err = SliceError::missing_landmark("k_or_r");
        let display = format!("{}", err);
        assert!(display.contains("k_or_r"));

        let err = SliceError::landmark_parse("marks.txt", 3, "expected 4 fields, found 2");
        let display = format!("{}", err);
        assert!(display.contains("line 3"));
        assert!(display.contains("expected 4 fields"));
    }

    #[test]
    fn test_empty_slice_reports_plane_height() {
        let err = SliceError::EmptySlice { z: 103.25 };
        assert!(format!("{}", err).contains("103.250"));
    }
}
