//! Single-scan and batch slicing pipelines.
//!
//! The per-scan pipeline runs load mesh → load landmarks → derive plane →
//! intersect → order → write CSV. Batch processing discovers scan/landmark
//! file pairs under a directory and runs the pipeline per pair, isolating
//! failures: a bad scan is logged and counted, never aborts the batch.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{SliceError, SliceResult};
use crate::io::load_mesh;
use crate::landmarks::LandmarkSet;
use crate::plane::{slicing_plane, DEFAULT_Z_OFFSET_MM};
use crate::section::{intersect, order_contour};
use crate::tracing_ext::OperationTimer;
use crate::writer::write_slice_csv;

/// Default scan file extension. Lowercase by design; see [`BatchParams`].
pub const DEFAULT_SCAN_EXTENSION: &str = "ply";

/// Default landmark file extension.
pub const DEFAULT_LANDMARK_EXTENSION: &str = "txt";

/// One scan's worth of batch work.
///
/// Holds the resolved paths for a single pipeline invocation. Units are
/// mutually independent; nothing is shared across them, so a batch could be
/// processed in parallel without coordination (not currently done).
#[derive(Debug, Clone)]
pub struct ScanUnit {
    /// Scan identifier, used to name the output file.
    pub scan_id: String,

    /// Path to the scan mesh.
    pub mesh_path: PathBuf,

    /// Path to the landmark table.
    pub landmarks_path: PathBuf,

    /// Directory the slice CSV is written to.
    pub out_dir: PathBuf,
}

impl ScanUnit {
    /// Resolve a unit from a scan path.
    ///
    /// The scan identifier is the file stem. The landmark path defaults to
    /// the scan path with its extension replaced (association is case
    /// sensitive), and the output directory defaults to the scan's parent
    /// directory.
    pub fn from_scan_path(
        scan_path: &Path,
        landmarks_path: Option<&Path>,
        out_dir: Option<&Path>,
        landmark_extension: &str,
    ) -> Self {
        let scan_id = scan_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let landmarks_path = landmarks_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| scan_path.with_extension(landmark_extension));

        let out_dir = out_dir
            .map(Path::to_path_buf)
            .or_else(|| scan_path.parent().map(Path::to_path_buf))
            .unwrap_or_default();

        Self {
            scan_id,
            mesh_path: scan_path.to_path_buf(),
            landmarks_path,
            out_dir,
        }
    }

    /// Run the full slicing pipeline for this unit.
    ///
    /// Returns the path of the written CSV. Any error aborts this unit only;
    /// all file handles and buffers are released before the result returns.
    pub fn run(&self) -> SliceResult<PathBuf> {
        let _timer = OperationTimer::new("slice_pipeline");

        if !self.landmarks_path.exists() {
            return Err(SliceError::MissingLandmarksFile {
                path: self.landmarks_path.clone(),
            });
        }

        let mesh = load_mesh(&self.mesh_path)?;
        let landmarks = LandmarkSet::load(&self.landmarks_path)?;

        let (plane, slice_z) = slicing_plane(&landmarks, DEFAULT_Z_OFFSET_MM)?;
        let points = intersect(&mesh, &plane)?;
        let contour = order_contour(&points);

        let out_path = write_slice_csv(&contour, &self.scan_id, slice_z, &self.out_dir)?;

        info!(
            "Slicing complete ... sliced '{}' at Z' = {:.3}",
            self.scan_id, slice_z
        );

        Ok(out_path)
    }
}

/// Slice a single scan file.
///
/// The landmark path defaults to the scan path with its extension replaced
/// by `txt`; the output directory defaults to the scan's parent directory.
/// Returns the path of the written CSV.
pub fn slice_pipeline(
    scan_path: &Path,
    landmarks_path: Option<&Path>,
    out_dir: Option<&Path>,
) -> SliceResult<PathBuf> {
    ScanUnit::from_scan_path(scan_path, landmarks_path, out_dir, DEFAULT_LANDMARK_EXTENSION)
        .run()
}

/// Configuration for batch scan discovery.
#[derive(Debug, Clone)]
pub struct BatchParams {
    /// Recurse into subdirectories.
    pub recurse: bool,

    /// Scan file extension to match. The match is exact and case
    /// SENSITIVE: the default picks up `.ply` and ignores `.PLY`, a
    /// documented simplification that keeps path handling identical across
    /// operating systems.
    pub scan_extension: String,

    /// Extension substituted to locate each scan's landmark file.
    pub landmark_extension: String,
}

impl Default for BatchParams {
    fn default() -> Self {
        Self {
            recurse: false,
            scan_extension: DEFAULT_SCAN_EXTENSION.to_string(),
            landmark_extension: DEFAULT_LANDMARK_EXTENSION.to_string(),
        }
    }
}

/// Outcome of a batch run.
#[derive(Debug)]
pub struct BatchReport {
    /// Number of scans sliced successfully.
    pub sliced: usize,

    /// Number of scan files discovered.
    pub total: usize,

    /// Per-scan failures, with the offending scan path.
    pub failures: Vec<(PathBuf, SliceError)>,
}

impl BatchReport {
    /// Whether every discovered scan was sliced.
    pub fn all_succeeded(&self) -> bool {
        self.sliced == self.total
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sliced {} of {} scan files", self.sliced, self.total)
    }
}

/// Slice every scan file under a directory.
///
/// Scans are discovered by extension (see [`BatchParams`]), recursively when
/// requested, and processed in sorted path order for reproducible runs. Each
/// scan's landmark file is looked up beside it by extension substitution; a
/// scan without one is logged and skipped. Every per-scan failure is caught
/// here, logged with the offending path, and recorded in the report — a
/// failed scan never aborts the batch.
///
/// Only discovery itself can fail (unreadable directory); the per-scan
/// pipeline errors all land in [`BatchReport::failures`].
pub fn batch_slice_pipeline(
    scan_dir: &Path,
    out_dir: Option<&Path>,
    params: &BatchParams,
) -> SliceResult<BatchReport> {
    let mut scan_paths = Vec::new();
    discover_scans(scan_dir, params, &mut scan_paths)?;
    scan_paths.sort();

    info!(
        "Discovered {} scan files under {:?}",
        scan_paths.len(),
        scan_dir
    );

    let mut report = BatchReport {
        sliced: 0,
        total: scan_paths.len(),
        failures: Vec::new(),
    };

    for scan_path in scan_paths {
        let unit =
            ScanUnit::from_scan_path(&scan_path, None, out_dir, &params.landmark_extension);

        match unit.run() {
            Ok(out_path) => {
                report.sliced += 1;
                debug!("Sliced {:?} -> {:?}", scan_path, out_path);
            }
            Err(err) => {
                warn!("Skipping {:?}: {}", scan_path, err);
                report.failures.push((scan_path, err));
            }
        }
    }

    info!("Processing complete ... {}", report);

    Ok(report)
}

fn discover_scans(
    dir: &Path,
    params: &BatchParams,
    found: &mut Vec<PathBuf>,
) -> SliceResult<()> {
    let entries = fs::read_dir(dir).map_err(|e| SliceError::scan_discovery(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| SliceError::scan_discovery(dir, e))?;
        let path = entry.path();

        if path.is_dir() {
            if params.recurse {
                discover_scans(&path, params, found)?;
            }
        } else if path.extension().and_then(|ext| ext.to_str())
            == Some(params.scan_extension.as_str())
        {
            found.push(path);
        }
    }

    Ok(())
}
