//! Slice contour serialization.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use nalgebra::Point3;
use tracing::debug;

use crate::error::{SliceError, SliceResult};

/// Write an ordered slice contour to a CSV file.
///
/// The output file is named `<scan_id>_zslice_<Z>.CSV` with Z rounded to the
/// nearest integer, and contains a single `x,y,z` header line followed by
/// one row per point with each coordinate formatted to exactly 3 decimal
/// places. Any existing file of the same name is silently overwritten; the
/// slice for a given scan and plane height is a pure function of its inputs,
/// so the newest run wins.
///
/// Returns the path of the written file.
pub fn write_slice_csv(
    points: &[Point3<f64>],
    scan_id: &str,
    slice_z: f64,
    out_dir: &Path,
) -> SliceResult<PathBuf> {
    let out_filename = format!("{}_zslice_{:.0}.CSV", scan_id, slice_z);
    let out_filepath = out_dir.join(out_filename);

    let file =
        File::create(&out_filepath).map_err(|e| SliceError::output_write(&out_filepath, e))?;
    let mut writer = BufWriter::new(file);

    write_rows(&mut writer, points).map_err(|e| SliceError::output_write(&out_filepath, e))?;

    debug!(
        "Wrote {} contour points to {:?}",
        points.len(),
        out_filepath
    );

    Ok(out_filepath)
}

fn write_rows(writer: &mut impl Write, points: &[Point3<f64>]) -> std::io::Result<()> {
    writeln!(writer, "x,y,z")?;
    for p in points {
        writeln!(writer, "{:.3},{:.3},{:.3}", p.x, p.y, p.z)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_csv_contents() {
        let dir = tempdir().unwrap();
        let points = vec![
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-4.5678, 0.0004, 12.3456),
        ];

        let path = write_slice_csv(&points, "subject01", 35.0, dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "subject01_zslice_35.CSV"
        );

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "x,y,z\n1.000,2.000,3.000\n-4.568,0.000,12.346\n");
    }

    #[test]
    fn test_filename_rounds_z() {
        let dir = tempdir().unwrap();
        let points = vec![Point3::new(0.0, 0.0, 0.0)];

        let path = write_slice_csv(&points, "s", 14.3, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), "s_zslice_14.CSV");

        let path = write_slice_csv(&points, "s", 14.7, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), "s_zslice_15.CSV");
    }

    #[test]
    fn test_existing_file_is_overwritten() {
        let dir = tempdir().unwrap();

        let long = vec![Point3::new(0.0, 0.0, 0.0); 10];
        let first = write_slice_csv(&long, "s", 5.0, dir.path()).unwrap();

        let short = vec![Point3::new(1.0, 1.0, 1.0)];
        let second = write_slice_csv(&short, "s", 5.0, dir.path()).unwrap();

        assert_eq!(first, second);
        let contents = fs::read_to_string(&second).unwrap();
        assert_eq!(contents.lines().count(), 2); // header + 1 row, not appended
    }

    #[test]
    fn test_unwritable_directory() {
        let points = vec![Point3::new(0.0, 0.0, 0.0)];
        let err =
            write_slice_csv(&points, "s", 5.0, Path::new("/nonexistent/dir")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutputWrite);
    }
}
