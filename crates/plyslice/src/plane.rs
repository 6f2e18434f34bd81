//! Cutting-plane derivation from anatomical landmarks.
//!
//! The slicing plane is parallel to the triangle formed by three landmarks:
//!
//! * Tragion Left   (`f_t_l`)
//! * Tragion Right  (`r_t_r`)
//! * Orbitale Right (`k_or_r`)
//!
//! and passes through the glabella (`h_g`) with its Z coordinate shifted by
//! a configurable offset, 15 mm by default.

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::{SliceError, SliceResult};
use crate::landmarks::LandmarkSet;

/// Landmark name: left tragion.
pub const TRAGION_LEFT: &str = "f_t_l";

/// Landmark name: right tragion.
pub const TRAGION_RIGHT: &str = "r_t_r";

/// Landmark name: right orbitale.
pub const ORBITALE_RIGHT: &str = "k_or_r";

/// Landmark name: glabella.
pub const GLABELLA: &str = "h_g";

/// Default Z offset of the plane origin above the glabella, in mm.
pub const DEFAULT_Z_OFFSET_MM: f64 = 15.0;

/// Cross products with magnitude below this are treated as collinear input.
const COLLINEAR_TOLERANCE: f64 = 1e-10;

/// The cutting plane: a unit normal and a point on the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal. Finite and non-zero by construction.
    pub normal: Vector3<f64>,

    /// A point on the plane.
    pub origin: Point3<f64>,
}

/// Compute the unit normal of the plane spanned by the tragion/orbitale triangle.
///
/// The normal is the normalized cross product of two edge vectors of the
/// triangle (`r_t_r`, `f_t_l`, `k_or_r`). Fails with
/// [`SliceError::MissingLandmark`] when any of the three is absent, and with
/// [`SliceError::DegenerateTriangle`] when the points are collinear: a
/// degenerate triangle has no well-defined normal, and silently returning a
/// zero or NaN vector would poison every downstream signed-distance test.
pub fn plane_normal(landmarks: &LandmarkSet) -> SliceResult<Vector3<f64>> {
    let tragion_r = landmarks.get(TRAGION_RIGHT)?;
    let tragion_l = landmarks.get(TRAGION_LEFT)?;
    let orbitale_r = landmarks.get(ORBITALE_RIGHT)?;

    let cross = (tragion_l - tragion_r).cross(&(orbitale_r - tragion_r));
    let magnitude = cross.norm();

    if !magnitude.is_finite() || magnitude < COLLINEAR_TOLERANCE {
        return Err(SliceError::degenerate_triangle(format!(
            "landmarks {TRAGION_RIGHT}, {TRAGION_LEFT}, {ORBITALE_RIGHT} are collinear \
             (cross product magnitude {magnitude:.3e})"
        )));
    }

    Ok(cross / magnitude)
}

/// Derive the cutting plane for a landmark set.
///
/// The plane origin takes the glabella XY coordinates with the Z coordinate
/// shifted by `z_offset_mm`. Returns the shifted Z alongside the plane, since
/// callers need it to name the output file.
pub fn slicing_plane(
    landmarks: &LandmarkSet,
    z_offset_mm: f64,
) -> SliceResult<(Plane, f64)> {
    let normal = plane_normal(landmarks)?;

    let glabella = landmarks.get(GLABELLA)?;
    let origin = Point3::new(glabella.x, glabella.y, glabella.z + z_offset_mm);

    debug!(
        "Slicing plane: normal ({:.4}, {:.4}, {:.4}), origin ({:.3}, {:.3}, {:.3})",
        normal.x, normal.y, normal.z, origin.x, origin.y, origin.z
    );

    Ok((Plane { normal, origin }, origin.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn landmarks_with(entries: &[(&str, [f64; 3])]) -> LandmarkSet {
        let mut set = LandmarkSet::new();
        for (name, [x, y, z]) in entries {
            set.insert(*name, Point3::new(*x, *y, *z));
        }
        set
    }

    #[test]
    fn test_normal_matches_analytic_cross_product() {
        // Triangle on the unit axes: normal is (1, 1, 1) / sqrt(3)
        let set = landmarks_with(&[
            (TRAGION_RIGHT, [1.0, 0.0, 0.0]),
            (TRAGION_LEFT, [0.0, 1.0, 0.0]),
            (ORBITALE_RIGHT, [0.0, 0.0, 1.0]),
        ]);

        let normal = plane_normal(&set).expect("non-degenerate triangle");
        let expected = 1.0 / 3.0_f64.sqrt();
        assert!((normal.x - expected).abs() < 1e-12);
        assert!((normal.y - expected).abs() < 1e-12);
        assert!((normal.z - expected).abs() < 1e-12);
        assert!((normal.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_axis_aligned_triangle_gives_z_normal() {
        let set = landmarks_with(&[
            (TRAGION_RIGHT, [0.0, 0.0, 0.0]),
            (TRAGION_LEFT, [1.0, 0.0, 0.0]),
            (ORBITALE_RIGHT, [0.0, 1.0, 0.0]),
        ]);

        let normal = plane_normal(&set).unwrap();
        assert_eq!(normal, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_collinear_landmarks_are_degenerate() {
        let set = landmarks_with(&[
            (TRAGION_RIGHT, [0.0, 0.0, 0.0]),
            (TRAGION_LEFT, [1.0, 1.0, 1.0]),
            (ORBITALE_RIGHT, [2.0, 2.0, 2.0]),
        ]);

        let err = plane_normal(&set).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DegenerateTriangle);
    }

    #[test]
    fn test_each_required_landmark_is_checked() {
        let full = [
            (TRAGION_RIGHT, [0.0, 0.0, 0.0]),
            (TRAGION_LEFT, [1.0, 0.0, 0.0]),
            (ORBITALE_RIGHT, [0.0, 1.0, 0.0]),
            (GLABELLA, [0.5, 0.5, 10.0]),
        ];

        for omit in 0..full.len() {
            let subset: Vec<_> = full
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != omit)
                .map(|(_, e)| *e)
                .collect();
            let set = landmarks_with(&subset);

            let err = slicing_plane(&set, DEFAULT_Z_OFFSET_MM).unwrap_err();
            assert_eq!(
                err.code(),
                ErrorCode::MissingLandmark,
                "omitting {} must fail the lookup",
                full[omit].0
            );
            assert!(format!("{}", err).contains(full[omit].0));
        }
    }

    #[test]
    fn test_origin_is_offset_glabella() {
        let set = landmarks_with(&[
            (TRAGION_RIGHT, [0.0, 0.0, 0.0]),
            (TRAGION_LEFT, [1.0, 0.0, 0.0]),
            (ORBITALE_RIGHT, [0.0, 1.0, 0.0]),
            (GLABELLA, [3.0, 7.0, 20.0]),
        ]);

        let (plane, slice_z) = slicing_plane(&set, DEFAULT_Z_OFFSET_MM).unwrap();
        assert_eq!(plane.origin, Point3::new(3.0, 7.0, 35.0));
        assert_eq!(slice_z, 35.0);

        // Custom offsets shift accordingly
        let (plane, slice_z) = slicing_plane(&set, -5.0).unwrap();
        assert_eq!(plane.origin.z, 15.0);
        assert_eq!(slice_z, 15.0);
    }
}
