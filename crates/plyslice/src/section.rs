//! Mesh/plane intersection and contour ordering.
//!
//! [`intersect`] walks every triangle edge and collects the points where the
//! surface crosses the cutting plane; [`order_contour`] turns that unordered
//! point set into a single traversable ring.

use std::collections::HashSet;

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::{SliceError, SliceResult};
use crate::mesh::Mesh;
use crate::plane::Plane;

/// Points closer than this along every axis are the same intersection point.
/// Matches the vertex weld tolerance used when chaining scan geometry.
const WELD_TOLERANCE: f64 = 1e-6;

/// Compute the set of points where the mesh surface intersects the plane.
///
/// Each triangle edge is tested against the plane with a signed-distance
/// crossing test; crossing points shared between adjacent faces are welded
/// into one. The returned points carry no ordering guarantee.
///
/// A plane that misses the mesh entirely is a valid outcome, not a hard
/// failure: it is reported as [`SliceError::EmptySlice`] so batch runs can
/// log the scan and continue.
pub fn intersect(mesh: &Mesh, plane: &Plane) -> SliceResult<Vec<Point3<f64>>> {
    let normal = plane.normal.normalize();

    let mut points: Vec<Point3<f64>> = Vec::new();
    let mut seen: HashSet<[i64; 3]> = HashSet::new();

    for face in &mesh.faces {
        let v0 = mesh.vertices[face[0] as usize].position;
        let v1 = mesh.vertices[face[1] as usize].position;
        let v2 = mesh.vertices[face[2] as usize].position;

        for (a, b) in [(v0, v1), (v1, v2), (v2, v0)] {
            if let Some(p) = plane_edge_intersection(plane.origin, normal, a, b) {
                if seen.insert(weld_key(&p)) {
                    points.push(p);
                }
            }
        }
    }

    if points.is_empty() {
        return Err(SliceError::EmptySlice { z: plane.origin.z });
    }

    debug!(
        "Plane intersection: {} boundary points from {} faces",
        points.len(),
        mesh.face_count()
    );

    Ok(points)
}

/// Reorder intersection points into an angularly continuous closed sequence.
///
/// Computes the 2D centroid of the projection onto the X/Y plane, then sorts
/// by the angle `atan2(x - centroid_x, y - centroid_y)` ascending. The
/// `atan2(dx, dy)` axis convention is deliberate and load-bearing: downstream
/// measurement tooling expects exactly this ordering, so do not "fix" it to
/// the usual `atan2(dy, dx)`. Coincident angles keep their input order
/// (stable sort).
///
/// The whole input is treated as one ring. If the true intersection consists
/// of several disjoint loops, they are interleaved into one sequence by angle
/// alone, which can produce a visually invalid polygon. Known limitation,
/// kept for output compatibility.
pub fn order_contour(points: &[Point3<f64>]) -> Vec<Point3<f64>> {
    if points.is_empty() {
        return Vec::new();
    }

    let n = points.len() as f64;
    let centroid_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let centroid_y = points.iter().map(|p| p.y).sum::<f64>() / n;

    let mut ordered = points.to_vec();
    ordered.sort_by(|p, q| {
        let theta_p = (p.x - centroid_x).atan2(p.y - centroid_y);
        let theta_q = (q.x - centroid_x).atan2(q.y - centroid_y);
        theta_p
            .partial_cmp(&theta_q)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ordered
}

fn plane_edge_intersection(
    plane_point: Point3<f64>,
    plane_normal: Vector3<f64>,
    a: Point3<f64>,
    b: Point3<f64>,
) -> Option<Point3<f64>> {
    let d_a = (a - plane_point).dot(&plane_normal);
    let d_b = (b - plane_point).dot(&plane_normal);

    if d_a * d_b > 0.0 {
        return None; // Same side of plane
    }

    if (d_a - d_b).abs() < 1e-10 {
        return None; // Edge parallel to plane
    }

    let t = d_a / (d_a - d_b);
    let direction = b - a;
    Some(Point3::from(a.coords + direction * t))
}

fn weld_key(p: &Point3<f64>) -> [i64; 3] {
    [
        (p.x / WELD_TOLERANCE).round() as i64,
        (p.y / WELD_TOLERANCE).round() as i64,
        (p.z / WELD_TOLERANCE).round() as i64,
    ]
}
