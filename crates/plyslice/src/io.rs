//! Scan mesh loading.
//!
//! Head scans arrive as PLY (Stanford Triangle Format) files, the common
//! export format of structured-light scanners. The loader accepts ASCII and
//! both binary byte orders, expects `vertex` elements with `x`, `y`, `z`
//! properties, and fan-triangulates `face` elements with more than three
//! `vertex_indices`.
//!
//! This module, together with [`crate::section::intersect`], forms the
//! geometry-kernel surface of the crate: the pipeline only ever calls
//! `load_mesh` and `intersect`, so swapping the underlying parser or the
//! intersection routine never touches the pipeline logic.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{SliceError, SliceResult};
use crate::mesh::{Mesh, Vertex};

/// Load a scan mesh from a PLY file.
///
/// Errors with [`SliceError::MeshRead`] when the file cannot be opened,
/// [`SliceError::MeshParse`] when it is not valid PLY, and
/// [`SliceError::EmptyMesh`] when it parses but holds no geometry.
pub fn load_mesh(path: &Path) -> SliceResult<Mesh> {
    use ply_rs::parser::Parser;
    use ply_rs::ply::Property;

    info!("Loading scan mesh from {:?}", path);

    let file = File::open(path).map_err(|e| SliceError::mesh_read(path, e))?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<ply_rs::ply::DefaultElement>::new();
    let ply = parser
        .read_ply(&mut reader)
        .map_err(|e| SliceError::mesh_parse(path, format!("PLY parse error: {:?}", e)))?;

    let mut mesh = Mesh::new();

    if let Some(vertices) = ply.payload.get("vertex") {
        mesh.vertices.reserve(vertices.len());

        for vertex_element in vertices {
            let x = get_ply_float(vertex_element.get("x"), "x", path)?;
            let y = get_ply_float(vertex_element.get("y"), "y", path)?;
            let z = get_ply_float(vertex_element.get("z"), "z", path)?;

            let mut vertex = Vertex::from_coords(x, y, z);

            // Carry scanner normals through when present
            if let (Some(nx), Some(ny), Some(nz)) = (
                vertex_element.get("nx"),
                vertex_element.get("ny"),
                vertex_element.get("nz"),
            ) {
                if let (Ok(nx), Ok(ny), Ok(nz)) = (
                    get_ply_float(Some(nx), "nx", path),
                    get_ply_float(Some(ny), "ny", path),
                    get_ply_float(Some(nz), "nz", path),
                ) {
                    vertex.normal = Some(nalgebra::Vector3::new(nx, ny, nz));
                }
            }

            mesh.vertices.push(vertex);
        }
    }

    if let Some(faces) = ply.payload.get("face") {
        for face_element in faces {
            let indices = face_element
                .get("vertex_indices")
                .or_else(|| face_element.get("vertex_index"));

            match indices {
                Some(Property::ListInt(indices)) => {
                    push_triangulated(&mut mesh, indices.iter().map(|&i| i as u32));
                }
                Some(Property::ListUInt(indices)) => {
                    push_triangulated(&mut mesh, indices.iter().copied());
                }
                Some(Property::ListUChar(indices)) => {
                    push_triangulated(&mut mesh, indices.iter().map(|&i| i as u32));
                }
                _ => {
                    return Err(SliceError::mesh_parse(
                        path,
                        "face element without a vertex_indices list",
                    ));
                }
            }
        }
    }

    if mesh.is_empty() {
        return Err(SliceError::empty_mesh(format!(
            "{} vertices, {} faces",
            mesh.vertex_count(),
            mesh.face_count()
        )));
    }

    debug!(
        "PLY loaded: {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    );
    if let Some((min, max)) = mesh.bounds() {
        debug!(
            "Bounding box: [{:.1}, {:.1}, {:.1}] to [{:.1}, {:.1}, {:.1}]",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }

    Ok(mesh)
}

/// Fan-triangulate a polygon's vertex indices into the mesh's face list.
fn push_triangulated(mesh: &mut Mesh, indices: impl Iterator<Item = u32>) {
    let indices: Vec<u32> = indices.collect();
    if indices.len() >= 3 {
        for i in 1..indices.len() - 1 {
            mesh.faces.push([indices[0], indices[i], indices[i + 1]]);
        }
    }
}

/// Helper to extract a float value from a PLY property.
fn get_ply_float(
    prop: Option<&ply_rs::ply::Property>,
    name: &str,
    path: &Path,
) -> SliceResult<f64> {
    use ply_rs::ply::Property;

    match prop {
        Some(Property::Float(v)) => Ok(*v as f64),
        Some(Property::Double(v)) => Ok(*v),
        Some(Property::Int(v)) => Ok(*v as f64),
        Some(Property::UInt(v)) => Ok(*v as f64),
        Some(Property::Short(v)) => Ok(*v as f64),
        Some(Property::UShort(v)) => Ok(*v as f64),
        Some(Property::Char(v)) => Ok(*v as f64),
        Some(Property::UChar(v)) => Ok(*v as f64),
        _ => Err(SliceError::mesh_parse(
            path,
            format!("missing or invalid PLY property: {}", name),
        )),
    }
}
