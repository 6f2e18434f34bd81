//! Anatomical landmark table parsing and lookup.
//!
//! Landmark files are plain text: one header line, then one `name x y z`
//! row per landmark, whitespace delimited. The loader does not check for
//! any particular landmark names; which names are required is the business
//! of whoever consumes the set (see [`crate::plane`]), so the same files
//! can back other measurement pipelines with different landmark subsets.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use nalgebra::Point3;
use tracing::debug;

use crate::error::{SliceError, SliceResult};

/// A named set of anatomical reference points.
///
/// Landmark names map to 3D coordinates. Names are unique; inserting a
/// duplicate name replaces the previous point. Lookups for absent names
/// fail explicitly rather than returning a default.
#[derive(Debug, Clone, Default)]
pub struct LandmarkSet {
    points: HashMap<String, Point3<f64>>,
}

impl LandmarkSet {
    /// Create an empty landmark set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a landmark table file.
    ///
    /// The first line is treated as a header and skipped. Every following
    /// non-empty line must be `name x y z`. Rows with the wrong field count
    /// or non-numeric coordinates produce [`SliceError::LandmarkParse`] with
    /// the offending 1-based line number.
    pub fn load(path: &Path) -> SliceResult<Self> {
        let contents =
            fs::read_to_string(path).map_err(|e| SliceError::landmark_read(path, e))?;

        let mut set = Self::new();

        // Line 1 is the header row
        for (idx, row) in contents.lines().enumerate().skip(1) {
            if row.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = row.split_whitespace().collect();
            if fields.len() != 4 {
                return Err(SliceError::landmark_parse(
                    path,
                    idx + 1,
                    format!("expected 4 fields, found {}", fields.len()),
                ));
            }

            let mut coords = [0.0_f64; 3];
            for (axis, field) in fields[1..].iter().enumerate() {
                coords[axis] = field.parse().map_err(|_| {
                    SliceError::landmark_parse(
                        path,
                        idx + 1,
                        format!("non-numeric coordinate {:?}", field),
                    )
                })?;
            }

            set.insert(fields[0], Point3::new(coords[0], coords[1], coords[2]));
        }

        debug!("Loaded {} landmarks from {:?}", set.len(), path);

        Ok(set)
    }

    /// Insert a landmark, replacing any previous point under the same name.
    pub fn insert(&mut self, name: impl Into<String>, point: Point3<f64>) {
        self.points.insert(name.into(), point);
    }

    /// Look up a landmark by name.
    ///
    /// Returns [`SliceError::MissingLandmark`] when the name is absent.
    pub fn get(&self, name: &str) -> SliceResult<Point3<f64>> {
        self.points
            .get(name)
            .copied()
            .ok_or_else(|| SliceError::missing_landmark(name))
    }

    /// Whether a landmark with the given name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.points.contains_key(name)
    }

    /// Number of landmarks in the set.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set holds no landmarks.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
