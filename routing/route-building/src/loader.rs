//! JSON building model loader.
//!
//! The document root is a list of objects:
//!
//! ```json
//! [
//!   { "Category": "Floors", "Coords": [0, 0, 0, ...], "Indices": [0, 1, 2, ...] },
//!   { "Category": "Ducts",  "Coords": [...],          "Indices": [...] }
//! ]
//! ```
//!
//! Objects whose category contains `floor` (any case) form the floor; the
//! ceiling surface is the set of floor faces lying entirely at the floor's
//! maximum Z. The ceiling keeps every floor vertex, so the slab's underside
//! still counts toward the building bounds. Every other object is an
//! obstacle.

use std::path::Path;

use mesh_types::IndexedMesh;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{BuildingError, BuildingResult};
use crate::model::BuildingModel;

/// Absolute tolerance when matching a vertex Z against the floor top.
const Z_ABS_TOLERANCE: f64 = 1e-8;
/// Relative tolerance when matching a vertex Z against the floor top.
const Z_REL_TOLERANCE: f64 = 1e-5;

#[derive(Debug, Deserialize)]
struct ObjectRecord {
    #[serde(rename = "Coords")]
    coords: Option<Vec<f64>>,
    #[serde(rename = "Indices")]
    indices: Option<Vec<i64>>,
    #[serde(rename = "Category", default)]
    category: Option<String>,
}

impl BuildingModel {
    /// Loads a building model from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`BuildingError::FileNotFound`] if the file does not exist,
    /// [`BuildingError::Io`] if it cannot be read, and any error of
    /// [`BuildingModel::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> BuildingResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BuildingError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let json = std::fs::read_to_string(path).map_err(|source| BuildingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            ceiling_faces = model.ceiling().face_count(),
            obstacles = model.obstacles().len(),
            "Loaded building model"
        );
        Ok(model)
    }

    /// Parses a building model from a JSON document.
    ///
    /// # Errors
    ///
    /// - [`BuildingError::Json`] if the document is not a list of objects
    /// - [`BuildingError::InvalidRecord`] for missing keys, lengths that are
    ///   not multiples of 3, or negative indices
    /// - [`BuildingError::EmptyMesh`] for objects without vertices or faces
    /// - [`BuildingError::IndexOutOfRange`] for faces referencing missing vertices
    /// - [`BuildingError::NoFloorMeshes`] / [`BuildingError::NoCeilingFaces`]
    ///   if no ceiling can be derived
    ///
    /// # Example
    ///
    /// ```
    /// use route_building::BuildingModel;
    ///
    /// let json = r#"[
    ///   { "Category": "Floors",
    ///     "Coords": [0,0,10, 20,0,10, 20,20,10, 0,20,10, 0,0,9],
    ///     "Indices": [0,1,2, 0,2,3, 0,1,4] },
    ///   { "Category": "Pipes",
    ///     "Coords": [5,5,0, 10,5,0, 10,10,5],
    ///     "Indices": [0,1,2] }
    /// ]"#;
    ///
    /// let model = BuildingModel::from_json_str(json).unwrap();
    /// assert_eq!(model.ceiling().face_count(), 2);
    /// assert_eq!(model.obstacles().len(), 1);
    /// ```
    pub fn from_json_str(json: &str) -> BuildingResult<Self> {
        let records: Vec<ObjectRecord> = serde_json::from_str(json)?;

        let mut floors = Vec::new();
        let mut obstacles = Vec::new();
        for (index, record) in records.into_iter().enumerate() {
            let is_floor = record
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains("floor"));
            let mesh = build_mesh(index, record)?;
            if is_floor {
                floors.push(mesh);
            } else {
                obstacles.push(mesh);
            }
        }
        debug!(
            floors = floors.len(),
            obstacles = obstacles.len(),
            "Classified building objects"
        );

        let ceiling = ceiling_from_floors(&floors)?;
        Ok(Self::new(ceiling, obstacles))
    }
}

fn build_mesh(index: usize, record: ObjectRecord) -> BuildingResult<IndexedMesh> {
    let (Some(coords), Some(indices)) = (record.coords, record.indices) else {
        return Err(BuildingError::invalid_record(
            index,
            "each object must contain 'Coords' and 'Indices' keys",
        ));
    };
    if coords.len() % 3 != 0 {
        return Err(BuildingError::invalid_record(
            index,
            format!("'Coords' length {} is not a multiple of 3", coords.len()),
        ));
    }
    if indices.len() % 3 != 0 {
        return Err(BuildingError::invalid_record(
            index,
            format!("'Indices' length {} is not a multiple of 3", indices.len()),
        ));
    }
    let what = || format!("object {index}");
    if coords.is_empty() || indices.is_empty() {
        return Err(BuildingError::empty_mesh(what()));
    }

    let indices = indices
        .iter()
        .map(|&i| u32::try_from(i))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| BuildingError::invalid_record(index, "'Indices' must be non-negative"))?;

    let mesh = IndexedMesh::from_raw(&coords, &indices)
        .ok_or_else(|| BuildingError::invalid_record(index, "ragged coordinate data"))?;
    if let Some((face, bad)) = mesh.first_invalid_index() {
        return Err(BuildingError::IndexOutOfRange {
            what: what(),
            face,
            index: bad,
            vertex_count: mesh.vertex_count(),
        });
    }
    Ok(mesh)
}

fn ceiling_from_floors(floors: &[IndexedMesh]) -> BuildingResult<IndexedMesh> {
    if floors.is_empty() {
        return Err(BuildingError::NoFloorMeshes);
    }

    let mut combined = IndexedMesh::new();
    for floor in floors {
        combined.merge(floor);
    }
    if combined.is_empty() {
        return Err(BuildingError::empty_mesh("combined floor"));
    }

    let z_max = combined
        .vertices
        .iter()
        .map(|v| v.z)
        .fold(f64::NEG_INFINITY, f64::max);
    let at_top = |z: f64| (z - z_max).abs() <= Z_ABS_TOLERANCE + Z_REL_TOLERANCE * z_max.abs();

    let ceiling = combined.select_faces(|tri| tri.vertices().iter().all(|v| at_top(v.z)));
    if ceiling.faces.is_empty() {
        return Err(BuildingError::NoCeilingFaces { z_max });
    }

    let flat = ceiling.triangles().filter(|t| t.is_degenerate_xy()).count();
    if flat > 0 {
        warn!(
            faces = flat,
            "Ceiling has faces with zero projected area; they are ignored by the footprint"
        );
    }
    debug!(
        z_max,
        faces = ceiling.face_count(),
        vertices = ceiling.vertex_count(),
        "Extracted ceiling surface"
    );
    Ok(ceiling)
}
