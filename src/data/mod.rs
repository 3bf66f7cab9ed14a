mod eclipse;
mod styles;

#[cfg(test)]
pub mod fixtures;

use geojson::{FeatureCollection, GeoJson, Geometry, Value};
use std::fs;
use std::path::Path;

use crate::error::{MapError, Result};
use crate::geo::LonLat;

pub use eclipse::{eclipse_file_name, EclipseRecord, ECLIPSE_YEARS};
pub use styles::ClassNames;

/// Region outline used for the Australia map (projection fit and clip)
pub const AUSTRALIA_FILE: &str = "australia.geo.json";
/// Land outline used for the world map
pub const WORLD_FILE: &str = "world.geo.json";

/// Geometry of one feature as rings of lon/lat positions
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub rings: Vec<Vec<LonLat>>,
    /// Polygons close every ring; line strings stay open
    pub closed: bool,
}

/// A named, read-only set of shapes loaded from a feature collection
#[derive(Clone, Debug)]
pub struct Region {
    pub name: String,
    pub shapes: Vec<Shape>,
}

/// Everything the Australia map draws
#[derive(Clone, Debug)]
pub struct AustraliaData {
    pub region: Region,
    pub eclipses: Vec<EclipseRecord>,
}

/// Everything the world map draws
#[derive(Clone, Debug)]
pub struct WorldData {
    pub region: Region,
}

/// Load the region outline and every eclipse overlay from `dir`
pub fn load_australia(dir: &Path) -> Result<AustraliaData> {
    let region = load_region(&dir.join(AUSTRALIA_FILE))?;

    let eclipses = ECLIPSE_YEARS
        .iter()
        .map(|&year| EclipseRecord::load(&dir.join(eclipse_file_name(year))))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(
        region = %region.name,
        shapes = region.shapes.len(),
        eclipses = eclipses.len(),
        "Loaded Australia datasets from {}",
        dir.display()
    );

    Ok(AustraliaData { region, eclipses })
}

/// Load the world land outline from `dir`
pub fn load_world(dir: &Path) -> Result<WorldData> {
    let region = load_region(&dir.join(WORLD_FILE))?;
    tracing::info!(shapes = region.shapes.len(), "Loaded world dataset from {}", dir.display());
    Ok(WorldData { region })
}

/// Load a region from a GeoJSON feature collection file
pub fn load_region(path: &Path) -> Result<Region> {
    let collection = read_collection(path)?;
    region_from_collection(&display_name(path), &collection)
}

/// Read and parse a GeoJSON feature collection from disk
pub fn read_collection(path: &Path) -> Result<FeatureCollection> {
    let content = fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_collection(&display_name(path), &content)
}

/// Parse GeoJSON text that must hold a feature collection
pub fn parse_collection(name: &str, content: &str) -> Result<FeatureCollection> {
    let geojson: GeoJson = content.parse().map_err(|e| MapError::GeoJson {
        name: name.to_string(),
        source: Box::new(e),
    })?;

    match geojson {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => Err(MapError::NotACollection {
            name: name.to_string(),
        }),
    }
}

/// Build a region from every drawable feature of `collection`
pub fn region_from_collection(name: &str, collection: &FeatureCollection) -> Result<Region> {
    let mut shapes = Vec::with_capacity(collection.features.len());
    for feature in &collection.features {
        if let Some(ref geometry) = feature.geometry {
            collect_shapes(geometry, &mut shapes);
        }
    }

    if shapes.is_empty() {
        return Err(MapError::EmptyRegion(name.to_string()));
    }

    Ok(Region {
        name: name.to_string(),
        shapes,
    })
}

fn collect_shapes(geometry: &Geometry, out: &mut Vec<Shape>) {
    match &geometry.value {
        Value::LineString(coords) => out.push(Shape {
            rings: vec![positions(coords)],
            closed: false,
        }),
        Value::MultiLineString(lines) => out.push(Shape {
            rings: lines.iter().map(|l| positions(l)).collect(),
            closed: false,
        }),
        Value::Polygon(rings) => out.push(Shape {
            rings: rings.iter().map(|r| positions(r)).collect(),
            closed: true,
        }),
        Value::MultiPolygon(polygons) => out.push(Shape {
            rings: polygons.iter().flatten().map(|r| positions(r)).collect(),
            closed: true,
        }),
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_shapes(g, out);
            }
        }
        Value::Point(_) | Value::MultiPoint(_) => {}
    }
}

/// Convert GeoJSON positions to lon/lat pairs, dropping short positions
pub(crate) fn positions(coords: &[geojson::Position]) -> Vec<LonLat> {
    coords
        .iter()
        .filter_map(|c| match c.as_slice() {
            [lon, lat, ..] => Some((*lon, *lat)),
            _ => None,
        })
        .collect()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
