use geojson::{FeatureCollection, Value};
use serde::Deserialize;
use std::path::Path;

use crate::error::{MapError, Result};
use crate::geo::LonLat;
use crate::map::band::band_ring;
use crate::map::style::YEAR_SCALE;

use super::{positions, read_collection};

/// Years with a bundled eclipse path, in drawing order
pub const ECLIPSE_YEARS: [u16; 8] = [2028, 2030, 2037, 2038, 2066, 2068, 2077, 2093];

pub fn eclipse_file_name(year: u16) -> String {
    format!("{year}-eclipse.geo.json")
}

/// Top-level members attached to an eclipse feature collection
#[derive(Deserialize)]
struct Metadata {
    #[serde(default)]
    color: Option<String>,
    label: String,
    #[serde(rename = "labelOffset")]
    label_offset: LabelOffset,
}

/// `labelOffset` appears both as a number and as a string like "25" or "25%"
#[derive(Deserialize)]
#[serde(untagged)]
enum LabelOffset {
    Number(f64),
    Text(String),
}

/// One eclipse overlay: the source collection plus its display metadata.
///
/// The collection must hold at least three line features: two paired
/// boundaries (`features[0]` and `features[2]`) around a centreline
/// (`features[1]`). This is checked when the record is built.
#[derive(Clone, Debug)]
pub struct EclipseRecord {
    pub name: String,
    pub collection: FeatureCollection,
    pub color: String,
    pub label: String,
    /// Percent (0..=100) along the centreline where the label starts
    pub label_offset: f64,
    pub first_boundary: Vec<LonLat>,
    pub centreline: Vec<LonLat>,
    pub second_boundary: Vec<LonLat>,
}

impl EclipseRecord {
    pub fn load(path: &Path) -> Result<Self> {
        let collection = read_collection(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_collection(&name, collection)
    }

    pub fn from_collection(name: &str, collection: FeatureCollection) -> Result<Self> {
        let found = collection.features.len();
        if found < 3 {
            return Err(MapError::TooFewFeatures {
                name: name.to_string(),
                found,
            });
        }

        let line = |index: usize| -> Result<Vec<LonLat>> {
            match collection.features[index].geometry.as_ref().map(|g| &g.value) {
                Some(Value::LineString(coords)) => Ok(positions(coords)),
                _ => Err(MapError::NotALine {
                    name: name.to_string(),
                    index,
                }),
            }
        };
        let first_boundary = line(0)?;
        let centreline = line(1)?;
        let second_boundary = line(2)?;

        let members = collection.foreign_members.clone().unwrap_or_default();
        let meta: Metadata = serde_json::from_value(serde_json::Value::Object(members))
            .map_err(|source| MapError::Metadata {
                name: name.to_string(),
                source,
            })?;

        let label_offset = match meta.label_offset {
            LabelOffset::Number(n) => n,
            LabelOffset::Text(ref s) => s.trim().trim_end_matches('%').trim().parse().map_err(|_| {
                MapError::Metadata {
                    name: name.to_string(),
                    source: <serde_json::Error as serde::de::Error>::custom(format!("labelOffset {s:?} is not a number")),
                }
            })?,
        };
        if !(0.0..=100.0).contains(&label_offset) {
            return Err(MapError::LabelOffset {
                name: name.to_string(),
                offset: label_offset,
            });
        }

        let color = match meta.color {
            Some(color) => color,
            None => match meta.label.trim().parse::<f64>() {
                Ok(year) => YEAR_SCALE.css(year),
                Err(_) => {
                    return Err(MapError::MissingColor {
                        name: name.to_string(),
                        label: meta.label,
                    })
                }
            },
        };

        Ok(Self {
            name: name.to_string(),
            collection,
            color,
            label: meta.label,
            label_offset,
            first_boundary,
            centreline,
            second_boundary,
        })
    }

    /// Closed band between the two boundaries
    pub fn band(&self) -> Vec<LonLat> {
        band_ring(&self.first_boundary, &self.second_boundary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::data::parse_collection;

    fn record(json: &str) -> Result<EclipseRecord> {
        EclipseRecord::from_collection("test", parse_collection("test", json).unwrap())
    }

    #[test]
    fn test_metadata_from_foreign_members() {
        let rec = record(&fixtures::eclipse_json(2030, Some("#E27A3B"), "25")).unwrap();
        assert_eq!(rec.color, "#E27A3B");
        assert_eq!(rec.label, "2030");
        assert_eq!(rec.label_offset, 25.0);
        assert_eq!(rec.first_boundary.len(), 5);
        assert_eq!(rec.centreline.len(), 5);
    }

    #[test]
    fn test_label_offset_accepts_strings() {
        let rec = record(&fixtures::eclipse_json(2030, Some("red"), "\"40%\"")).unwrap();
        assert_eq!(rec.label_offset, 40.0);

        let err = record(&fixtures::eclipse_json(2030, Some("red"), "\"far\"")).unwrap_err();
        assert!(matches!(err, MapError::Metadata { .. }));
    }

    #[test]
    fn test_label_offset_out_of_range() {
        let err = record(&fixtures::eclipse_json(2030, Some("red"), "120")).unwrap_err();
        assert!(matches!(err, MapError::LabelOffset { offset, .. } if offset == 120.0));
    }

    #[test]
    fn test_missing_color_uses_year_scale() {
        let rec = record(&fixtures::eclipse_json(2017, None, "10")).unwrap();
        assert_eq!(rec.color, "rgb(60, 179, 113)");
    }

    #[test]
    fn test_too_few_features() {
        let json = r#"{"type":"FeatureCollection","label":"2028","labelOffset":10,"color":"red","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[120,-20],[130,-25]]}},
            {"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[120,-21],[130,-26]]}}
        ]}"#;
        let err = record(json).unwrap_err();
        assert!(matches!(err, MapError::TooFewFeatures { found: 2, .. }));
    }

    #[test]
    fn test_boundary_must_be_a_line() {
        let json = r#"{"type":"FeatureCollection","label":"2028","labelOffset":10,"color":"red","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[120,-20],[130,-25]]}},
            {"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[120,-21],[130,-26]]}},
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[120,-22]}}
        ]}"#;
        let err = record(json).unwrap_err();
        assert!(matches!(err, MapError::NotALine { index: 2, .. }));
    }

    #[test]
    fn test_band_leaves_source_untouched() {
        let rec = record(&fixtures::eclipse_json(2037, Some("blue"), "50")).unwrap();
        let before = rec.collection.clone();
        let band = rec.band();
        assert_eq!(band.len(), rec.first_boundary.len() + rec.second_boundary.len());
        assert_eq!(rec.collection, before);
    }
}
