use std::path::PathBuf;
use thiserror::Error;

use crate::app::Variant;

/// Everything that can go wrong between reading a dataset and mounting a map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse GeoJSON in {name}: {source}")]
    GeoJson {
        name: String,
        #[source]
        source: Box<geojson::Error>,
    },

    #[error("{name}: expected a FeatureCollection")]
    NotACollection { name: String },

    #[error("overlay {name}: expected at least 3 features, found {found}")]
    TooFewFeatures { name: String, found: usize },

    #[error("overlay {name}: feature {index} is not a LineString")]
    NotALine { name: String, index: usize },

    #[error("overlay {name}: invalid metadata: {source}")]
    Metadata {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("overlay {name}: no color given and label {label:?} is not a year")]
    MissingColor { name: String, label: String },

    #[error("overlay {name}: label offset {offset} is outside 0..=100")]
    LabelOffset { name: String, offset: f64 },

    #[error("invalid class name manifest {}: {source}", path.display())]
    Styles {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("region {0} has no drawable geometry")]
    EmptyRegion(String),

    #[error("no dataset configured for the {0} map")]
    MissingDataset(Variant),
}

pub type Result<T, E = MapError> = std::result::Result<T, E>;
