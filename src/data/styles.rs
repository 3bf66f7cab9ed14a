use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{MapError, Result};

/// Class tokens exported by the companion stylesheet.
///
/// The tokens are opaque; a CSS-modules build hands out hashed names, which
/// can be supplied as a JSON manifest keyed by the camelCase names below.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassNames {
    pub wrapper: String,
    pub key: String,
    pub responsive_container: String,
    pub scaling_svg_container: String,
    pub scaling_svg: String,
    pub year_labels: String,
    pub place_names: String,
    pub error_box: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            wrapper: "map__wrapper".into(),
            key: "map__key".into(),
            responsive_container: "map__responsiveContainer".into(),
            scaling_svg_container: "map__scalingSvgContainer".into(),
            scaling_svg: "map__scalingSvg".into(),
            year_labels: "map__yearLabels".into(),
            place_names: "map__placeNames".into(),
            error_box: "map__errorBox".into(),
        }
    }
}

impl ClassNames {
    /// Read a manifest; names missing from it keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| MapError::Styles {
            path: path.to_path_buf(),
            source,
        })
    }
}
