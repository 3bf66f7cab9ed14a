pub mod australia;
pub mod band;
mod geometry;
mod mounted;
pub mod path;
pub mod projection;
mod renderer;
pub mod style;
pub mod world;

pub use australia::AustraliaMap;
pub use mounted::{MountedMap, ProjectedBand, ProjectedCity, ProjectedMap, TextAnchor};
pub use projection::Projection;
pub use renderer::{CellLabel, MapLayers};
pub use world::WorldMap;

/// Id of the element each map appends its `<svg>` to
pub const MAP_CONTAINER_ID: &str = "map";
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
