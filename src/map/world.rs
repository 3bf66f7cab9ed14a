use glam::DVec2;

use crate::app::{MapComponent, Variant};
use crate::data::{ClassNames, WorldData};
use crate::error::Result;
use crate::map::mounted::{MountedMap, ProjectedMap};
use crate::map::path::{fmt_coord, PathGenerator};
use crate::map::projection::Projection;
use crate::map::style::REGION_STROKE;
use crate::map::{MAP_CONTAINER_ID, SVG_NS, XLINK_NS};
use crate::scene::Element;

pub const WIDTH: f64 = 960.0;
pub const HEIGHT: f64 = 500.0;
pub const WRAPPER_ID: &str = "world";
const LAND_FILL: &str = "#E0E4E5";

/// Plain Mercator world outline
pub struct WorldMap {
    data: WorldData,
    classes: ClassNames,
}

impl WorldMap {
    pub fn new(data: WorldData, classes: ClassNames) -> Self {
        Self { data, classes }
    }

    pub fn project(&self) -> Result<ProjectedMap> {
        let projection = Projection::mercator()
            .fit_size([WIDTH, HEIGHT], &self.data.region.shapes)?
            .build();
        let path = PathGenerator::new(&projection);

        Ok(ProjectedMap {
            size: DVec2::new(WIDTH, HEIGHT),
            region: self.data.region.shapes.iter().map(|s| path.project_shape(s)).collect(),
            bands: Vec::new(),
            cities: Vec::new(),
        })
    }
}

impl MapComponent for WorldMap {
    fn variant(&self) -> Variant {
        Variant::World
    }

    fn mount(&self) -> Result<MountedMap> {
        let projected = self.project()?;

        let land = Element::new("g").class("land").children(projected.region.iter().map(|s| {
            Element::new("path")
                .attr("d", s.to_path_data())
                .attr("fill", LAND_FILL)
                .attr("stroke", REGION_STROKE)
                .attr("stroke-width", "0.5px")
        }));

        let svg = Element::new("svg")
            .attr("xmlns", SVG_NS)
            .attr("xmlns:xlink", XLINK_NS)
            .class(&self.classes.scaling_svg)
            .attr("width", "100%")
            .attr("height", "100%")
            .attr("viewBox", format!("0, 0, {WIDTH}, {HEIGHT}"))
            .child(land);

        let markup = Element::new("div")
            .attr("id", WRAPPER_ID)
            .class("u-full")
            .class(&self.classes.wrapper)
            .attr("aria-label", "A map of the world")
            .child(
                Element::new("div").class(&self.classes.responsive_container).child(
                    Element::new("div")
                        .attr("id", MAP_CONTAINER_ID)
                        .class(&self.classes.scaling_svg_container)
                        .style("padding-bottom", format!("{}%", fmt_coord(HEIGHT / WIDTH * 100.0)))
                        .child(svg),
                ),
            );

        tracing::debug!(shapes = projected.region.len(), "Drew world map");
        Ok(MountedMap::new(Variant::World, markup, projected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn test_world_mount() {
        let map = WorldMap::new(fixtures::world_data(), ClassNames::default());
        let mounted = map.mount().unwrap();
        assert_eq!(mounted.variant(), Variant::World);

        let svg = mounted.svg().unwrap();
        assert_eq!(svg.get_attr("viewBox"), Some("0, 0, 960, 500"));
        assert_eq!(svg.find_all("path").len(), 2);
        assert!(mounted.projected().bands.is_empty());
    }

    #[test]
    fn test_world_fits_viewport() {
        let map = WorldMap::new(fixtures::world_data(), ClassNames::default());
        let projected = map.project().unwrap();
        for p in projected.region.iter().flat_map(|s| s.subpaths.iter().flatten()) {
            assert!(p.x >= -1e-6 && p.x <= WIDTH + 1e-6);
            assert!(p.y >= -1e-6 && p.y <= HEIGHT + 1e-6);
        }
    }

    #[test]
    fn test_polar_ring_does_not_squash_the_map() {
        let json = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"Polygon","coordinates":[[[-120,60],[-40,60],[-40,-55],[-120,-55],[-120,60]]]}},
            {"type":"Feature","properties":{},"geometry":{"type":"Polygon","coordinates":[[[-170,-65],[0,-70],[170,-65],[170,-90],[-170,-90],[-170,-65]]]}}
        ]}"#;
        let fc = crate::data::parse_collection("world.geo.json", json).unwrap();
        let region = crate::data::region_from_collection("world.geo.json", &fc).unwrap();
        let map = WorldMap::new(WorldData { region }, ClassNames::default());
        let projected = map.project().unwrap();

        let americas = &projected.region[0].subpaths[0];
        let (top, bottom) = americas
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        assert!(bottom - top > 200.0, "americas span {}", bottom - top);

        let antarctica_max = projected.region[1].subpaths[0].iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        assert!((antarctica_max - HEIGHT).abs() < 1e-6);
    }

    #[test]
    fn test_container_padding() {
        let map = WorldMap::new(fixtures::world_data(), ClassNames::default());
        let mounted = map.mount().unwrap();
        let container = mounted.markup().find_by_id(MAP_CONTAINER_ID).unwrap();
        assert_eq!(container.get_style("padding-bottom"), Some("52.083%"));
    }
}
