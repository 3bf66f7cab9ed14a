use glam::DVec2;

use crate::app::{MapComponent, Variant};
use crate::data::{AustraliaData, ClassNames};
use crate::error::Result;
use crate::geo::LonLat;
use crate::map::mounted::{MountedMap, ProjectedBand, ProjectedCity, ProjectedMap, TextAnchor};
use crate::map::path::{fmt_coord, PathGenerator};
use crate::map::projection::Projection;
use crate::map::style::*;
use crate::map::{MAP_CONTAINER_ID, SVG_NS, XLINK_NS};
use crate::scene::Element;

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 550.0;
pub const ROTATE: [f64; 3] = [-132.0, 0.0, 0.0];
pub const PARALLELS: [f64; 2] = [-18.0, -36.0];
/// Shift applied after the fit so labels near the edges are not cut off
pub const CENTER: [f64; 2] = [0.9, 0.0];
pub const CLIP_ID: &str = "ausClip";
pub const WRAPPER_ID: &str = "australia";
const ARIA_LABEL: &str = "A map of Australia showing solar eclipses within the next 100 years";

/// A fixed city marker
#[derive(Clone, Copy, Debug)]
pub struct City {
    pub name: &'static str,
    pub coordinates: LonLat,
    pub anchor: TextAnchor,
    pub offset: (f64, f64),
}

pub const CITIES: [City; 5] = [
    City {
        name: "Gold Coast",
        coordinates: (153.40094, -28.003268),
        anchor: TextAnchor::End,
        offset: (-12.0, 0.0),
    },
    City {
        name: "Sydney",
        coordinates: (151.2099, -33.865143),
        anchor: TextAnchor::End,
        offset: (-12.0, 0.0),
    },
    City {
        name: "Yardea",
        coordinates: (135.465907, -32.2796585),
        anchor: TextAnchor::Middle,
        offset: (0.0, -16.0),
    },
    City {
        name: "Alice Springs",
        coordinates: (133.8806114, -23.7002104),
        anchor: TextAnchor::Middle,
        offset: (0.0, -16.0),
    },
    City {
        name: "Perth",
        coordinates: (115.6806677, -32.0397544),
        anchor: TextAnchor::Start,
        offset: (8.0, 0.0),
    },
];

/// Australia with eclipse paths, labels and city markers
pub struct AustraliaMap {
    data: AustraliaData,
    classes: ClassNames,
}

impl AustraliaMap {
    pub fn new(data: AustraliaData, classes: ClassNames) -> Self {
        Self { data, classes }
    }

    /// Conic conformal fitted to the region outline, then recentred
    pub fn projection(&self) -> Result<Projection> {
        Ok(Projection::conic_conformal()
            .rotate(ROTATE)
            .parallels(PARALLELS)
            .fit_size([WIDTH, HEIGHT], &self.data.region.shapes)?
            .center(CENTER)
            .build())
    }

    /// Static wrapper markup with the legend and an empty `#map` container
    fn render(&self) -> Element {
        let legend = LEGEND.iter().enumerate().map(|(i, (caption, fill))| {
            let entry = Element::new("div")
                .text(*caption)
                .child(Element::new("br"))
                .child(
                    Element::new("svg").attr("width", 50).attr("height", 10).child(
                        Element::new("rect")
                            .attr("width", 50)
                            .attr("height", 10)
                            .style("fill", fill),
                    ),
                );
            if i == 0 {
                entry.style("margin-right", "20%")
            } else {
                entry
            }
        });

        Element::new("div")
            .attr("id", WRAPPER_ID)
            .class("u-full")
            .class(&self.classes.wrapper)
            .attr("aria-label", ARIA_LABEL)
            .child(
                Element::new("div")
                    .class(&self.classes.key)
                    .attr("aria-label", "Legend for the map")
                    .children(legend),
            )
            .child(
                Element::new("div").class(&self.classes.responsive_container).child(
                    Element::new("div")
                        .attr("id", MAP_CONTAINER_ID)
                        .class(&self.classes.scaling_svg_container)
                        .style("padding-bottom", format!("{}%", fmt_coord(HEIGHT / WIDTH * 100.0))),
                ),
            )
    }

    /// Project everything once with a single projection
    pub fn project(&self) -> Result<ProjectedMap> {
        let projection = self.projection()?;
        let path = PathGenerator::new(&projection);

        let region = self.data.region.shapes.iter().map(|s| path.project_shape(s)).collect();

        let bands = self
            .data
            .eclipses
            .iter()
            .map(|rec| ProjectedBand {
                color: rec.color.clone(),
                label: rec.label.clone(),
                label_offset: rec.label_offset,
                band: path.project_line(&rec.band(), true),
                guide: path.project_line(&rec.centreline, false),
            })
            .collect();

        let cities = CITIES
            .iter()
            .map(|city| ProjectedCity {
                name: city.name.to_string(),
                at: projection.project(city.coordinates.0, city.coordinates.1),
                anchor: city.anchor,
                offset: DVec2::new(city.offset.0, city.offset.1),
            })
            .collect();

        Ok(ProjectedMap {
            size: DVec2::new(WIDTH, HEIGHT),
            region,
            bands,
            cities,
        })
    }

    /// Build the `<svg>` layers, back to front
    pub fn draw(&self, projected: &ProjectedMap) -> Element {
        let region_paths = || projected.region.iter().map(|s| Element::new("path").attr("d", s.to_path_data()));

        let clip = Element::new("clipPath").attr("id", CLIP_ID).children(region_paths());

        let states = Element::new("g").class("states").children(region_paths().map(|p| {
            p.attr("fill", REGION_FILL)
                .attr("stroke", REGION_STROKE)
                .attr("stroke-width", REGION_STROKE_WIDTH)
        }));

        let eclipses = Element::new("g")
            .class("eclipses")
            .attr("clip-path", format!("url(#{CLIP_ID})"))
            .children(projected.bands.iter().map(|b| {
                Element::new("path")
                    .attr("d", b.band.to_path_data())
                    .style("fill", &b.color)
                    .style("fill-opacity", FILL_OPACITY)
            }));

        let guides = Element::new("g").children(projected.bands.iter().enumerate().map(|(i, b)| {
            Element::new("path")
                .attr("d", b.guide.to_path_data())
                .attr("id", guide_id(i))
                .style("fill", "none")
        }));

        let labels = Element::new("g").children(projected.bands.iter().enumerate().map(|(i, b)| {
            Element::new("text")
                .class(&self.classes.year_labels)
                .attr("dy", fmt_coord(LABEL_FONT_SIZE * 0.4))
                .attr("alignment-baseline", "alphabetical")
                .child(
                    Element::new("textPath")
                        .attr("xlink:href", format!("#{}", guide_id(i)))
                        .attr("startOffset", format!("{}%", b.label_offset))
                        .text(b.label.as_str())
                        .style("fill", &b.color)
                        .style("font-weight", "bold")
                        .style("font-family", LABEL_FONT_FAMILY),
                )
        }));

        let markers = projected.cities.iter().flat_map(|city| city_marker(city, &self.classes));

        Element::new("svg")
            .attr("xmlns", SVG_NS)
            .attr("xmlns:xlink", XLINK_NS)
            .class(&self.classes.scaling_svg)
            .attr("width", "100%")
            .attr("height", "100%")
            .attr("viewBox", format!("0, 0, {WIDTH}, {HEIGHT}"))
            .child(clip)
            .child(states)
            .child(eclipses)
            .child(guides)
            .child(labels)
            .children(markers)
    }
}

pub fn guide_id(index: usize) -> String {
    format!("path-{index}")
}

/// Outer and inner circle sharing one centre, plus the offset name
fn city_marker(city: &ProjectedCity, classes: &ClassNames) -> [Element; 3] {
    let (x, y) = (fmt_coord(city.at.x), fmt_coord(city.at.y));
    [
        Element::new("circle")
            .attr("cx", &x)
            .attr("cy", &y)
            .attr("r", 6)
            .attr("fill", MARKER_COLOR),
        Element::new("circle")
            .attr("cx", &x)
            .attr("cy", &y)
            .attr("r", 4)
            .attr("fill", MARKER_INNER),
        Element::new("text")
            .class(&classes.place_names)
            .attr("x", &x)
            .attr("y", &y)
            .attr("dx", fmt_coord(city.offset.x))
            .attr("dy", fmt_coord(city.offset.y))
            .text(city.name.as_str())
            .attr("text-anchor", city.anchor.as_str()),
    ]
}

impl MapComponent for AustraliaMap {
    fn variant(&self) -> Variant {
        Variant::Australia
    }

    fn mount(&self) -> Result<MountedMap> {
        let mut markup = self.render();
        let projected = self.project()?;
        let svg = self.draw(&projected);

        if let Some(container) = markup.find_by_id_mut(MAP_CONTAINER_ID) {
            container.append(svg);
        }

        tracing::debug!(
            shapes = projected.region.len(),
            bands = projected.bands.len(),
            cities = projected.cities.len(),
            "Drew Australia map"
        );
        Ok(MountedMap::new(Variant::Australia, markup, projected))
    }
}
