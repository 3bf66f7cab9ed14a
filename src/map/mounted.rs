use glam::DVec2;

use crate::app::Variant;
use crate::geo::point_along;
use crate::map::path::ProjectedShape;
use crate::scene::Element;

/// Horizontal alignment of a text label relative to its anchor point
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// An eclipse band with its guide path, in pixels
#[derive(Clone, Debug)]
pub struct ProjectedBand {
    pub color: String,
    pub label: String,
    /// Percent along the guide where the label starts
    pub label_offset: f64,
    pub band: ProjectedShape,
    pub guide: ProjectedShape,
}

impl ProjectedBand {
    /// Where the label text begins on the guide path
    pub fn label_position(&self) -> Option<DVec2> {
        point_along(&self.guide.subpaths, self.label_offset / 100.0)
    }
}

#[derive(Clone, Debug)]
pub struct ProjectedCity {
    pub name: String,
    pub at: DVec2,
    pub anchor: TextAnchor,
    /// Label offset from the marker (dx, dy)
    pub offset: DVec2,
}

/// Pixel-space geometry of a drawn map, kept for the terminal preview
#[derive(Clone, Debug)]
pub struct ProjectedMap {
    /// Viewport size the geometry was fitted to
    pub size: DVec2,
    pub region: Vec<ProjectedShape>,
    pub bands: Vec<ProjectedBand>,
    pub cities: Vec<ProjectedCity>,
}

/// A map after its one-shot draw.
///
/// There is no way to update it: once mounted, the markup and
/// geometry stay as drawn until the map is detached.
#[derive(Clone, Debug)]
pub struct MountedMap {
    variant: Variant,
    markup: Element,
    projected: ProjectedMap,
}

impl MountedMap {
    pub(crate) fn new(variant: Variant, markup: Element, projected: ProjectedMap) -> Self {
        Self {
            variant,
            markup,
            projected,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn markup(&self) -> &Element {
        &self.markup
    }

    pub fn projected(&self) -> &ProjectedMap {
        &self.projected
    }

    /// The drawn `<svg>` (legend swatches have no viewBox)
    pub fn svg(&self) -> Option<&Element> {
        self.markup.find(&|e| e.tag == "svg" && e.get_attr("viewBox").is_some())
    }
}
