use glam::DVec2;

use crate::braille::BrailleCanvas;
use crate::map::geometry::{draw_disc, draw_polyline, stipple_polygon};
use crate::map::mounted::{ProjectedMap, TextAnchor};
use crate::map::style::parse_css_color;

/// A text label in character cells
#[derive(Clone, Debug, PartialEq)]
pub struct CellLabel {
    pub col: u16,
    pub row: u16,
    pub text: String,
    /// Band color for year labels, `None` for place names
    pub rgb: Option<[u8; 3]>,
}

/// Braille layers for one mounted map, back to front
pub struct MapLayers {
    pub outline: BrailleCanvas,
    /// One stippled canvas per band with its color
    pub bands: Vec<(Option<[u8; 3]>, BrailleCanvas)>,
    pub markers: BrailleCanvas,
    pub labels: Vec<CellLabel>,
}

impl MapLayers {
    /// Rasterize a projected map into `cols` x `rows` character cells,
    /// scaled uniformly so the whole viewport fits
    pub fn rasterize(map: &ProjectedMap, cols: usize, rows: usize) -> Self {
        let mut outline = BrailleCanvas::new(cols, rows);
        let mut markers = BrailleCanvas::new(cols, rows);

        let scale = (outline.pixel_width() as f64 / map.size.x).min(outline.pixel_height() as f64 / map.size.y);
        let to_dots = |p: DVec2| p * scale;
        let scaled = |subpaths: &[Vec<DVec2>]| -> Vec<Vec<DVec2>> {
            subpaths.iter().map(|s| s.iter().map(|&p| to_dots(p)).collect()).collect()
        };

        let clip: Vec<Vec<DVec2>> = map.region.iter().flat_map(|s| scaled(&s.subpaths)).collect();
        for shape in &map.region {
            for (i, sub) in scaled(&shape.subpaths).iter().enumerate() {
                draw_polyline(&mut outline, sub, shape.closes(i));
            }
        }

        let bands = map
            .bands
            .iter()
            .map(|band| {
                let mut canvas = BrailleCanvas::new(cols, rows);
                stipple_polygon(&mut canvas, &scaled(&band.band.subpaths), &clip);
                (parse_css_color(&band.color), canvas)
            })
            .collect();

        let mut labels = Vec::new();
        for band in &map.bands {
            if let Some(at) = band.label_position() {
                push_label(&mut labels, to_dots(at), &band.label, TextAnchor::Start, parse_css_color(&band.color));
            }
        }

        for city in &map.cities {
            let at = to_dots(city.at);
            draw_disc(&mut markers, at, 1);
            let offset = to_dots(city.offset);
            // Keep labels clear of the marker even when scaled right down
            let offset = DVec2::new(nudge(offset.x, 2.0), nudge(offset.y, 4.0));
            push_label(&mut labels, at + offset, &city.name, city.anchor, None);
        }

        Self {
            outline,
            bands,
            markers,
            labels,
        }
    }
}

/// Push a non-zero offset `by` dots further from zero
fn nudge(v: f64, by: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v + by.copysign(v)
    }
}

/// Convert a dot position to a character cell and apply the anchor
fn push_label(labels: &mut Vec<CellLabel>, dots: DVec2, text: &str, anchor: TextAnchor, rgb: Option<[u8; 3]>) {
    let len = text.chars().count() as f64;
    let col = dots.x / 2.0
        - match anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => len / 2.0,
            TextAnchor::End => len,
        };
    let row = dots.y / 4.0;
    if col < 0.0 || row < 0.0 {
        return;
    }
    labels.push(CellLabel {
        col: col.round() as u16,
        row: row.floor() as u16,
        text: text.to_string(),
        rgb,
    });
}
