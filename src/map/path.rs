use glam::DVec2;
use std::f64::consts::PI;
use std::fmt::Write;

use crate::data::Shape;
use crate::geo::LonLat;
use crate::map::projection::Projection;

/// A shape in pixel space, split into subpaths at antimeridian crossings
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectedShape {
    pub subpaths: Vec<Vec<DVec2>>,
    pub closed: bool,
    /// Indices of subpaths cut out of a ring at the antimeridian. These
    /// stay open so no chord is drawn across the map.
    pub fragments: Vec<usize>,
}

impl ProjectedShape {
    pub fn vertex_count(&self) -> usize {
        self.subpaths.iter().map(Vec::len).sum()
    }

    /// Whether subpath `index` ends with a close
    pub fn closes(&self, index: usize) -> bool {
        self.closed && !self.fragments.contains(&index)
    }

    /// SVG path data: `M x,y L x,y ...` per subpath, `Z` on closed rings
    pub fn to_path_data(&self) -> String {
        let mut d = String::new();
        for (index, sub) in self.subpaths.iter().enumerate().filter(|(_, s)| !s.is_empty()) {
            for (i, p) in sub.iter().enumerate() {
                let cmd = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{cmd}{},{}", fmt_coord(p.x), fmt_coord(p.y));
            }
            if self.closes(index) {
                d.push('Z');
            }
        }
        d
    }
}

/// Print a pixel coordinate with at most three decimals
pub fn fmt_coord(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Turns geographic shapes into pixel paths with one shared projection
pub struct PathGenerator<'a> {
    projection: &'a Projection,
}

impl<'a> PathGenerator<'a> {
    pub fn new(projection: &'a Projection) -> Self {
        Self { projection }
    }

    pub fn project_shape(&self, shape: &Shape) -> ProjectedShape {
        self.project_rings(&shape.rings, shape.closed)
    }

    pub fn project_line(&self, line: &[LonLat], closed: bool) -> ProjectedShape {
        self.project_all(std::iter::once(line), closed)
    }

    pub fn project_rings(&self, rings: &[Vec<LonLat>], closed: bool) -> ProjectedShape {
        self.project_all(rings.iter().map(Vec::as_slice), closed)
    }

    fn project_all<'r>(&self, rings: impl IntoIterator<Item = &'r [LonLat]>, closed: bool) -> ProjectedShape {
        let mut shape = ProjectedShape {
            closed,
            ..ProjectedShape::default()
        };
        for ring in rings {
            let pieces = self.split_ring(ring, closed);
            if pieces.len() > 1 {
                let start = shape.subpaths.len();
                shape.fragments.extend(start..start + pieces.len());
            }
            shape.subpaths.extend(pieces);
        }
        shape
    }

    /// Project a ring, starting a new subpath wherever it jumps across the
    /// antimeridian of the rotated frame. A closed ring that gets cut has its
    /// last piece joined onto its first, since both sides of the ring's
    /// start point lie on the same side of the cut.
    fn split_ring(&self, ring: &[LonLat], closed: bool) -> Vec<Vec<DVec2>> {
        let mut subpaths = Vec::new();
        let mut current: Vec<DVec2> = Vec::with_capacity(ring.len());
        let mut prev_lambda: Option<f64> = None;

        for &(lon, lat) in ring {
            let (lambda, phi) = self.projection.rotate(lon, lat);
            if let Some(prev) = prev_lambda {
                if (lambda - prev).abs() > PI && !current.is_empty() {
                    subpaths.push(std::mem::take(&mut current));
                }
            }
            current.push(self.projection.project_rotated(lambda, phi));
            prev_lambda = Some(lambda);
        }

        if !current.is_empty() {
            subpaths.push(current);
        }

        if closed && subpaths.len() > 1 {
            let first = subpaths.remove(0);
            if let Some(last) = subpaths.last_mut() {
                let skip = usize::from(last.last() == first.first());
                last.extend(first.into_iter().skip(skip));
            }
        }
        subpaths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_coord() {
        assert_eq!(fmt_coord(12.0), "12");
        assert_eq!(fmt_coord(12.5), "12.5");
        assert_eq!(fmt_coord(1.23456), "1.235");
        assert_eq!(fmt_coord(-0.0001), "0");
    }

    #[test]
    fn test_path_data_closed_polygon() {
        let projection = Projection::mercator().scale(1.0).translate([0.0, 0.0]).build();
        let shape = Shape {
            rings: vec![vec![(0.0, 0.0), (90.0, 0.0), (90.0, 10.0)]],
            closed: true,
        };
        assert!(PathGenerator::new(&projection).project_shape(&shape).fragments.is_empty());
        let d = PathGenerator::new(&projection).project_shape(&shape).to_path_data();
        assert!(d.starts_with("M0,0L1.571,0L1.571,"));
        assert!(d.ends_with('Z'));
    }

    #[test]
    fn test_open_line_has_no_close() {
        let projection = Projection::mercator().build();
        let d = PathGenerator::new(&projection)
            .project_line(&[(0.0, 0.0), (10.0, 0.0)], false)
            .to_path_data();
        assert_eq!(d.matches('M').count(), 1);
        assert!(!d.contains('Z'));
    }

    #[test]
    fn test_antimeridian_splits_subpaths() {
        let projection = Projection::mercator().build();
        let generator = PathGenerator::new(&projection);
        let shape = generator.project_line(&[(170.0, 0.0), (179.0, 0.0), (-179.0, 0.0), (-170.0, 0.0)], false);
        assert_eq!(shape.subpaths.len(), 2);
        assert_eq!(shape.vertex_count(), 4);
        assert_eq!(shape.to_path_data().matches('M').count(), 2);
    }

    #[test]
    fn test_split_closed_ring_is_stitched_and_left_open() {
        let projection = Projection::mercator().build();
        let generator = PathGenerator::new(&projection);
        let ring = vec![(170.0, 10.0), (-170.0, 10.0), (-170.0, -10.0), (170.0, -10.0), (170.0, 10.0)];
        let shape = generator.project_rings(&[ring], true);

        // West piece plus the east piece joined across the ring's start
        assert_eq!(shape.subpaths.len(), 2);
        assert_eq!(shape.fragments, vec![0, 1]);
        assert_eq!(shape.subpaths[1].len(), 2);

        let d = shape.to_path_data();
        assert_eq!(d.matches('M').count(), 2);
        assert!(!d.contains('Z'));
    }

    #[test]
    fn test_unsplit_rings_still_close() {
        let projection = Projection::mercator().build();
        let generator = PathGenerator::new(&projection);
        let rings = vec![
            vec![(170.0, 10.0), (-170.0, 10.0), (-170.0, -10.0), (170.0, 10.0)],
            vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)],
        ];
        let shape = generator.project_rings(&rings, true);
        let last = shape.subpaths.len() - 1;
        assert!(shape.closes(last));
        assert!(!shape.closes(0));
        assert!(shape.to_path_data().ends_with('Z'));
    }
}
