use glam::DVec2;

/// A geographic position as (longitude, latitude) in degrees
pub type LonLat = (f64, f64);

/// Total length of a pixel-space polyline
pub fn polyline_length(points: &[DVec2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Position at `fraction` (0..=1) of the combined length of `subpaths`.
///
/// Subpaths are walked in order and the gaps between them do not count,
/// which is how SVG measures `startOffset` on a path with several `M` commands.
pub fn point_along(subpaths: &[Vec<DVec2>], fraction: f64) -> Option<DVec2> {
    let total: f64 = subpaths.iter().map(|s| polyline_length(s)).sum();
    let first = subpaths.iter().find_map(|s| s.first().copied())?;
    if total <= 0.0 {
        return Some(first);
    }

    let mut remaining = total * fraction.clamp(0.0, 1.0);
    let mut last = first;
    for sub in subpaths {
        for w in sub.windows(2) {
            let seg = w[0].distance(w[1]);
            if remaining <= seg {
                let t = if seg > 0.0 { remaining / seg } else { 0.0 };
                return Some(w[0].lerp(w[1], t));
            }
            remaining -= seg;
            last = w[1];
        }
    }
    Some(last)
}

/// Even-odd containment of `p` against every ring
pub fn point_in_rings(p: DVec2, rings: &[Vec<DVec2>]) -> bool {
    let mut inside = false;
    for ring in rings {
        let n = ring.len();
        if n < 3 {
            continue;
        }
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (ring[i], ring[j]);
            if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
                inside = !inside;
            }
            j = i;
        }
    }
    inside
}
