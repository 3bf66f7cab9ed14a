use glam::{DVec2, DVec3};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::data::Shape;
use crate::error::{MapError, Result};

const EPSILON: f64 = 1e-6;

/// Scale used while measuring bounds during a fit
const FIT_TRIAL_SCALE: f64 = 150.0;

#[inline(always)]
fn tan_half(phi: f64) -> f64 {
    ((FRAC_PI_2 + phi) / 2.0).tan()
}

/// Unscaled projection from rotated radians to the plane (y up)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawProjection {
    Mercator,
    ConicConformal { n: f64, f: f64 },
}

impl RawProjection {
    /// Lambert conformal conic with the two standard parallels (degrees).
    /// Falls back to Mercator when the cone constant vanishes.
    pub fn conic_conformal(parallels: [f64; 2]) -> Self {
        let y0 = parallels[0].to_radians();
        let y1 = parallels[1].to_radians();
        let cy0 = y0.cos();

        let n = if y0 == y1 {
            y0.sin()
        } else {
            (cy0 / y1.cos()).ln() / (tan_half(y1) / tan_half(y0)).ln()
        };

        if n == 0.0 || !n.is_finite() {
            return RawProjection::Mercator;
        }

        let f = cy0 * tan_half(y0).powf(n) / n;
        RawProjection::ConicConformal { n, f }
    }

    pub fn forward(&self, lambda: f64, phi: f64) -> DVec2 {
        match *self {
            RawProjection::Mercator => {
                let phi = phi.clamp(-FRAC_PI_2 + EPSILON, FRAC_PI_2 - EPSILON);
                DVec2::new(lambda, tan_half(phi).ln())
            }
            RawProjection::ConicConformal { n, f } => {
                // Keep away from the pole the cone opens towards
                let phi = if f > 0.0 {
                    phi.max(-FRAC_PI_2 + EPSILON)
                } else {
                    phi.min(FRAC_PI_2 - EPSILON)
                };
                let r = f / tan_half(phi).powf(n);
                DVec2::new(r * (n * lambda).sin(), f - r * (n * lambda).cos())
            }
        }
    }
}

/// Spherical rotation by (lambda, phi, gamma), all in radians
#[derive(Clone, Copy, Debug, PartialEq)]
struct Rotation {
    delta_lambda: f64,
    cos_phi: f64,
    sin_phi: f64,
    cos_gamma: f64,
    sin_gamma: f64,
    tilted: bool,
}

impl Rotation {
    fn from_degrees(angles: [f64; 3]) -> Self {
        let delta_phi = angles[1].to_radians();
        let delta_gamma = angles[2].to_radians();
        Self {
            delta_lambda: angles[0].to_radians() % TAU,
            cos_phi: delta_phi.cos(),
            sin_phi: delta_phi.sin(),
            cos_gamma: delta_gamma.cos(),
            sin_gamma: delta_gamma.sin(),
            tilted: delta_phi != 0.0 || delta_gamma != 0.0,
        }
    }

    fn apply(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let mut lambda = lambda + self.delta_lambda;
        if lambda > PI {
            lambda -= TAU;
        } else if lambda < -PI {
            lambda += TAU;
        }

        if !self.tilted {
            return (lambda, phi);
        }

        let p = DVec3::new(lambda.cos() * phi.cos(), lambda.sin() * phi.cos(), phi.sin());
        let k = p.z * self.cos_phi + p.x * self.sin_phi;
        (
            (p.y * self.cos_gamma - k * self.sin_gamma).atan2(p.x * self.cos_phi - p.z * self.sin_phi),
            (k * self.cos_gamma + p.y * self.sin_gamma).clamp(-1.0, 1.0).asin(),
        )
    }
}

/// A fixed map projection: geographic degrees in, viewport pixels out.
///
/// Built once through [`ProjectionBuilder`] and never changed afterwards, so
/// every layer drawn with the same instance lines up.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    raw: RawProjection,
    rotation: Rotation,
    scale: f64,
    translate: DVec2,
    /// Pixel offset after recentring on `center`
    offset: DVec2,
    /// Raw `|y|` bound; Mercator is cut to the square of side 2pi
    y_limit: Option<f64>,
}

impl Projection {
    /// Conic conformal with d3's defaults (parallels 30/30, scale 109.5)
    pub fn conic_conformal() -> ProjectionBuilder {
        ProjectionBuilder::new(Kind::ConicConformal { parallels: [30.0, 30.0] }, 109.5)
    }

    /// Spherical Mercator with d3's defaults (scale 961 / 2pi)
    pub fn mercator() -> ProjectionBuilder {
        ProjectionBuilder::new(Kind::Mercator, 961.0 / TAU)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> DVec2 {
        self.translate
    }

    /// Rotate a geographic coordinate into the projection's frame (radians)
    pub fn rotate(&self, lon: f64, lat: f64) -> (f64, f64) {
        self.rotation.apply(lon.to_radians(), lat.to_radians())
    }

    /// Project a geographic coordinate (degrees) to pixel coordinates
    pub fn project(&self, lon: f64, lat: f64) -> DVec2 {
        let (lambda, phi) = self.rotate(lon, lat);
        self.project_rotated(lambda, phi)
    }

    /// Project a coordinate that has already been rotated
    pub fn project_rotated(&self, lambda: f64, phi: f64) -> DVec2 {
        let mut p = self.raw.forward(lambda, phi);
        if let Some(limit) = self.y_limit {
            p.y = p.y.clamp(-limit, limit);
        }
        DVec2::new(self.offset.x + self.scale * p.x, self.offset.y - self.scale * p.y)
    }
}

#[derive(Clone, Copy, Debug)]
enum Kind {
    Mercator,
    ConicConformal { parallels: [f64; 2] },
}

/// Mutable configuration for a [`Projection`]; mirrors the d3 setters.
#[derive(Clone, Debug)]
pub struct ProjectionBuilder {
    kind: Kind,
    rotate: [f64; 3],
    center: [f64; 2],
    scale: f64,
    translate: [f64; 2],
}

impl ProjectionBuilder {
    fn new(kind: Kind, scale: f64) -> Self {
        Self {
            kind,
            rotate: [0.0; 3],
            center: [0.0; 2],
            scale,
            translate: [480.0, 250.0],
        }
    }

    pub fn rotate(mut self, rotate: [f64; 3]) -> Self {
        self.rotate = rotate;
        self
    }

    /// Standard parallels; ignored by Mercator
    pub fn parallels(mut self, parallels: [f64; 2]) -> Self {
        if let Kind::ConicConformal { .. } = self.kind {
            self.kind = Kind::ConicConformal { parallels };
        }
        self
    }

    /// Geographic point (in the rotated frame) placed at `translate`
    pub fn center(mut self, center: [f64; 2]) -> Self {
        self.center = center;
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn translate(mut self, translate: [f64; 2]) -> Self {
        self.translate = translate;
        self
    }

    /// Choose scale and translation so `shapes` fill `size` (width, height).
    ///
    /// Bounds are taken over the projected ring vertices at a trial scale and
    /// the result is centred in the rectangle along its slack axis.
    pub fn fit_size(self, size: [f64; 2], shapes: &[Shape]) -> Result<Self> {
        let trial = self.clone().scale(FIT_TRIAL_SCALE).translate([0.0, 0.0]).build();

        let mut min = DVec2::splat(f64::INFINITY);
        let mut max = DVec2::splat(f64::NEG_INFINITY);
        for ring in shapes.iter().flat_map(|s| s.rings.iter()) {
            for &(lon, lat) in ring {
                let p = trial.project(lon, lat);
                min = min.min(p);
                max = max.max(p);
            }
        }

        let extent = max - min;
        let k = (size[0] / extent.x).min(size[1] / extent.y);
        if !k.is_finite() || k <= 0.0 {
            return Err(MapError::EmptyRegion(format!("{} shapes", shapes.len())));
        }

        let x = (size[0] - k * (max.x + min.x)) / 2.0;
        let y = (size[1] - k * (max.y + min.y)) / 2.0;
        Ok(self.scale(FIT_TRIAL_SCALE * k).translate([x, y]))
    }

    pub fn build(self) -> Projection {
        let (raw, y_limit) = match self.kind {
            Kind::Mercator => (RawProjection::Mercator, Some(PI)),
            Kind::ConicConformal { parallels } => (RawProjection::conic_conformal(parallels), None),
        };
        let center = raw.forward(self.center[0].to_radians(), self.center[1].to_radians());
        let translate = DVec2::from(self.translate);

        Projection {
            raw,
            rotation: Rotation::from_degrees(self.rotate),
            scale: self.scale,
            translate,
            offset: DVec2::new(
                translate.x - self.scale * center.x,
                translate.y + self.scale * center.y,
            ),
            y_limit,
        }
    }
}
