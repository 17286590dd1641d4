use crate::error::{Error, Result};
use crate::view::{Renderable, SphereGeometry, StandardMaterial};

/// Gravitational constant, m^3 kg^-1 s^-2
pub const G: f64 = 6.673e-11;
/// Mass scale used for planetary masses
pub const E24: f64 = 1e24;
pub const KM: f64 = 1000.0;

pub const SPHEROID_WIDTH_SEGMENTS: u32 = 32;
pub const SPHEROID_HEIGHT_SEGMENTS: u32 = 16;

/// Anything massive enough to matter gravitationally: stars, planets, moons, large asteroids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    radius: f64,
    mass: f64,
    mu: f64,
}

impl Body {
    pub fn new(radius: f64, mass: f64) -> Result<Self> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(Error::InvalidRadius(radius));
        }
        if !(mass.is_finite() && mass >= 0.0) {
            return Err(Error::InvalidMass(mass));
        }
        Ok(Self { radius, mass, mu: G * mass })
    }

    /// Build from a known gravitational parameter instead of a mass
    pub fn from_gm(gm: f64, radius: f64) -> Result<Self> {
        if !(gm.is_finite() && gm >= 0.0) {
            return Err(Error::InvalidGm(gm));
        }
        let body = Self::new(radius, gm / G)?;
        Ok(Self { mu: gm, ..body })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Standard gravitational parameter (G * mass)
    pub fn mu(&self) -> f64 {
        self.mu
    }
}

/// A body drawn as a sphere. The mesh is built once here and never replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Spheroid {
    body: Body,
    renderable: Renderable,
}

impl Spheroid {
    pub fn new(body: Body) -> Self {
        let geometry = SphereGeometry::new(
            body.radius() as f32,
            SPHEROID_WIDTH_SEGMENTS,
            SPHEROID_HEIGHT_SEGMENTS,
        );
        Self {
            body,
            renderable: Renderable::sphere(geometry, StandardMaterial::default()),
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn renderable(&self) -> &Renderable {
        &self.renderable
    }
}
