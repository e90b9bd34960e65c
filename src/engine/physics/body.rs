use glam::{Vec2, Vec3};

use crate::engine::math::Vector;

/// Anything the force law can act on: a position and a mass.
pub trait Massive<V: Vector> {
    fn position(&self) -> V;
    fn mass(&self) -> f32;
}

/// A simulated point mass.
///
/// Bodies have no id; the driver owns the ordered collection and the slot a
/// body sits in is its identity for the duration of a call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body<V: Vector> {
    pub position: V,
    pub velocity: V,
    /// Must stay > 0, integration divides by it
    pub mass: f32,
    /// Display colour, untouched by the physics
    pub color: Vec3,
}

pub type Body2 = Body<Vec2>;
pub type Body3 = Body<Vec3>;

impl<V: Vector> Body<V> {
    /// Create a body at rest
    pub fn new(position: V, mass: f32) -> Self {
        debug_assert!(mass > 0.0, "body mass must be positive, got {mass}");
        Self {
            position,
            velocity: V::ZERO,
            mass,
            color: Vec3::ONE,
        }
    }

    pub fn momentum(&self) -> V {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

/// Builder pattern for initial state
impl<V: Vector> Body<V> {
    pub fn with_velocity(mut self, velocity: V) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        debug_assert!(mass > 0.0, "body mass must be positive, got {mass}");
        self.mass = mass;
        self
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }
}

impl<V: Vector> Massive<V> for Body<V> {
    fn position(&self) -> V {
        self.position
    }

    fn mass(&self) -> f32 {
        self.mass
    }
}

/// A static probe of the gravity field.
///
/// Never a force source. The field sampler only writes the two visual fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint<V: Vector> {
    pub position: V,
    /// Length of the rendered field line
    pub visual_scale: f32,
    /// Angle of the rendered field line in radians, measured from +x
    pub visual_orientation: f32,
}

impl<V: Vector> SamplePoint<V> {
    pub fn new(position: V) -> Self {
        Self {
            position,
            visual_scale: 0.0,
            visual_orientation: 0.0,
        }
    }

    /// Start with a given line length, used before the first field update
    pub fn with_visual_scale(mut self, scale: f32) -> Self {
        self.visual_scale = scale;
        self
    }

    /// Unit vector along the rendered field line
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.visual_orientation)
    }
}

// Sample points act as unit-mass targets
impl<V: Vector> Massive<V> for SamplePoint<V> {
    fn position(&self) -> V {
        self.position
    }

    fn mass(&self) -> f32 {
        1.0
    }
}
