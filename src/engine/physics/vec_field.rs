use serde::{Deserialize, Serialize};

use crate::engine::{
    error::GravityError,
    math::Vector,
    physics::{
        body::{Body, SamplePoint},
        gravity::GravitySystem,
    },
};

/// Tuning constants that squash an unbounded field strength into a line length.
///
/// The defaults were picked by eye for a 40x40 grid over `[-1, 1]²`, they are
/// not physical constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldStyle {
    /// Line length for a zero field
    pub base_scale: f32,
    /// Extra length reached once the field saturates
    pub scale_range: f32,
    /// `ln(|field| + 1)` at which the line saturates
    pub normalization: f32,
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            base_scale: 0.005,
            scale_range: 0.045,
            normalization: 3.0,
        }
    }
}

impl FieldStyle {
    pub fn with_base_scale(mut self, base_scale: f32) -> Self {
        self.base_scale = base_scale;
        self
    }

    pub fn with_scale_range(mut self, scale_range: f32) -> Self {
        self.scale_range = scale_range;
        self
    }

    pub fn with_normalization(mut self, normalization: f32) -> Self {
        self.normalization = normalization;
        self
    }

    /// Scales must be finite and non-negative, normalization finite and positive
    pub fn validate(&self) -> Result<(), GravityError> {
        let scales = [
            ("base_scale", self.base_scale),
            ("scale_range", self.scale_range),
        ];
        for (name, value) in scales {
            if !value.is_finite() || value < 0.0 {
                return Err(GravityError::InvalidFieldStyle { name, value });
            }
        }
        if !self.normalization.is_finite() || self.normalization <= 0.0 {
            return Err(GravityError::InvalidFieldStyle {
                name: "normalization",
                value: self.normalization,
            });
        }
        Ok(())
    }
}

/// Turns the gravity of a body set into field lines at fixed sample points.
///
/// Orientation convention: the angle is `atan2(y, x)` of the net force on a
/// unit mass at the sample, so lines point towards whatever pulls hardest. A
/// sample at `(1, 0)` with a lone source at the origin gets `π`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldSampler {
    style: FieldStyle,
}

impl FieldSampler {
    pub fn new(style: FieldStyle) -> Result<Self, GravityError> {
        style.validate()?;
        Ok(Self { style })
    }

    pub fn style(&self) -> &FieldStyle {
        &self.style
    }

    /// Recompute every sample's visual scale and orientation.
    ///
    /// Bodies are only read, and calling this twice without moving anything
    /// gives the same output.
    pub fn update<V: Vector>(
        &self,
        gravity: &GravitySystem,
        bodies: &[Body<V>],
        samples: &mut [SamplePoint<V>],
    ) {
        for sample in samples.iter_mut() {
            let direction = self.sample_field(gravity, bodies, sample);
            let (scale, orientation) = self.encode(direction);
            sample.visual_scale = scale;
            sample.visual_orientation = orientation;
        }
    }

    /// Net force on a unit mass placed at `position`
    pub fn sample<V: Vector>(&self, gravity: &GravitySystem, bodies: &[Body<V>], position: V) -> V {
        self.sample_field(gravity, bodies, &SamplePoint::new(position))
    }

    fn sample_field<V: Vector>(
        &self,
        gravity: &GravitySystem,
        bodies: &[Body<V>],
        sample: &SamplePoint<V>,
    ) -> V {
        bodies
            .iter()
            .fold(V::ZERO, |direction, body| direction + gravity.compute_force(body, sample))
    }

    /// Map a raw field vector to `(visual_scale, visual_orientation)`
    pub fn encode<V: Vector>(&self, direction: V) -> (f32, f32) {
        let magnitude = direction.length();
        let compressed = ((magnitude + 1.0).ln() / self.style.normalization).clamp(0.0, 1.0);
        let scale = self.style.base_scale + self.style.scale_range * compressed;

        let planar = direction.planar();
        (scale, planar.y.atan2(planar.x))
    }
}
