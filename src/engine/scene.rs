use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{
    config::SimulationConfig,
    error::GravityError,
    gravity::GravitySystem,
    physics::{Body, SamplePoint},
    vec_field::FieldSampler,
};

/// Regular grid of field sample points over an axis aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldGrid {
    /// Cells per axis
    pub count: u32,
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for FieldGrid {
    fn default() -> Self {
        Self {
            count: 40,
            min: Vec2::splat(-1.0),
            max: Vec2::splat(1.0),
        }
    }
}

impl FieldGrid {
    pub fn new(count: u32, min: Vec2, max: Vec2) -> Result<Self, GravityError> {
        if count == 0 {
            return Err(GravityError::InvalidGrid(count));
        }
        Ok(Self { count, min, max })
    }

    /// Total number of samples, `count²`
    pub fn len(&self) -> usize {
        (self.count as usize).pow(2)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// One sample at the centre of every cell, column major
    pub fn points(&self, initial_scale: f32) -> Vec<SamplePoint<Vec2>> {
        let cell = (self.max - self.min) / self.count as f32;
        let mut points = Vec::with_capacity(self.len());

        for i in 0..self.count {
            for j in 0..self.count {
                let position = self.min + Vec2::new(i as f32 + 0.5, j as f32 + 0.5) * cell;
                points.push(SamplePoint::new(position).with_visual_scale(initial_scale));
            }
        }
        points
    }
}

/// The demo world: simulated bodies plus the field lines drawn around them.
///
/// Owned by the driver. The gravity and field systems only borrow the two
/// collections for the length of a tick.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub bodies: Vec<Body<Vec2>>,
    pub field: Vec<SamplePoint<Vec2>>,
}

impl Scene {
    pub fn new(bodies: Vec<Body<Vec2>>, field: Vec<SamplePoint<Vec2>>) -> Self {
        Self { bodies, field }
    }

    /// Red and blue bodies passing each other over a 40x40 field
    pub fn two_body_demo() -> Self {
        Self::from_config(&SimulationConfig::default())
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        let bodies = config.bodies.iter().map(Body::<Vec2>::from).collect();
        let field = config.field.grid.points(config.field.style.base_scale);
        log::debug!(
            "Scene built with {} bodies and {} field samples",
            config.bodies.len(),
            config.field.grid.len()
        );
        Self { bodies, field }
    }

    /// Scatter `count` bodies in a disc of `radius` with a slight spin
    pub fn random_cluster(
        count: usize,
        radius: f32,
        grid: &FieldGrid,
        initial_scale: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let colors = [
            Vec3::new(1.0, 0.0, 0.0), // Red
            Vec3::new(0.0, 0.0, 1.0), // Blue
            Vec3::new(1.0, 0.5, 0.0), // Orange
            Vec3::new(0.0, 1.0, 0.5), // Green
            Vec3::new(1.0, 1.0, 0.0), // Yellow
        ];

        let bodies = (0..count)
            .map(|_| {
                let angle = rng.random_range(0.0..std::f32::consts::TAU);
                let distance = radius * rng.random_range(0.0f32..1.0).sqrt();
                let position = Vec2::from_angle(angle) * distance;
                let velocity = position.perp() * 0.5;
                let mass = rng.random_range(0.5..=2.0);
                let color = colors[rng.random_range(0..colors.len())];

                Body::new(position, mass)
                    .with_velocity(velocity)
                    .with_color(color)
            })
            .collect();

        Self {
            bodies,
            field: grid.points(initial_scale),
        }
    }

    /// One frame of the demo: integrate the bodies, then redraw the field
    pub fn tick(
        &mut self,
        gravity: &GravitySystem,
        sampler: &FieldSampler,
        dt: f32,
        substeps: u32,
    ) -> Result<(), GravityError> {
        gravity.update(&mut self.bodies, dt, substeps)?;
        sampler.update(gravity, &self.bodies, &mut self.field);
        Ok(())
    }

    /// Same as [`Self::tick`] with the rayon integrator
    #[cfg(feature = "parallel")]
    pub fn tick_parallel(
        &mut self,
        gravity: &GravitySystem,
        sampler: &FieldSampler,
        dt: f32,
        substeps: u32,
    ) -> Result<(), GravityError> {
        gravity.update_parallel(&mut self.bodies, dt, substeps)?;
        sampler.update(gravity, &self.bodies, &mut self.field);
        Ok(())
    }
}
