//! Scenario configuration loaded from YAML.
//!
//! Every section is optional and falls back to the values of the two body
//! demo, so an empty file is a valid scenario:
//!
//! ```yaml
//! gravity:
//!   strength: 0.81
//!   min_distance_squared: 1.0e-10
//!
//! integration:
//!   dt: 0.016666668        # fixed tick for headless runs
//!   substeps: 5
//!   max_frame_time: 0.33   # clamp for wall clock runs
//!
//! field:
//!   style: { base_scale: 0.005, scale_range: 0.045, normalization: 3.0 }
//!   grid: { count: 40, min: [-1.0, -1.0], max: [1.0, 1.0] }
//!
//! bodies:
//!   - position: [0.5, 0.5]
//!     velocity: [-0.5, 0.0]
//!     mass: 1.0
//!     color: [1.0, 0.0, 0.0]
//! ```

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::engine::{
    clock::{FrameClock, DEFAULT_MAX_FRAME_TIME},
    error::GravityError,
    gravity::{GravitySystem, DEFAULT_MIN_DISTANCE_SQUARED},
    physics::Body,
    scene::FieldGrid,
    vec_field::{FieldSampler, FieldStyle},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    pub strength: f32,
    pub min_distance_squared: f32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            strength: 0.81,
            min_distance_squared: DEFAULT_MIN_DISTANCE_SQUARED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    pub dt: f32,
    pub substeps: u32,
    pub max_frame_time: f32,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            substeps: 5,
            max_frame_time: DEFAULT_MAX_FRAME_TIME,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub style: FieldStyle,
    pub grid: FieldGrid,
}

/// Initial state of one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub position: Vec2,
    #[serde(default)]
    pub velocity: Vec2,
    pub mass: f32,
    #[serde(default = "default_color")]
    pub color: Vec3,
}

fn default_color() -> Vec3 {
    Vec3::ONE
}

impl From<&BodyConfig> for Body<Vec2> {
    fn from(config: &BodyConfig) -> Self {
        Body::new(config.position, config.mass)
            .with_velocity(config.velocity)
            .with_color(config.color)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub gravity: GravityConfig,
    pub integration: IntegrationConfig,
    pub field: FieldConfig,
    pub bodies: Vec<BodyConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: GravityConfig::default(),
            integration: IntegrationConfig::default(),
            field: FieldConfig::default(),
            bodies: vec![
                BodyConfig {
                    position: Vec2::new(0.5, 0.5),
                    velocity: Vec2::new(-0.5, 0.0),
                    mass: 1.0,
                    color: Vec3::new(1.0, 0.0, 0.0),
                },
                BodyConfig {
                    position: Vec2::new(-0.45, -0.25),
                    velocity: Vec2::new(0.5, 0.0),
                    mass: 1.0,
                    color: Vec3::new(0.0, 0.0, 1.0),
                },
            ],
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a scenario file
    pub fn load(path: &Path) -> Result<Self, GravityError> {
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&yaml)?;
        log::info!(
            "Loaded scenario from {:?} ({} bodies)",
            path,
            config.bodies.len()
        );
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, GravityError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, GravityError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject everything the simulation would otherwise choke on later
    pub fn validate(&self) -> Result<(), GravityError> {
        self.gravity_system()?;
        self.field_sampler()?;
        self.frame_clock()?;
        if self.integration.substeps == 0 {
            return Err(GravityError::ZeroSubsteps);
        }
        if !self.integration.dt.is_finite() || self.integration.dt < 0.0 {
            return Err(GravityError::InvalidFrameTime(self.integration.dt));
        }
        if self.field.grid.count == 0 {
            return Err(GravityError::InvalidGrid(self.field.grid.count));
        }
        // Not checked per tick, so check it once here
        if let Some((index, body)) = self
            .bodies
            .iter()
            .enumerate()
            .find(|(_, body)| body.mass.is_nan() || body.mass <= 0.0)
        {
            return Err(GravityError::InvalidBodyMass {
                index,
                mass: body.mass,
            });
        }
        Ok(())
    }

    pub fn gravity_system(&self) -> Result<GravitySystem, GravityError> {
        GravitySystem::new(self.gravity.strength)?
            .with_min_distance_squared(self.gravity.min_distance_squared)
    }

    pub fn field_sampler(&self) -> Result<FieldSampler, GravityError> {
        FieldSampler::new(self.field.style)
    }

    pub fn frame_clock(&self) -> Result<FrameClock, GravityError> {
        FrameClock::new(self.integration.max_frame_time)
    }

    pub fn with_strength(mut self, strength: f32) -> Self {
        self.gravity.strength = strength;
        self
    }

    pub fn with_substeps(mut self, substeps: u32) -> Self {
        self.integration.substeps = substeps;
        self
    }

    pub fn with_dt(mut self, dt: f32) -> Self {
        self.integration.dt = dt;
        self
    }

    pub fn with_style(mut self, style: FieldStyle) -> Self {
        self.field.style = style;
        self
    }

    pub fn with_grid(mut self, grid: FieldGrid) -> Self {
        self.field.grid = grid;
        self
    }

    pub fn with_bodies(mut self, bodies: Vec<BodyConfig>) -> Self {
        self.bodies = bodies;
        self
    }
}
