pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod math;
pub mod physics;
pub mod scene;

pub use app::*;
pub use math::Vector;
pub use physics::*;

use crate::engine::{config::SimulationConfig, error::GravityError};

// Trait that demos driven by `App` implement
pub trait Game {
    fn config() -> SimulationConfig
    where
        Self: Sized;

    fn init(&mut self, config: &SimulationConfig) -> Result<(), GravityError>;
    fn update(&mut self, frame: u64, dt: f32) -> Result<(), GravityError>;

    fn finish(&mut self, _frames: u64) {}
}
