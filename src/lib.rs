//! Gravitational N-body core and vector-field sampler for the gravity field demo.
//!
//! The library only moves numbers around: a presentation layer hands in a time
//! delta plus the body and sample point collections each tick, and reads the
//! updated positions and visual scale/orientation back out.

pub mod engine;

pub use engine::{
    clock::FrameClock,
    config::SimulationConfig,
    error::GravityError,
    gravity::{GravityStats, GravitySystem},
    scene::{FieldGrid, Scene},
    vec_field::{FieldSampler, FieldStyle},
    Body, SamplePoint, Vector,
};
