use thiserror::Error;

#[derive(Error, Debug)]
pub enum GravityError {
    #[error("Gravitational strength must not be negative, got {0}")]
    NegativeStrength(f32),
    #[error("Gravitational strength must be finite, got {0}")]
    NonFiniteStrength(f32),
    #[error("Minimum distance threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f32),
    #[error("Substep count must be at least 1")]
    ZeroSubsteps,
    #[error("Frame time must be finite and non-negative, got {0}")]
    InvalidFrameTime(f32),
    #[error("Field grid needs at least one cell per axis, got {0}")]
    InvalidGrid(u32),
    #[error("Field style {name} is out of range, got {value}")]
    InvalidFieldStyle { name: &'static str, value: f32 },
    #[error("Body {index} has non-positive mass {mass}")]
    InvalidBodyMass { index: usize, mass: f32 },
    #[error("Failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),
}
