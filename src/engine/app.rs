use crate::engine::{clock::FrameClock, config::SimulationConfig, error::GravityError, Game};

/// Where the per-frame `dt` comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickMode {
    /// Same step every frame, reproducible
    Fixed(f32),
    /// Measured wall clock time, clamped by the frame clock
    Realtime,
}

/// Headless driver loop: owns the game and feeds it clamped frame times.
pub struct App<T: Game> {
    game: T,
    config: SimulationConfig,
    clock: FrameClock,
    mode: TickMode,
}

impl<T: Game> App<T> {
    pub fn new(game: T) -> Result<Self, GravityError> {
        let config = T::config();
        config.validate()?;
        let clock = config.frame_clock()?;
        let mode = TickMode::Fixed(config.integration.dt);

        Ok(Self {
            game,
            config,
            clock,
            mode,
        })
    }

    pub fn with_config(mut self, config: SimulationConfig) -> Result<Self, GravityError> {
        config.validate()?;
        self.clock = config.frame_clock()?;
        if let TickMode::Fixed(_) = self.mode {
            self.mode = TickMode::Fixed(config.integration.dt);
        }
        self.config = config;
        Ok(self)
    }

    pub fn with_mode(mut self, mode: TickMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run `frames` ticks and hand the game back for inspection
    pub fn run(mut self, frames: u64) -> Result<T, GravityError> {
        self.game.init(&self.config)?;
        // Start measuring after init, not at construction
        self.clock.tick();

        for frame in 0..frames {
            let dt = match self.mode {
                TickMode::Fixed(dt) => self.clock.clamp(dt),
                TickMode::Realtime => self.clock.tick(),
            };
            self.game.update(frame, dt)?;
        }

        self.game.finish(frames);
        Ok(self.game)
    }
}
