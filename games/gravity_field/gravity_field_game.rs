use glam::Vec2;
use rand::{rngs::StdRng, SeedableRng};
use gravfield::engine::{
    config::SimulationConfig,
    error::GravityError,
    gravity::{GravityStats, GravitySystem},
    scene::Scene,
    vec_field::FieldSampler,
    Game,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSource {
    /// Bodies listed in the scenario
    Scenario,
    /// Seeded random disc of bodies
    RandomCluster { count: usize, seed: u64 },
}

pub struct GravityFieldGame {
    source: SceneSource,
    scene: Scene,
    gravity: Option<GravitySystem>,
    sampler: FieldSampler,
    substeps: u32,
    parallel: bool,
    stats_every: u64,
    initial_stats: Option<GravityStats<Vec2>>,
    elapsed: f32,
}

impl GravityFieldGame {
    pub fn new(source: SceneSource) -> Self {
        Self {
            source,
            scene: Scene::default(),
            gravity: None,
            sampler: FieldSampler::default(),
            substeps: 1,
            parallel: false,
            stats_every: 60,
            initial_stats: None,
            elapsed: 0.0,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_stats_every(mut self, frames: u64) -> Self {
        self.stats_every = frames.max(1);
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn tick(&mut self, gravity: &GravitySystem, dt: f32) -> Result<(), GravityError> {
        #[cfg(feature = "parallel")]
        if self.parallel {
            return self
                .scene
                .tick_parallel(gravity, &self.sampler, dt, self.substeps);
        }
        self.scene.tick(gravity, &self.sampler, dt, self.substeps)
    }

    fn log_stats(&self, frame: u64, stats: &GravityStats<Vec2>) {
        let drift = self
            .initial_stats
            .map(|initial| stats.total_energy - initial.total_energy)
            .unwrap_or(0.0);

        log::info!(
            "frame {:>5} t={:.2}s  momentum=({:+.5}, {:+.5})  energy={:+.5} (drift {:+.2e})",
            frame,
            self.elapsed,
            stats.total_momentum.x,
            stats.total_momentum.y,
            stats.total_energy,
            drift
        );
    }
}

impl Game for GravityFieldGame {
    fn config() -> SimulationConfig {
        SimulationConfig::new()
    }

    fn init(&mut self, config: &SimulationConfig) -> Result<(), GravityError> {
        let gravity = config.gravity_system()?;
        self.sampler = config.field_sampler()?;
        self.substeps = config.integration.substeps;

        self.scene = match self.source {
            SceneSource::Scenario => Scene::from_config(config),
            SceneSource::RandomCluster { count, seed } => Scene::random_cluster(
                count,
                0.8,
                &config.field.grid,
                config.field.style.base_scale,
                &mut StdRng::seed_from_u64(seed),
            ),
        };

        if self.parallel && !cfg!(feature = "parallel") {
            log::warn!("Built without the parallel feature, using the serial integrator");
            self.parallel = false;
        }

        // Draw the field once so frame 0 already has line lengths
        self.sampler
            .update(&gravity, &self.scene.bodies, &mut self.scene.field);

        let stats = gravity.stats(&self.scene.bodies);
        log::info!(
            "Gravity field initialized: {} bodies, {} field lines, strength {}, {} substeps{}",
            stats.total_bodies,
            self.scene.field.len(),
            gravity.strength(),
            self.substeps,
            if self.parallel { " (parallel)" } else { "" }
        );
        self.initial_stats = Some(stats);
        self.gravity = Some(gravity);
        Ok(())
    }

    fn update(&mut self, frame: u64, dt: f32) -> Result<(), GravityError> {
        let Some(gravity) = self.gravity else {
            log::warn!("Update before init, skipping frame {}", frame);
            return Ok(());
        };

        self.tick(&gravity, dt)?;
        self.elapsed += dt;

        if frame % self.stats_every == 0 {
            let stats = gravity.stats(&self.scene.bodies);
            self.log_stats(frame, &stats);
        }
        Ok(())
    }

    fn finish(&mut self, frames: u64) {
        log::info!("Finished {} frames ({:.2}s simulated)", frames, self.elapsed);

        for (i, body) in self.scene.bodies.iter().enumerate() {
            log::info!(
                "body {:>3}: position ({:+.4}, {:+.4}) velocity ({:+.4}, {:+.4})",
                i,
                body.position.x,
                body.position.y,
                body.velocity.x,
                body.velocity.y
            );
        }

        if let Some(strongest) = self
            .scene
            .field
            .iter()
            .max_by(|a, b| a.visual_scale.total_cmp(&b.visual_scale))
        {
            log::info!(
                "longest field line at ({:+.3}, {:+.3}): scale {:.4}, angle {:+.3} rad",
                strongest.position.x,
                strongest.position.y,
                strongest.visual_scale,
                strongest.visual_orientation
            );
        }
    }
}
