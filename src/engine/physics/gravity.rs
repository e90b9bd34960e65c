use crate::engine::{
    error::GravityError,
    math::Vector,
    physics::body::{Body, Massive},
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Pairs closer than this (squared) exert no force on each other
pub const DEFAULT_MIN_DISTANCE_SQUARED: f32 = 1e-10;

/// Brute force Newtonian gravity between every pair of bodies.
///
/// Holds configuration only. Body state lives in the caller's slice, which is
/// borrowed for a single call and never kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitySystem {
    strength: f32,
    min_distance_squared: f32,
}

impl GravitySystem {
    /// Create a gravity system with the given gravitational constant
    pub fn new(strength: f32) -> Result<Self, GravityError> {
        if !strength.is_finite() {
            return Err(GravityError::NonFiniteStrength(strength));
        }
        if strength < 0.0 {
            return Err(GravityError::NegativeStrength(strength));
        }
        log::debug!("Gravity system created with strength {}", strength);

        Ok(Self {
            strength,
            min_distance_squared: DEFAULT_MIN_DISTANCE_SQUARED,
        })
    }

    /// Override the near-coincidence cutoff used by [`Self::compute_force`]
    pub fn with_min_distance_squared(mut self, threshold: f32) -> Result<Self, GravityError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(GravityError::InvalidThreshold(threshold));
        }
        self.min_distance_squared = threshold;
        Ok(self)
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn min_distance_squared(&self) -> f32 {
        self.min_distance_squared
    }

    /// Force exerted on `to` by `from`, pointing from `to` towards `from`.
    ///
    /// Near-coincident pairs return exactly zero instead of blowing up. This is
    /// an approximation: momentum is not exchanged for such a pair.
    pub fn compute_force<V: Vector>(&self, from: &impl Massive<V>, to: &impl Massive<V>) -> V {
        let offset = from.position() - to.position();
        let distance_squared = offset.dot(offset);

        if distance_squared.abs() < self.min_distance_squared {
            return V::ZERO;
        }

        let force = self.strength * to.mass() * from.mass() / distance_squared;
        offset * force / distance_squared.sqrt()
    }

    /// Advance every body by `dt`, split into `substeps` equal intervals.
    ///
    /// More substeps are more stable but cost a full O(n²) pass each.
    pub fn update<V: Vector>(
        &self,
        bodies: &mut [Body<V>],
        dt: f32,
        substeps: u32,
    ) -> Result<(), GravityError> {
        if substeps == 0 {
            return Err(GravityError::ZeroSubsteps);
        }
        debug_assert!(
            bodies.iter().all(|b| b.mass > 0.0),
            "every body needs a positive mass"
        );

        let step_delta = dt / substeps as f32;
        for _ in 0..substeps {
            self.step_simulation(bodies, step_delta);
        }
        Ok(())
    }

    /// Single substep update
    pub fn step<V: Vector>(&self, bodies: &mut [Body<V>], dt: f32) {
        self.step_simulation(bodies, dt);
    }

    /// One semi-implicit Euler pass: all pairwise velocity kicks, then drift
    fn step_simulation<V: Vector>(&self, bodies: &mut [Body<V>], dt: f32) {
        for j in 1..bodies.len() {
            let (head, tail) = bodies.split_at_mut(j);
            let body_b = &mut tail[0];

            for body_a in head.iter_mut() {
                let force = self.compute_force(&*body_a, &*body_b);
                body_a.velocity += (-force) * dt / body_a.mass;
                body_b.velocity += force * dt / body_b.mass;
            }
        }

        for body in bodies.iter_mut() {
            body.position += body.velocity * dt;
        }
    }

    /// Same integration as [`Self::update`], with the pairwise pass spread over
    /// the rayon pool.
    ///
    /// Each body's velocity change is accumulated into a scratch buffer and
    /// applied afterwards, so results match `update` up to summation order.
    #[cfg(feature = "parallel")]
    pub fn update_parallel<V: Vector>(
        &self,
        bodies: &mut [Body<V>],
        dt: f32,
        substeps: u32,
    ) -> Result<(), GravityError> {
        if substeps == 0 {
            return Err(GravityError::ZeroSubsteps);
        }
        debug_assert!(
            bodies.iter().all(|b| b.mass > 0.0),
            "every body needs a positive mass"
        );

        let step_delta = dt / substeps as f32;
        let mut deltas = vec![V::ZERO; bodies.len()];

        for _ in 0..substeps {
            let snapshot: &[Body<V>] = &*bodies;
            deltas.par_iter_mut().enumerate().for_each(|(i, delta)| {
                let body = &snapshot[i];
                let mut pull = V::ZERO;
                for (j, other) in snapshot.iter().enumerate() {
                    if i != j {
                        pull += self.compute_force(other, body);
                    }
                }
                *delta = pull * step_delta / body.mass;
            });

            for (body, delta) in bodies.iter_mut().zip(&deltas) {
                body.velocity += *delta;
                body.position += body.velocity * step_delta;
            }
        }
        Ok(())
    }

    pub fn total_momentum<V: Vector>(&self, bodies: &[Body<V>]) -> V {
        bodies.iter().fold(V::ZERO, |acc, b| acc + b.momentum())
    }

    pub fn kinetic_energy<V: Vector>(&self, bodies: &[Body<V>]) -> f32 {
        bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    /// Pairwise potential `-G m_a m_b / r`, skipping pairs inside the cutoff
    pub fn potential_energy<V: Vector>(&self, bodies: &[Body<V>]) -> f32 {
        let mut energy = 0.0;
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                let distance_squared = (a.position - b.position).length_squared();
                if distance_squared < self.min_distance_squared {
                    continue;
                }
                energy -= self.strength * a.mass * b.mass / distance_squared.sqrt();
            }
        }
        energy
    }

    /// Get simulation statistics for debugging
    pub fn stats<V: Vector>(&self, bodies: &[Body<V>]) -> GravityStats<V> {
        let kinetic_energy = self.kinetic_energy(bodies);
        let potential_energy = self.potential_energy(bodies);

        GravityStats {
            total_bodies: bodies.len(),
            total_momentum: self.total_momentum(bodies),
            kinetic_energy,
            potential_energy,
            total_energy: kinetic_energy + potential_energy,
        }
    }
}

/// Conserved quantities of a body set, for logging drift
#[derive(Debug, Clone, Copy)]
pub struct GravityStats<V: Vector> {
    pub total_bodies: usize,
    pub total_momentum: V,
    pub kinetic_energy: f32,
    pub potential_energy: f32,
    pub total_energy: f32,
}
