//! The chaos game itself: a point that jumps halfway toward a randomly chosen
//! vertex on every step, leaving a trace that fills in a Sierpinski-like
//! fractal.
//!
//! The engine knows nothing about windows or timers. The hosting UI owns a
//! [`ChaosGame`] and calls [`ChaosGame::tick`] from its animation loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::error::ChaosError;

pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 64;

/// Equilateral triangle with unit base.
pub const DEFAULT_VERTICES: [Pt; 3] = [
    Pt { x: 0.0, y: 0.0 },
    Pt { x: 1.0, y: 0.0 },
    Pt { x: 0.5, y: 0.866 },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pt {
    pub x: f64,
    pub y: f64,
}

impl Pt {
    pub const fn new(x: f64, y: f64) -> Self {
        Pt { x, y }
    }

    pub fn midpoint(self, other: Pt) -> Pt {
        Pt {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Everything the UI needs to draw one step: where the point was, which
/// vertex pulled it, and where it landed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    pub from: Pt,
    pub vertex_index: usize,
    pub vertex: Pt,
    pub to: Pt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedChange {
    Increase,
    Decrease,
}

pub struct ChaosGame<R: Rng = StdRng> {
    vertices: Vec<Pt>,
    position: Pt,
    trace: Vec<Pt>,
    speed: u32,
    running: bool,
    rng: R,
}

impl ChaosGame<StdRng> {
    /// Engine seeded from OS entropy.
    pub fn new(vertices: Vec<Pt>) -> Result<Self, ChaosError> {
        Self::with_rng(vertices, StdRng::from_os_rng())
    }

    /// Engine whose every step (and every reset) is reproducible from `seed`.
    pub fn seeded(vertices: Vec<Pt>, seed: u64) -> Result<Self, ChaosError> {
        Self::with_rng(vertices, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ChaosGame<R> {
    pub fn with_rng(vertices: Vec<Pt>, mut rng: R) -> Result<Self, ChaosError> {
        validate_vertices(&vertices)?;
        let start = random_unit_point(&mut rng);
        Ok(Self::from_parts(vertices, rng, start))
    }

    /// Like [`ChaosGame::with_rng`] but starting from `start` instead of a
    /// random point. Later resets still draw a random point.
    pub fn with_start(vertices: Vec<Pt>, rng: R, start: Pt) -> Result<Self, ChaosError> {
        validate_vertices(&vertices)?;
        if !start.is_finite() {
            return Err(ChaosError::NonFiniteStart);
        }
        Ok(Self::from_parts(vertices, rng, start))
    }

    fn from_parts(vertices: Vec<Pt>, rng: R, start: Pt) -> Self {
        ChaosGame {
            vertices,
            position: start,
            trace: Vec::new(),
            speed: MIN_SPEED,
            running: false,
            rng,
        }
    }

    /// Initial steps per tick, clamped to [`MIN_SPEED`]..=[`MAX_SPEED`].
    #[must_use]
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        self
    }

    /// One chaos game iteration toward a uniformly chosen vertex.
    pub fn step(&mut self) -> StepOutcome {
        // vertex set is non-empty, checked at construction
        let index = self.rng.random_range(0..self.vertices.len());
        self.advance(index)
    }

    /// Same midpoint move as [`ChaosGame::step`], toward a caller-chosen vertex.
    pub fn step_toward(&mut self, index: usize) -> Result<StepOutcome, ChaosError> {
        if index >= self.vertices.len() {
            return Err(ChaosError::VertexOutOfRange {
                index,
                len: self.vertices.len(),
            });
        }
        Ok(self.advance(index))
    }

    fn advance(&mut self, vertex_index: usize) -> StepOutcome {
        let from = self.position;
        let vertex = self.vertices[vertex_index];
        let to = from.midpoint(vertex);
        self.trace.push(to);
        self.position = to;
        trace!(vertex_index, x = to.x, y = to.y, "step");
        StepOutcome {
            from,
            vertex_index,
            vertex,
            to,
        }
    }

    /// Pauses, forgets the trace and drops the point somewhere new.
    pub fn reset(&mut self) {
        self.trace.clear();
        self.position = random_unit_point(&mut self.rng);
        self.running = false;
        debug!(x = self.position.x, y = self.position.y, "reset");
    }

    /// Doubles or halves the steps per tick, clamped to
    /// [`MIN_SPEED`]..=[`MAX_SPEED`]. Returns the new speed.
    pub fn set_speed(&mut self, change: SpeedChange) -> u32 {
        self.speed = match change {
            SpeedChange::Increase => (self.speed * 2).min(MAX_SPEED),
            SpeedChange::Decrease => (self.speed / 2).max(MIN_SPEED),
        };
        debug!(speed = self.speed, "speed changed");
        self.speed
    }

    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        debug!(running = self.running, "toggled");
        self.running
    }

    /// One animation tick: `speed` steps if running, nothing otherwise.
    /// Returns the last step taken so the caller can highlight it.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if !self.running {
            return None;
        }
        let mut last = None;
        for _ in 0..self.speed {
            last = Some(self.step());
        }
        last
    }

    pub fn vertices(&self) -> &[Pt] {
        &self.vertices
    }

    pub fn position(&self) -> Pt {
        self.position
    }

    pub fn trace(&self) -> &[Pt] {
        &self.trace
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

fn validate_vertices(vertices: &[Pt]) -> Result<(), ChaosError> {
    if vertices.is_empty() {
        return Err(ChaosError::EmptyVertexSet);
    }
    if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
        return Err(ChaosError::NonFiniteVertex { index });
    }
    Ok(())
}

fn random_unit_point<R: Rng>(rng: &mut R) -> Pt {
    Pt {
        x: rng.random::<f64>(),
        y: rng.random::<f64>(),
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
