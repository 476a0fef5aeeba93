//! Force-directed layout: many-body repulsion, anchor pull and disc collision,
//! integrated with a decaying alpha until the layout settles.

mod forces;
mod quadtree;

use eframe::egui::{Vec2, vec2};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::cluster::ClusterLayout;
use crate::record::Record;
use crate::util::stable_pair;

use forces::{CollisionParams, RepulsionParams, apply_anchor_pull, charge_on, resolve_collisions};
use quadtree::Cell;

const ALPHA_TARGET: f32 = 0.0;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Magnitude of the mutual repulsion (a many-body charge of `-charge_strength`).
    pub charge_strength: f32,
    pub anchor_strength: f32,
    pub collision_radius: f32,
    pub collision_strength: f32,
    /// Fraction of velocity removed every tick.
    pub velocity_decay: f32,
    pub alpha_min: f32,
    /// Number of ticks alpha takes to decay from 1 to `alpha_min`.
    pub settle_ticks: u32,
    pub theta: f32,
    pub distance_min: f32,
    /// Half-width of the square around its anchor a point starts in.
    pub initial_spread: f32,
    pub max_ticks: Option<u32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            charge_strength: 2.0,
            anchor_strength: 0.1,
            collision_radius: 4.0,
            collision_strength: 1.0,
            velocity_decay: 0.4,
            alpha_min: 0.001,
            settle_ticks: 300,
            theta: 0.9,
            distance_min: 1.0,
            initial_spread: 24.0,
            max_ticks: None,
        }
    }
}

impl SimulationConfig {
    pub fn alpha_decay(&self) -> f32 {
        1.0 - self.alpha_min.powf(1.0 / self.settle_ticks.max(1) as f32)
    }
}

/// Layout state of one record for the lifetime of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationPoint {
    /// Index of the record in the slice the simulation was created from.
    pub record: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub anchor: Vec2,
}

#[derive(Default)]
struct PhysicsScratch {
    forces: Vec<Vec2>,
    positions: Vec<Vec2>,
    candidates: Vec<usize>,
}

pub struct ForceSimulation {
    points: Vec<SimulationPoint>,
    config: SimulationConfig,
    alpha: f32,
    ticks: u32,
    scratch: PhysicsScratch,
}

impl ForceSimulation {
    pub fn new(records: &[Record], clusters: &ClusterLayout, config: SimulationConfig) -> Self {
        let mut unmapped = 0usize;
        let lone = records.len() == 1;
        let points = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let anchor = clusters.lookup(&record.month).unwrap_or_else(|| {
                    unmapped += 1;
                    clusters.fallback()
                });
                let position = if lone {
                    anchor
                } else {
                    let (jx, jy) = stable_pair(record.idx);
                    anchor + vec2(jx, jy) * config.initial_spread
                };

                SimulationPoint {
                    record: index,
                    position,
                    velocity: Vec2::ZERO,
                    anchor,
                }
            })
            .collect::<Vec<_>>();

        if unmapped > 0 {
            warn!(
                unmapped,
                "records with an unknown month are anchored at the canvas center"
            );
        }

        // Nothing pairwise to resolve, so a lone point simply stays on its anchor.
        let alpha = if points.len() < 2 { 0.0 } else { 1.0 };
        info!(points = points.len(), "starting force simulation");

        Self {
            points,
            config,
            alpha,
            ticks: 0,
            scratch: PhysicsScratch::default(),
        }
    }

    pub fn points(&self) -> &[SimulationPoint] {
        &self.points
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.alpha >= self.config.alpha_min
            && self.config.max_ticks.is_none_or(|limit| self.ticks < limit)
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.points
            .iter()
            .map(|point| point.velocity.length_sq())
            .sum()
    }

    /// Advances one tick. Returns `false` without touching any point once settled.
    pub fn step(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        self.alpha += (ALPHA_TARGET - self.alpha) * self.config.alpha_decay();

        self.apply_repulsion();
        apply_anchor_pull(&mut self.points, self.config.anchor_strength * self.alpha);
        let overlaps = self.apply_collisions();

        let retain = 1.0 - self.config.velocity_decay.clamp(0.0, 1.0);
        for point in &mut self.points {
            point.velocity *= retain;
            point.position += point.velocity;
        }
        self.ticks += 1;

        if !self.is_running() {
            info!(
                ticks = self.ticks,
                overlaps,
                energy = self.kinetic_energy(),
                "force simulation settled"
            );
        } else if self.ticks % 60 == 0 {
            debug!(ticks = self.ticks, alpha = self.alpha, overlaps, "simulation tick");
        }

        true
    }

    /// Runs to convergence, calling `on_tick` with the tick number after every step.
    pub fn run(&mut self, mut on_tick: impl FnMut(u32, &[SimulationPoint])) -> u32 {
        while self.step() {
            on_tick(self.ticks, &self.points);
        }
        self.ticks
    }

    fn apply_repulsion(&mut self) {
        let node_count = self.points.len();
        if node_count < 2 || self.config.charge_strength == 0.0 {
            return;
        }

        let scratch = &mut self.scratch;
        scratch.positions.clear();
        scratch
            .positions
            .extend(self.points.iter().map(|point| point.position));
        scratch.forces.resize(node_count, Vec2::ZERO);

        let Some(tree) = Cell::build(&scratch.positions) else {
            return;
        };

        let params = RepulsionParams {
            strength: self.config.charge_strength * self.alpha,
            distance_min_sq: self.config.distance_min * self.config.distance_min,
            theta: self.config.theta,
        };
        for (index, force) in scratch.forces.iter_mut().enumerate() {
            *force = charge_on(&tree, index, &scratch.positions, params);
        }

        for (point, force) in self.points.iter_mut().zip(&scratch.forces) {
            point.velocity += *force;
        }
    }

    fn apply_collisions(&mut self) -> usize {
        if self.points.len() < 2 || self.config.collision_radius <= 0.0 {
            return 0;
        }

        let scratch = &mut self.scratch;
        scratch.positions.clear();
        scratch.positions.extend(
            self.points
                .iter()
                .map(|point| point.position + point.velocity),
        );

        let Some(tree) = Cell::build(&scratch.positions) else {
            return 0;
        };

        resolve_collisions(
            &tree,
            &mut self.points,
            CollisionParams {
                radius: self.config.collision_radius,
                strength: self.config.collision_strength,
            },
            &mut scratch.candidates,
        )
    }
}
