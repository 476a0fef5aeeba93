use eframe::egui::{Vec2, vec2};

use super::SimulationPoint;
use super::quadtree::Cell;

#[derive(Clone, Copy)]
pub(super) struct RepulsionParams {
    /// Charge magnitude already scaled by the current alpha.
    pub(super) strength: f32,
    pub(super) distance_min_sq: f32,
    pub(super) theta: f32,
}

#[derive(Clone, Copy)]
pub(super) struct CollisionParams {
    pub(super) radius: f32,
    pub(super) strength: f32,
}

/// Direction used when two points sit on top of each other.
fn fallback_direction(from: usize, to: usize) -> Vec2 {
    let angle = ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

/// Push on a point at `delta` from a body of `mass`, clipped at the minimum distance.
fn charge_push(delta: Vec2, mass: f32, params: RepulsionParams, fallback: Vec2) -> Vec2 {
    let mut distance_sq = delta.length_sq();
    if distance_sq <= 1.0e-12 {
        return fallback * (params.strength * mass / params.distance_min_sq.sqrt().max(1.0e-3));
    }
    if distance_sq < params.distance_min_sq {
        distance_sq = (params.distance_min_sq * distance_sq).sqrt();
    }
    delta * (params.strength * mass / distance_sq)
}

/// Total repulsion felt by point `index` from everything stored under `cell`.
pub(super) fn charge_on(
    cell: &Cell,
    index: usize,
    positions: &[Vec2],
    params: RepulsionParams,
) -> Vec2 {
    if cell.weight <= 0.0 {
        return Vec2::ZERO;
    }

    let point = positions[index];

    if cell.is_leaf() {
        return cell
            .members
            .iter()
            .filter(|&&other| other != index)
            .map(|&other| {
                charge_push(
                    point - positions[other],
                    1.0,
                    params,
                    fallback_direction(index, other),
                )
            })
            .fold(Vec2::ZERO, |total, push| total + push);
    }

    // A far cell acts as a single body at its centroid.
    let delta = point - cell.centroid;
    let side = cell.region.width();
    let far = !cell.region.contains(point.to_pos2())
        && side * side < params.theta * params.theta * delta.length_sq();
    if far {
        return charge_push(delta, cell.weight, params, fallback_direction(index, 0));
    }

    cell.quads
        .iter()
        .flatten()
        .map(|quad| charge_on(quad, index, positions, params))
        .fold(Vec2::ZERO, |total, push| total + push)
}

/// Pulls each point toward its anchor, x and y independently.
pub(super) fn apply_anchor_pull(points: &mut [SimulationPoint], strength: f32) {
    for point in points {
        let offset = point.anchor - point.position;
        point.velocity.x += offset.x * strength;
        point.velocity.y += offset.y * strength;
    }
}

/// One sweep of pairwise disc separation over predicted positions.
///
/// Impulses are written to velocities as they are found, so later pairs in the
/// sweep see earlier corrections. `tree` must be built over `position + velocity`
/// as it was at the start of the sweep.
pub(super) fn resolve_collisions(
    tree: &Cell,
    points: &mut [SimulationPoint],
    params: CollisionParams,
    candidates: &mut Vec<usize>,
) -> usize {
    let contact = params.radius * 2.0;
    let contact_sq = contact * contact;
    let mut overlaps = 0usize;

    for index in 0..points.len() {
        let predicted = points[index].position + points[index].velocity;
        candidates.clear();
        tree.gather_within(predicted, contact, candidates);

        for &other in candidates.iter() {
            if other <= index {
                continue;
            }

            let mut delta = (points[index].position + points[index].velocity)
                - (points[other].position + points[other].velocity);
            let mut distance_sq = delta.length_sq();
            if distance_sq >= contact_sq {
                continue;
            }
            if distance_sq <= 1.0e-12 {
                delta = fallback_direction(index, other) * 1.0e-3;
                distance_sq = delta.length_sq();
            }

            let distance = distance_sq.sqrt();
            let push = delta * ((contact - distance) / distance * params.strength);
            points[index].velocity += push * 0.5;
            points[other].velocity -= push * 0.5;
            overlaps += 1;
        }
    }

    overlaps
}
