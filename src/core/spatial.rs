use nalgebra::{Point2, Vector2};

use crate::core::domain::Particle;

/// Displacement from `a` to `b` under the minimum image convention: each
/// component is wrapped into `[-side/2, side/2]`, selecting the nearest
/// periodic image of `b`.
#[inline]
pub fn periodic_delta(a: &Point2<f64>, b: &Point2<f64>, side: f64) -> Vector2<f64> {
    let mut d = b - a;
    d.x -= (d.x / side).round() * side;
    d.y -= (d.y / side).round() * side;
    d
}

/// Squared minimum-image center distance between two points on the torus.
/// Squared values spare a sqrt per compared pair.
#[inline]
pub fn distance_sq(a: &Point2<f64>, b: &Point2<f64>, side: f64) -> f64 {
    periodic_delta(a, b, side).norm_squared()
}

/// Minimum-image center distance between two points on the torus.
#[inline]
pub fn distance(a: &Point2<f64>, b: &Point2<f64>, side: f64) -> f64 {
    distance_sq(a, b, side).sqrt()
}

/// Surface-to-surface gap between two particles: minimum-image center
/// distance minus the sum of the radii. Negative for overlapping disks;
/// equals the center distance when both particles are point-like.
#[inline]
pub fn surface_gap(a: &Particle, b: &Particle, side: f64) -> f64 {
    distance(&a.position, &b.position, side) - (a.radius + b.radius)
}

/// The neighbor predicate: surface gap at most `interaction_radius`.
///
/// Evaluated as a squared comparison against the equivalent center-distance
/// threshold `interaction_radius + a.radius + b.radius`. Every search path
/// (cell index and brute force) must go through this single predicate so
/// borderline pairs are classified identically everywhere.
#[inline]
pub fn within_interaction(
    a: &Particle,
    b: &Particle,
    side: f64,
    interaction_radius: f64,
) -> bool {
    let threshold = interaction_radius + a.radius + b.radius;
    distance_sq(&a.position, &b.position, side) <= threshold * threshold
}
