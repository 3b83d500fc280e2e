//! Circular fallback layout for topics without a stored position

use std::f64::consts::PI;

use crate::model::Position;

const BASE_RADIUS: f64 = 200.0;
const RADIUS_PER_TOPIC: f64 = 10.0;
const MAX_RADIUS: f64 = 400.0;

/// Position for the `index`-th of `total` topics on a circle around the
/// origin: angle `2π·index/total`, radius `min(200 + 10·total, 400)`.
///
/// `total` is the full topic count of the snapshot, so the circle grows with
/// the graph up to the cap and a lone topic lands on the positive x axis.
pub fn fallback_position(index: usize, total: usize) -> Position {
    let angle = 2.0 * PI * index as f64 / total as f64;
    let radius = (BASE_RADIUS + RADIUS_PER_TOPIC * total as f64).min(MAX_RADIUS);
    Position::new(angle.cos() * radius, angle.sin() * radius)
}
