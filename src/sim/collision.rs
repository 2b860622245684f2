//! Collision detection
//!
//! Entity collisions are lane-gated: two entities can only touch when they
//! share a segment, and then only if their tube-space positions are close.
//! The line/point helpers are stateless geometry used for spike and
//! electrification hit-tests.

use glam::Vec2;

use super::entity::Entity;
use super::tube::Tube;

/// Below this a denominator or squared length counts as degenerate
const EPSILON: f32 = 0.0001;

/// Whether `a` and `b` overlap.
///
/// Both must be alive and in the same segment; positions are compared with
/// `Tube::position`. Entities in different lanes never collide, whatever
/// their depths.
pub fn collides<A, B>(a: &A, b: &B, tube: &Tube, threshold: f32) -> bool
where
    A: Entity + ?Sized,
    B: Entity + ?Sized,
{
    if !a.is_alive() || !b.is_alive() || a.segment() != b.segment() {
        return false;
    }
    a.position(tube).distance(b.position(tube)) < threshold
}

/// Intersection point of segments `p1-p2` and `p3-p4`, if any
///
/// Parallel (or nearly parallel) segments report no intersection.
pub fn line_segment_intersection(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let d = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);
    if d.abs() < EPSILON {
        return None;
    }

    let t = ((p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x)) / d;
    let u = -((p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x)) / d;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p1 + (p2 - p1) * t)
    } else {
        None
    }
}

/// Closest point to `point` on the segment `start-end`
fn closest_point_on_segment(point: Vec2, start: Vec2, end: Vec2) -> Vec2 {
    let line = end - start;
    let length_sq = line.length_squared();
    if length_sq < EPSILON {
        return start;
    }
    let t = ((point - start).dot(line) / length_sq).clamp(0.0, 1.0);
    start + line * t
}

/// Distance from `point` to the segment `start-end`
pub fn distance_to_line_segment(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    point.distance(closest_point_on_segment(point, start, end))
}

/// Whether `point` lies within `threshold` of the segment `start-end`
pub fn point_near_line(point: Vec2, start: Vec2, end: Vec2, threshold: f32) -> bool {
    distance_to_line_segment(point, start, end) <= threshold
}

pub fn circle_intersects_line(center: Vec2, radius: f32, start: Vec2, end: Vec2) -> bool {
    point_near_line(center, start, end, radius)
}
