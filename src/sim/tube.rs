//! Tube geometry: the ring (or open strip) of radial lanes
//!
//! Each segment spans from its inner boundary (depth 0, tube center) to its
//! outer boundary (depth 1, the player's rim). Boundary points are fixed at
//! construction; gameplay only touches the per-segment hazard state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::error::GeometryError;
use crate::clamp_depth;

/// Which boundary edge of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// One lane of the tube
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TubeSegment {
    index: usize,
    inner_left: Vec2,
    inner_right: Vec2,
    outer_left: Vec2,
    outer_right: Vec2,
    /// Height of the spike left by a Spiker (0 = none)
    spike_depth: f32,
    electrified: bool,
    /// Remaining electrification, read by renderers for intensity
    electrification_time: f32,
}

impl TubeSegment {
    fn new(index: usize, inner_left: Vec2, inner_right: Vec2, outer_left: Vec2, outer_right: Vec2) -> Self {
        Self {
            index,
            inner_left,
            inner_right,
            outer_left,
            outer_right,
            spike_depth: 0.0,
            electrified: false,
            electrification_time: 0.0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn inner_left(&self) -> Vec2 {
        self.inner_left
    }

    pub fn inner_right(&self) -> Vec2 {
        self.inner_right
    }

    pub fn outer_left(&self) -> Vec2 {
        self.outer_left
    }

    pub fn outer_right(&self) -> Vec2 {
        self.outer_right
    }

    /// Point on one boundary edge at the given depth
    pub fn point_at_depth(&self, depth: f32, side: Side) -> Vec2 {
        let depth = clamp_depth(depth);
        match side {
            Side::Left => self.inner_left.lerp(self.outer_left, depth),
            Side::Right => self.inner_right.lerp(self.outer_right, depth),
        }
    }

    /// Lane center at the given depth
    pub fn center_at_depth(&self, depth: f32) -> Vec2 {
        (self.point_at_depth(depth, Side::Left) + self.point_at_depth(depth, Side::Right)) / 2.0
    }

    pub fn outer_center(&self) -> Vec2 {
        (self.outer_left + self.outer_right) / 2.0
    }

    pub fn inner_center(&self) -> Vec2 {
        (self.inner_left + self.inner_right) / 2.0
    }

    /// Lane width at the given depth
    pub fn width_at_depth(&self, depth: f32) -> f32 {
        self.point_at_depth(depth, Side::Left)
            .distance(self.point_at_depth(depth, Side::Right))
    }

    pub fn spike_depth(&self) -> f32 {
        self.spike_depth
    }

    pub fn has_spike(&self) -> bool {
        self.spike_depth > 0.0
    }

    /// Grow the spike to `depth`; spikes never shrink during a level
    pub fn raise_spike(&mut self, depth: f32) {
        self.spike_depth = self.spike_depth.max(clamp_depth(depth));
    }

    pub fn is_electrified(&self) -> bool {
        self.electrified
    }

    pub fn electrification_time(&self) -> f32 {
        self.electrification_time
    }

    pub fn electrify(&mut self, remaining: f32) {
        self.electrified = true;
        self.electrification_time = remaining.max(0.0);
    }

    pub fn clear_electrification(&mut self) {
        self.electrified = false;
        self.electrification_time = 0.0;
    }
}

/// The playfield: an ordered sequence of segments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tube {
    segments: Vec<TubeSegment>,
    /// Open tubes clamp at both ends instead of wrapping
    is_open: bool,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
}

impl Tube {
    /// Build a tube from its outer boundary points.
    ///
    /// Closed tubes need exactly `segment_count` points, open tubes one more.
    /// Inner boundaries are the outer points pulled toward `center` by
    /// `inner_scale`.
    pub fn from_points(
        shape: &'static str,
        segment_count: usize,
        is_open: bool,
        center: Vec2,
        outer_points: &[Vec2],
        inner_scale: f32,
    ) -> Result<Self, GeometryError> {
        if segment_count == 0 {
            return Err(GeometryError::EmptyTube);
        }
        let expected = segment_count + usize::from(is_open);
        if outer_points.len() != expected {
            return Err(GeometryError::PointCountMismatch {
                shape,
                expected,
                actual: outer_points.len(),
            });
        }

        let segments = (0..segment_count)
            .map(|i| {
                let left = outer_points[i];
                let right = outer_points[(i + 1) % outer_points.len()];
                TubeSegment::new(
                    i,
                    center.lerp(left, inner_scale),
                    center.lerp(right, inner_scale),
                    left,
                    right,
                )
            })
            .collect();

        let outer_radius = center.distance(outer_points[0]);
        Ok(Self {
            segments,
            is_open,
            center,
            inner_radius: outer_radius * inner_scale,
            outer_radius,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    pub fn segments(&self) -> &[TubeSegment] {
        &self.segments
    }

    /// Map any signed index onto the tube (modulo for closed, clamp for open)
    pub fn wrap_index(&self, index: i64) -> usize {
        let n = self.segments.len() as i64;
        if self.is_open {
            index.clamp(0, n - 1) as usize
        } else {
            index.rem_euclid(n) as usize
        }
    }

    pub fn segment(&self, index: usize) -> &TubeSegment {
        &self.segments[self.wrap_index(index as i64)]
    }

    pub fn segment_mut(&mut self, index: usize) -> &mut TubeSegment {
        let i = self.wrap_index(index as i64);
        &mut self.segments[i]
    }

    /// Neighbor of `index` in `direction`.
    ///
    /// On an open tube a step past either end returns `index` unchanged.
    pub fn adjacent(&self, index: usize, direction: i32) -> usize {
        self.wrap_index(index as i64 + direction as i64)
    }

    /// Direction (-1, 0, 1) of the shortest walk from `from` to `to`
    pub fn shortest_direction(&self, from: usize, to: usize) -> i32 {
        let n = self.segments.len() as i64;
        let mut diff = to as i64 - from as i64;
        if !self.is_open && diff.abs() > n / 2 {
            diff = if diff > 0 { diff - n } else { diff + n };
        }
        crate::sign(diff)
    }

    /// Tube-space position of a point in a lane
    pub fn position(&self, index: usize, depth: f32) -> Vec2 {
        self.segment(index).center_at_depth(depth)
    }

    pub fn clear_spikes(&mut self) {
        for segment in &mut self.segments {
            segment.spike_depth = 0.0;
        }
    }

    pub fn clear_electrification(&mut self) {
        for segment in &mut self.segments {
            segment.clear_electrification();
        }
    }

    /// Number of segments with no spike
    pub fn spike_free_count(&self) -> usize {
        self.segments.iter().filter(|s| !s.has_spike()).count()
    }

    /// Carry spike/electrification state over from a tube of the same size
    pub fn copy_hazards_from(&mut self, other: &Tube) {
        for (dst, src) in self.segments.iter_mut().zip(&other.segments) {
            dst.spike_depth = src.spike_depth;
            dst.electrified = src.electrified;
            dst.electrification_time = src.electrification_time;
        }
    }
}
