//! Per-level tube shapes
//!
//! Levels cycle through eight fixed outlines. Each shape yields its outer
//! boundary points; the tube pulls them toward the center for the inner rim.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

use super::error::GeometryError;
use super::tube::Tube;

/// Screen-space placement of the tube
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubeDimensions {
    pub center: Vec2,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl TubeDimensions {
    pub fn new(center: Vec2, inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
        }
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        let valid = self.inner_radius.is_finite()
            && self.outer_radius.is_finite()
            && self.inner_radius > 0.0
            && self.inner_radius < self.outer_radius;
        if valid {
            Ok(())
        } else {
            Err(GeometryError::InvalidRadii {
                inner: self.inner_radius,
                outer: self.outer_radius,
            })
        }
    }

    /// Ratio used to derive inner boundary points
    pub fn inner_scale(&self) -> f32 {
        self.inner_radius / self.outer_radius
    }
}

impl Default for TubeDimensions {
    fn default() -> Self {
        use crate::consts::*;
        Self {
            center: Vec2::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            inner_radius: DEFAULT_OUTER_RADIUS * DEFAULT_INNER_RATIO,
            outer_radius: DEFAULT_OUTER_RADIUS,
        }
    }
}

/// The eight level outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TubeShape {
    Circle,
    Square,
    Plus,
    Triangle,
    Star,
    /// The only open tube
    FlatV,
    Clover,
    Heart,
}

impl TubeShape {
    pub const ALL: [TubeShape; 8] = [
        TubeShape::Circle,
        TubeShape::Square,
        TubeShape::Plus,
        TubeShape::Triangle,
        TubeShape::Star,
        TubeShape::FlatV,
        TubeShape::Clover,
        TubeShape::Heart,
    ];

    /// Shape used by a (0-indexed) level
    pub fn for_level(level: u32) -> Self {
        Self::ALL[(level % 8) as usize]
    }

    pub fn name(&self) -> &'static str {
        match self {
            TubeShape::Circle => "circle",
            TubeShape::Square => "square",
            TubeShape::Plus => "plus",
            TubeShape::Triangle => "triangle",
            TubeShape::Star => "star",
            TubeShape::FlatV => "flat-v",
            TubeShape::Clover => "clover",
            TubeShape::Heart => "heart",
        }
    }

    pub fn segment_count(&self) -> usize {
        match self {
            TubeShape::Circle | TubeShape::Square | TubeShape::Clover | TubeShape::Heart => 16,
            TubeShape::Plus | TubeShape::Triangle => 12,
            TubeShape::Star => 10,
            TubeShape::FlatV => 8,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, TubeShape::FlatV)
    }

    /// Outer boundary points, clockwise from the top
    pub fn outer_points(&self, center: Vec2, outer_radius: f32) -> Vec<Vec2> {
        let r = outer_radius;
        let points: Vec<Vec2> = match self {
            TubeShape::Circle => (0..16)
                .map(|i| polar(i as f32 * TAU / 16.0 - FRAC_PI_2) * r)
                .collect(),
            TubeShape::Square => {
                let corners = [
                    Vec2::new(-r, -r),
                    Vec2::new(r, -r),
                    Vec2::new(r, r),
                    Vec2::new(-r, r),
                ];
                subdivide(&corners, 4)
            }
            TubeShape::Plus => {
                let arm = r * 0.4;
                vec![
                    Vec2::new(-arm, -r),
                    Vec2::new(arm, -r),
                    Vec2::new(arm, -arm),
                    Vec2::new(r, -arm),
                    Vec2::new(r, arm),
                    Vec2::new(arm, arm),
                    Vec2::new(arm, r),
                    Vec2::new(-arm, r),
                    Vec2::new(-arm, arm),
                    Vec2::new(-r, arm),
                    Vec2::new(-r, -arm),
                    Vec2::new(-arm, -arm),
                ]
            }
            TubeShape::Triangle => {
                let corners: Vec<Vec2> = (0..3)
                    .map(|side| polar(side as f32 * TAU / 3.0 - FRAC_PI_2) * r)
                    .collect();
                subdivide(&corners, 4)
            }
            TubeShape::Star => (0..10)
                .map(|i| {
                    let radius = if i % 2 == 0 { r } else { r * 0.5 };
                    polar(i as f32 * TAU / 10.0 - FRAC_PI_2) * radius
                })
                .collect(),
            TubeShape::FlatV => {
                let width = r * 2.0;
                let height = r;
                (0..=8)
                    .map(|i| {
                        let t = i as f32 / 8.0;
                        let x = (t - 0.5) * width;
                        let y = -(t - 0.5).abs() * height * 2.0 + height;
                        Vec2::new(x, y)
                    })
                    .collect()
            }
            TubeShape::Clover => (0..16)
                .map(|i| {
                    let angle = i as f32 * TAU / 16.0;
                    let radius = r * (0.6 + 0.4 * (angle * 2.0).cos().abs());
                    polar(angle - FRAC_PI_2) * radius
                })
                .collect(),
            TubeShape::Heart => (0..16)
                .map(|i| {
                    let t = i as f32 * TAU / 16.0;
                    let x = 16.0 * t.sin().powi(3);
                    let y = 13.0 * t.cos()
                        - 5.0 * (2.0 * t).cos()
                        - 2.0 * (3.0 * t).cos()
                        - (4.0 * t).cos();
                    Vec2::new(x, -y) * (r / 20.0)
                })
                .collect(),
        };
        points.into_iter().map(|p| center + p).collect()
    }

    /// Generate this shape's tube
    pub fn build(&self, dims: &TubeDimensions) -> Result<Tube, GeometryError> {
        dims.validate()?;
        let points = self.outer_points(dims.center, dims.outer_radius);
        Tube::from_points(
            self.name(),
            self.segment_count(),
            self.is_open(),
            dims.center,
            &points,
            dims.inner_scale(),
        )
    }
}

/// Tube for a given level number
pub fn create_level_tube(level: u32, dims: &TubeDimensions) -> Result<Tube, GeometryError> {
    TubeShape::for_level(level).build(dims)
}

#[inline]
fn polar(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Split each edge of a closed polygon into `per_side` equal steps
fn subdivide(corners: &[Vec2], per_side: usize) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(corners.len() * per_side);
    for (side, &start) in corners.iter().enumerate() {
        let end = corners[(side + 1) % corners.len()];
        for i in 0..per_side {
            points.push(start.lerp(end, i as f32 / per_side as f32));
        }
    }
    points
}
