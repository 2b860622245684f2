//! Colors handed to render and particle collaborators

use serde::{Deserialize, Serialize};

/// RGBA color (8 bits per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Linear blend, `t` clamped to [0, 1]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Level colors, cycled by level number
pub const LEVEL_COLORS: [Color; 16] = [
    Color::rgb(0, 128, 255),
    Color::rgb(255, 0, 0),
    Color::rgb(255, 255, 0),
    Color::rgb(0, 255, 255),
    Color::rgb(0, 255, 0),
    Color::rgb(255, 0, 255),
    Color::rgb(255, 128, 0),
    Color::rgb(128, 255, 128),
    Color::rgb(255, 128, 128),
    Color::rgb(128, 128, 255),
    Color::rgb(255, 255, 128),
    Color::rgb(128, 255, 255),
    Color::rgb(255, 128, 255),
    Color::rgb(255, 192, 128),
    Color::rgb(192, 255, 192),
    Color::rgb(192, 192, 255),
];

pub const PLAYER: Color = Color::rgb(255, 255, 0);
pub const PLAYER_SHOT: Color = Color::rgb(255, 255, 255);
pub const ENEMY_SHOT: Color = Color::rgb(255, 0, 0);
pub const FLIPPER: Color = Color::rgb(255, 0, 0);
pub const TANKER: Color = Color::rgb(0, 255, 0);
pub const SPIKER: Color = Color::rgb(0, 255, 255);
pub const SPIKE: Color = Color::rgb(0, 128, 128);
pub const FUSEBALL: Color = Color::rgb(255, 0, 255);
pub const PULSAR: Color = Color::rgb(255, 128, 0);
pub const PULSAR_ACTIVE: Color = Color::rgb(255, 255, 0);
pub const SUPER_ZAPPER: Color = Color::rgb(255, 255, 255);

pub fn level_color(level: u32) -> Color {
    LEVEL_COLORS[level as usize % LEVEL_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_colors_cycle() {
        assert_eq!(level_color(0), level_color(16));
        assert_ne!(level_color(0), level_color(1));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::rgb(0, 0, 0);
        let b = Color::rgb(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 5.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgb(100, 50, 25));
    }
}
