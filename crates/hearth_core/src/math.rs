//! Small math types shared by level geometry and parameters.
//!
//! These are the canonical representations written into asset payloads.

use bytemuck::{Pod, Zeroable};

/// 2D vector - sector points and planar offsets.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// 2D cross product (z component of the 3D cross product).
    #[must_use]
    pub fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Linear RGBA color with float channels.
///
/// Stored on the wire as four consecutive `f32` values.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Creates a color from all four channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque white
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Opaque black
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    #[must_use]
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#').unwrap_or(text);
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return None;
        }

        let channel = |i: usize| -> Option<f32> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .ok()
                .map(|v| f32::from(v) / 255.0)
        };

        let a = if hex.len() == 8 { channel(6)? } else { 1.0 };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
