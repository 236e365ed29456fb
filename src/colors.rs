//! Packed-color value type.
//!
//! Colors are stored as `0x00RRGGBB` in a `u32`, the same layout the pixel
//! buffer uses, so a [`Color`] converts to a buffer word for free.

/// A packed 24-bit RGB color (`0x00RRGGBB`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct Color(u32);

pub const BLACK: Color = Color(0x000000);
pub const WHITE: Color = Color(0xFFFFFF);
pub const GRAY: Color = Color(0x333333);
pub const RED: Color = Color(0xFF0000);
pub const GREEN: Color = Color(0x00FF00);
pub const BLUE: Color = Color(0x0000FF);
pub const CYAN: Color = Color(0x00FFFF);
pub const BACKGROUND: Color = BLACK;

impl Color {
    pub const fn from_packed(packed: u32) -> Self {
        Self(packed & 0x00FF_FFFF)
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn packed(self) -> u32 {
        self.0
    }

    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Scales each channel by `factor`, clamped to [0, 1]. Shading and
    /// distance fog both funnel through this.
    pub fn darken(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        Self::from_rgb(
            (self.r() as f32 * factor) as u8,
            (self.g() as f32 * factor) as u8,
            (self.b() as f32 * factor) as u8,
        )
    }

    /// Linear interpolation per channel, `t` clamped to [0, 1].
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Self::from_rgb(
            mix(self.r(), other.r()),
            mix(self.g(), other.g()),
            mix(self.b(), other.b()),
        )
    }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Self {
        Self::from_packed(packed)
    }
}
