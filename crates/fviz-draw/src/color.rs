#![forbid(unsafe_code)]

//! Packed RGBA color with HSV derivation and per-channel interpolation.

use fviz_core::geometry::lerp;

/// A compact RGBA color.
///
/// - **Size:** 4 bytes.
/// - **Layout:** `0xRRGGBBAA` (R in bits 31..24, A in bits 7..0).
///
/// Storage is straight alpha (RGB channels are not pre-multiplied);
/// compositing is the renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Convert HSV to an opaque color.
    ///
    /// `h` is in degrees and wraps into `[0, 360)`; `s` and `v` are in
    /// `[0.0, 1.0]`. Zero saturation yields the gray `v` on every channel.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        if s <= 0.0 {
            let gray = channel(v);
            return Self::rgb(gray, gray, gray);
        }

        let h = h.rem_euclid(360.0) / 60.0;
        let sector = h.floor();
        let f = h - sector;

        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Self::rgb(channel(r), channel(g), channel(b))
    }

    /// Per-channel linear interpolation toward `to`, alpha included.
    #[inline]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self::rgba(
            lerp_channel(self.r(), to.r(), t),
            lerp_channel(self.g(), to.g(), t),
            lerp_channel(self.b(), to.b(), t),
            lerp_channel(self.a(), to.a(), t),
        )
    }

    /// Apply uniform opacity in `[0.0, 1.0]` by scaling alpha.
    #[inline]
    pub fn with_opacity(self, opacity: f64) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        let a = ((self.a() as f64) * opacity).round().clamp(0.0, 255.0) as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }
}

#[inline]
fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    lerp(f64::from(from), f64::from(to), t).round().clamp(0.0, 255.0) as u8
}

// ---------------------------------------------------------------------------
