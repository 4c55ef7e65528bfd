//! Chart Colors
//!
//! sRGB colors with lightness adjustment done in CIE-Lab (D65), so that
//! "darken" and "brighten" move perceived lightness rather than raw channels.

use rand::Rng;
use std::fmt;

/// Lab lightness units per darken/brighten step
const LAB_STEP: f64 = 18.0;

// D65 reference white
const XN: f64 = 0.950470;
const YN: f64 = 1.0;
const ZN: f64 = 1.088830;

const T0: f64 = 4.0 / 29.0;
const T1: f64 = 6.0 / 29.0;
const T2: f64 = 3.0 * T1 * T1;
const T3: f64 = T1 * T1 * T1;

/// An opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uniformly random color over the full sRGB cube
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::rgb(rng.gen(), rng.gen(), rng.gen())
    }

    /// Lowercase `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to CIE-Lab `(l, a, b)`
    pub fn to_lab(&self) -> (f64, f64, f64) {
        let r = srgb_to_linear(self.r);
        let g = srgb_to_linear(self.g);
        let b = srgb_to_linear(self.b);

        let x = xyz_to_lab((0.4124564 * r + 0.3575761 * g + 0.1804375 * b) / XN);
        let y = xyz_to_lab((0.2126729 * r + 0.7151522 * g + 0.0721750 * b) / YN);
        let z = xyz_to_lab((0.0193339 * r + 0.1191920 * g + 0.9503041 * b) / ZN);

        (116.0 * y - 16.0, 500.0 * (x - y), 200.0 * (y - z))
    }

    /// Convert from CIE-Lab, clipping out-of-gamut channels
    pub fn from_lab(l: f64, a: f64, b: f64) -> Self {
        let fy = (l + 16.0) / 116.0;
        let fx = fy + a / 500.0;
        let fz = fy - b / 200.0;

        let x = XN * lab_to_xyz(fx);
        let y = YN * lab_to_xyz(fy);
        let z = ZN * lab_to_xyz(fz);

        Self::rgb(
            linear_to_srgb(3.2404542 * x - 1.5371385 * y - 0.4985314 * z),
            linear_to_srgb(-0.9692660 * x + 1.8760108 * y + 0.0415560 * z),
            linear_to_srgb(0.0556434 * x - 0.2040259 * y + 1.0572252 * z),
        )
    }

    /// Lower Lab lightness by `amount` steps
    pub fn darken(&self, amount: f64) -> Self {
        let (l, a, b) = self.to_lab();
        Self::from_lab(l - LAB_STEP * amount, a, b)
    }

    /// Raise Lab lightness by `amount` steps
    pub fn brighten(&self, amount: f64) -> Self {
        self.darken(-amount)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

fn srgb_to_linear(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> u8 {
    let v = 255.0
        * if c <= 0.00304 {
            12.92 * c
        } else {
            1.055 * c.powf(1.0 / 2.4) - 0.055
        };
    v.round().clamp(0.0, 255.0) as u8
}

fn xyz_to_lab(t: f64) -> f64 {
    if t > T3 {
        t.cbrt()
    } else {
        t / T2 + T0
    }
}

fn lab_to_xyz(t: f64) -> f64 {
    if t > T1 {
        t * t * t
    } else {
        T2 * (t - T0)
    }
}
