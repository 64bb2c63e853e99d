// SPDX-License-Identifier: MIT
//
// Conversion kernel — pure functions between the three channel records.
//
// Single-character variable names (h, s, v, l, r, g, b, p, q, t) are the
// standard notation for these formulas.
#![allow(clippy::many_single_char_names)]
// Sector and hue-branch selection compare against the exact values that
// max/min picked, so float equality is the intended test.
#![allow(clippy::float_cmp)]
// Results must be bit-identical to unfused arithmetic; no mul_add.
#![allow(clippy::suboptimal_flops)]
//
//   HSV ──hsv_to_rgb──▶ RGB        HSV ──hsv_to_hsl──▶ HSL
//   HSV ◀──rgb_to_hsv── RGB        HSV ◀──hsl_to_hsv── HSL
//
// Every output channel is rounded half-up to an integer (hue passes
// through hsv↔hsl untouched). Inputs are never clamped: out-of-range
// channels produce out-of-range or wrapped results. Alpha is not part of
// HSV, so it is dropped going in and absent coming out.

use crate::record::{Hsl, Hsv, Rgb};

/// Round half-up: `2.5 → 3`, `-2.5 → -2`.
///
/// `f64::round` rounds half away from zero, which disagrees on negative
/// halves; every kernel output goes through this instead.
#[inline]
#[must_use]
pub fn round(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// HSV → RGB via the six-sector table.
///
/// Hues outside `[0, 360)` wrap: the sector index is taken modulo 6 with
/// a non-negative remainder, so `-120°` lands in the blue sector.
///
/// ```
/// use n_color::{Hsv, Rgb, hsv_to_rgb};
///
/// assert_eq!(hsv_to_rgb(Hsv::new(120.0, 100.0, 100.0)), Rgb::new(0.0, 255.0, 0.0));
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = hsv.h / 360.0;
    let s = hsv.s / 100.0;
    let v = hsv.v / 100.0;

    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    // rem_euclid keeps the sector in 0..6 (NaN casts to 0 and stays NaN).
    let (r, g, b) = match i.rem_euclid(6.0) as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb::new(round(r * 255.0), round(g * 255.0), round(b * 255.0))
}

/// RGB → HSV.
///
/// When several channels tie for the maximum, the hue comes from the
/// first of red, green, blue that holds it. A hue that rounds up to 360
/// wraps to 0.
#[must_use]
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = rgb.r / 255.0;
    let g = rgb.g / 255.0;
    let b = rgb.b / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if max == min {
        0.0
    } else if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsv {
        h: round(hue / 6.0 * 360.0).rem_euclid(360.0),
        s: round(if max == 0.0 { 0.0 } else { delta / max * 100.0 }),
        v: round(max * 100.0),
    }
}

/// HSV → HSL. Hue is copied as-is.
///
/// The saturation denominator `1 - |2l - 1|` is zero for pure black and
/// pure white; saturation is defined as 0 there instead of NaN.
#[must_use]
pub fn hsv_to_hsl(hsv: Hsv) -> Hsl {
    let s = hsv.s / 100.0;
    let v = hsv.v / 100.0;
    let l = 0.5 * v * (2.0 - s);

    let denominator = 1.0 - (2.0 * l - 1.0).abs();
    let s = if denominator == 0.0 {
        0.0
    } else {
        round(v * s / denominator * 100.0)
    };

    Hsl::new(hsv.h, if s.is_nan() { 0.0 } else { s }, round(l * 100.0))
}

/// HSL → HSV. Hue is copied as-is; alpha is dropped.
///
/// When `l + s` collapses to zero (black) both saturation and value are 0.
#[must_use]
pub fn hsl_to_hsv(hsl: Hsl) -> Hsv {
    let mut s = hsl.s / 100.0;
    let l = hsl.l / 100.0 * 2.0;
    s *= if l <= 1.0 { l } else { 2.0 - l };

    let sum = l + s;
    if sum == 0.0 {
        return Hsv::new(hsl.h, 0.0, 0.0);
    }

    Hsv {
        h: hsl.h,
        s: round(2.0 * s / sum * 100.0),
        v: round(sum / 2.0 * 100.0),
    }
}
