// SPDX-License-Identifier: MIT
//
// String codec — CSS-style color notations to and from channel records.
//
// Grammar accepted by the functional parser (case-insensitive name):
//
//   name( n1[%] , n2[%] , n3[%] [, alpha] )
//
// Separators are commas and/or whitespace. A `%` suffix scales the value
// against the per-channel maximum (255 for rgb, 360/100/100 for hsl).
// Hex accepts `#RGB` and `#RRGGBB`, with or without the `#`.
//
// Formatting writes exactly:
//
//   rgb(R, G, B)     rgba(R, G, B, A)
//   hsl(H, S%, L%)   hsla(H, S%, L%, A)
//   #RGB when every channel is a multiple of 17, else #RRGGBB

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ColorError, Result};
use crate::record::{Hsl, Rgb};

/// Per-channel maxima for `rgb()` percentages.
pub const RGB_MAXIMA: [f64; 3] = [255.0, 255.0, 255.0];

/// Per-channel maxima for `hsl()` percentages.
pub const HSL_MAXIMA: [f64; 3] = [360.0, 100.0, 100.0];

static FUNCTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^\s*
        ([a-z]+) \( \s*
        (\d+(?:\.\d+)?)(%?) (?:\s*,\s*|\s+)
        (\d+(?:\.\d+)?)(%?) (?:\s*,\s*|\s+)
        (\d+(?:\.\d+)?)(%?)
        (?: (?:\s*,\s*|\s+) (\d*\.?\d+) )?
        \s* \) \s*$",
    )
    .expect("valid regex")
});

/// A functional notation split into its parts, percentages resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Notation {
    /// Function name as written (`rgb`, `RGBA`, `hsl`, …).
    pub name: String,
    /// The three positional channels in absolute units.
    pub values: [f64; 3],
    /// Trailing alpha, if one was given.
    pub alpha: Option<f64>,
}

/// Parse `name(n1, n2, n3[, alpha])` against the given channel maxima.
///
/// The name is not checked here; [`parse_rgb_string`] and
/// [`parse_hsl_string`] do that.
///
/// # Errors
///
/// [`ColorError::MalformedNotation`] if the string does not fit the grammar.
pub fn parse_notation(input: &str, maxima: [f64; 3]) -> Result<Notation> {
    capture(input, maxima, "functional")
}

fn capture(input: &str, maxima: [f64; 3], expected: &'static str) -> Result<Notation> {
    let malformed = || ColorError::malformed(input, expected);
    let caps = FUNCTIONAL.captures(input).ok_or_else(malformed)?;

    let mut values = [0.0; 3];
    for (i, value) in values.iter_mut().enumerate() {
        let n: f64 = caps[2 + i * 2].parse().map_err(|_| malformed())?;
        *value = if &caps[3 + i * 2] == "%" {
            n / 100.0 * maxima[i]
        } else {
            n
        };
    }

    let alpha = match caps.get(8) {
        Some(m) => Some(m.as_str().parse().map_err(|_| malformed())?),
        None => None,
    };

    Ok(Notation {
        name: caps[1].to_owned(),
        values,
        alpha,
    })
}

fn parse_named(input: &str, maxima: [f64; 3], expected: &'static str) -> Result<Notation> {
    let notation = capture(input, maxima, expected)?;
    let name = notation.name.to_ascii_lowercase();
    let base = name.strip_suffix('a').unwrap_or(&name);
    if base != expected {
        return Err(ColorError::malformed(input, expected));
    }
    Ok(notation)
}

/// Parse `rgb(...)` / `rgba(...)`.
///
/// ```
/// use n_color::{Rgb, parse_rgb_string};
///
/// assert_eq!(parse_rgb_string("rgb(255, 0, 0)").unwrap(), Rgb::new(255.0, 0.0, 0.0));
/// assert_eq!(parse_rgb_string("rgb(100%, 0%, 0%)").unwrap(), Rgb::new(255.0, 0.0, 0.0));
/// ```
///
/// # Errors
///
/// [`ColorError::MalformedNotation`] if the grammar does not match or the
/// function is not `rgb`/`rgba`.
pub fn parse_rgb_string(input: &str) -> Result<Rgb> {
    let Notation { values: [r, g, b], alpha, .. } = parse_named(input, RGB_MAXIMA, "rgb")?;
    Ok(Rgb { r, g, b, a: alpha })
}

/// Parse `hsl(...)` / `hsla(...)`.
///
/// # Errors
///
/// [`ColorError::MalformedNotation`] if the grammar does not match or the
/// function is not `hsl`/`hsla`.
pub fn parse_hsl_string(input: &str) -> Result<Hsl> {
    let Notation { values: [h, s, l], alpha, .. } = parse_named(input, HSL_MAXIMA, "hsl")?;
    Ok(Hsl { h, s, l, a: alpha })
}

/// Parse `#RGB` or `#RRGGBB` (leading `#` optional, digits case-insensitive).
///
/// Shorthand digits are 4-bit channels scaled by 17, so `#0f0` is
/// `rgb(0, 255, 0)`.
///
/// # Errors
///
/// [`ColorError::MalformedNotation`] on any length other than 3 or 6 or
/// on a non-hex digit.
pub fn parse_hex_string(input: &str) -> Result<Rgb> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    let (bits, mask, scale) = match hex.len() {
        3 => (4, 0xF, 17),
        6 => (8, 0xFF, 1),
        _ => return Err(ColorError::malformed(input, "hex")),
    };
    if !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::malformed(input, "hex"));
    }
    let packed = u32::from_str_radix(hex, 16).map_err(|_| ColorError::malformed(input, "hex"))?;

    let channel = |shift: u32| f64::from(((packed >> shift) & mask) * scale);
    Ok(Rgb::new(channel(bits * 2), channel(bits), channel(0)))
}

/// Channel values print like integers when they are whole (`255`, not
/// `255.0`); negative zero prints as `0`.
#[inline]
#[allow(clippy::float_cmp)]
fn num(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x }
}

/// Format as `rgb(r, g, b)`, or `rgba(r, g, b, a)` when alpha is present.
#[must_use]
pub fn format_rgb_string(rgb: &Rgb) -> String {
    let (r, g, b) = (num(rgb.r), num(rgb.g), num(rgb.b));
    match rgb.a {
        Some(a) => format!("rgba({r}, {g}, {b}, {})", num(a)),
        None => format!("rgb({r}, {g}, {b})"),
    }
}

/// Format as `hsl(h, s%, l%)`, or `hsla(h, s%, l%, a)` when alpha is present.
#[must_use]
pub fn format_hsl_string(hsl: &Hsl) -> String {
    let (h, s, l) = (num(hsl.h), num(hsl.s), num(hsl.l));
    match hsl.a {
        Some(a) => format!("hsla({h}, {s}%, {l}%, {})", num(a)),
        None => format!("hsl({h}, {s}%, {l}%)"),
    }
}

/// Format as `#RGB` when every channel is a multiple of 17, else `#RRGGBB`.
///
/// Hex cannot express fractions or values outside a byte, so channels
/// are rounded and clamped here (and only here). Alpha is ignored.
///
/// ```
/// use n_color::{Rgb, format_hex_string};
///
/// assert_eq!(format_hex_string(&Rgb::new(255.0, 0.0, 0.0)), "#F00");
/// assert_eq!(format_hex_string(&Rgb::new(18.0, 52.0, 86.0)), "#123456");
/// ```
#[must_use]
pub fn format_hex_string(rgb: &Rgb) -> String {
    let (r, g, b) = (to_byte(rgb.r), to_byte(rgb.g), to_byte(rgb.b));
    if r % 17 == 0 && g % 17 == 0 && b % 17 == 0 {
        format!("#{:X}{:X}{:X}", r / 17, g / 17, b / 17)
    } else {
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_byte(v: f64) -> u8 {
    // Clamp guarantees 0.0 <= value <= 255.0 before truncation (NaN → 0).
    crate::convert::round(v).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Functional parsing ───────────────────────────────────────────────

    #[test]
    fn parses_rgb() {
        assert_eq!(parse_rgb_string("rgb(255, 0, 0)").unwrap(), Rgb::new(255.0, 0.0, 0.0));
        assert_eq!(parse_rgb_string("rgb(1,2,3)").unwrap(), Rgb::new(1.0, 2.0, 3.0));
        assert_eq!(parse_rgb_string("RGB( 4 5 6 )").unwrap(), Rgb::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn parses_rgba() {
        assert_eq!(
            parse_rgb_string("rgba(10, 20, 30, 0.5)").unwrap(),
            Rgb::with_alpha(10.0, 20.0, 30.0, 0.5)
        );
        assert_eq!(
            parse_rgb_string("rgba(10, 20, 30, .25)").unwrap(),
            Rgb::with_alpha(10.0, 20.0, 30.0, 0.25)
        );
        // Zero alpha is still an alpha.
        assert_eq!(parse_rgb_string("rgba(1, 2, 3, 0)").unwrap().a, Some(0.0));
    }

    #[test]
    fn percentages_scale_by_maxima() {
        assert_eq!(
            parse_rgb_string("rgb(100%, 50%, 0%)").unwrap(),
            Rgb::new(255.0, 127.5, 0.0)
        );
        assert_eq!(
            parse_hsl_string("hsl(50%, 50%, 25%)").unwrap(),
            Hsl::new(180.0, 50.0, 25.0)
        );
    }

    #[test]
    fn parses_hsl() {
        assert_eq!(parse_hsl_string("hsl(120, 50%, 50%)").unwrap(), Hsl::new(120.0, 50.0, 50.0));
        assert_eq!(
            parse_hsl_string("hsla(120, 50%, 50%, 0.3)").unwrap(),
            Hsl::with_alpha(120.0, 50.0, 50.0, 0.3)
        );
        assert_eq!(parse_hsl_string("hsl(12.5, 40, 60)").unwrap(), Hsl::new(12.5, 40.0, 60.0));
    }

    #[test]
    fn generic_parser_reports_name() {
        let notation = parse_notation("foo(1, 2%, 3)", [10.0, 10.0, 10.0]).unwrap();
        assert_eq!(notation.name, "foo");
        assert_eq!(notation.values, [1.0, 0.2, 3.0]);
        assert_eq!(notation.alpha, None);
    }

    #[test]
    fn malformed_strings_are_errors() {
        for bad in [
            "",
            "rgb",
            "rgb()",
            "rgb(1, 2)",
            "rgb(1, 2, 3",
            "rgb(a, b, c)",
            "rgb(-1, 2, 3)",
            "rgb(1, 2, 3) trailing",
            "rgb(1, 2, 3, 4, 5)",
        ] {
            assert!(
                matches!(parse_rgb_string(bad), Err(ColorError::MalformedNotation { .. })),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn wrong_function_name_is_an_error() {
        assert_eq!(
            parse_rgb_string("hsl(1, 2%, 3%)"),
            Err(ColorError::MalformedNotation {
                input: "hsl(1, 2%, 3%)".to_owned(),
                expected: "rgb"
            })
        );
        assert!(parse_hsl_string("rgb(1, 2, 3)").is_err());
        assert!(parse_hsl_string("hslx(1, 2, 3)").is_err());
    }

    // ── Hex parsing ──────────────────────────────────────────────────────

    #[test]
    fn parses_shorthand_hex() {
        assert_eq!(parse_hex_string("#0f0").unwrap(), Rgb::new(0.0, 255.0, 0.0));
        assert_eq!(parse_hex_string("#ABC").unwrap(), Rgb::new(170.0, 187.0, 204.0));
        assert_eq!(parse_hex_string("fff").unwrap(), Rgb::new(255.0, 255.0, 255.0));
    }

    #[test]
    fn parses_full_hex() {
        assert_eq!(parse_hex_string("#123456").unwrap(), Rgb::new(18.0, 52.0, 86.0));
        assert_eq!(parse_hex_string("#FfA500").unwrap(), Rgb::new(255.0, 165.0, 0.0));
    }

    #[test]
    fn rejects_bad_hex() {
        for bad in ["#", "#12", "#1234", "#12345", "#1234567", "#ggg", "#12345z", "#+12", "##123"] {
            assert!(
                matches!(parse_hex_string(bad), Err(ColorError::MalformedNotation { .. })),
                "{bad:?} should not parse"
            );
        }
    }

    // ── Formatting ───────────────────────────────────────────────────────

    #[test]
    fn formats_rgb() {
        assert_eq!(format_rgb_string(&Rgb::new(255.0, 0.0, 0.0)), "rgb(255, 0, 0)");
        assert_eq!(
            format_rgb_string(&Rgb::with_alpha(1.0, 2.0, 3.0, 0.5)),
            "rgba(1, 2, 3, 0.5)"
        );
        assert_eq!(format_rgb_string(&Rgb::with_alpha(1.0, 2.0, 3.0, 0.0)), "rgba(1, 2, 3, 0)");
        assert_eq!(format_rgb_string(&Rgb::new(127.5, -0.0, 0.0)), "rgb(127.5, 0, 0)");
    }

    #[test]
    fn formats_hsl() {
        assert_eq!(format_hsl_string(&Hsl::new(120.0, 50.0, 50.0)), "hsl(120, 50%, 50%)");
        assert_eq!(
            format_hsl_string(&Hsl::with_alpha(120.0, 50.0, 50.0, 0.3)),
            "hsla(120, 50%, 50%, 0.3)"
        );
    }

    #[test]
    fn formats_hex() {
        assert_eq!(format_hex_string(&Rgb::new(255.0, 0.0, 0.0)), "#F00");
        assert_eq!(format_hex_string(&Rgb::new(0.0, 0.0, 0.0)), "#000");
        assert_eq!(format_hex_string(&Rgb::new(1.0, 2.0, 3.0)), "#010203");
        assert_eq!(format_hex_string(&Rgb::new(255.0, 165.0, 0.0)), "#FFA500");
        // Out of range clamps for hex only.
        assert_eq!(format_hex_string(&Rgb::new(300.0, -4.0, 0.0)), "#F00");
    }

    #[test]
    fn formatted_strings_parse_back() {
        let rgb = Rgb::with_alpha(10.0, 20.0, 30.0, 0.75);
        assert_eq!(parse_rgb_string(&format_rgb_string(&rgb)).unwrap(), rgb);

        let hsl = Hsl::new(300.0, 12.0, 87.0);
        assert_eq!(parse_hsl_string(&format_hsl_string(&hsl)).unwrap(), hsl);
    }

    #[test]
    fn hex_roundtrip() {
        for r in (0..=255).step_by(7).chain([255]) {
            for g in (0..=255).step_by(17) {
                for b in [0, 1, 16, 17, 128, 254, 255] {
                    let rgb = Rgb::new(f64::from(r), f64::from(g), f64::from(b));
                    let hex = format_hex_string(&rgb);
                    let shorthand = r % 17 == 0 && g % 17 == 0 && b % 17 == 0;
                    assert_eq!(hex.len(), if shorthand { 4 } else { 7 }, "{hex}");
                    assert_eq!(parse_hex_string(&hex).unwrap(), rgb);
                }
            }
        }
    }
}
