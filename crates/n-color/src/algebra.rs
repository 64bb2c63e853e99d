// SPDX-License-Identifier: MIT
//
// Color algebra — mixing, lightening and darkening.
//
// These are the only operations that clamp. Mixing interpolates in RGB
// and truncates toward negative infinity; lighten/darken move HSV value
// and keep it inside 0–100.
//
// Inputs are anything that names a color (`IntoColorInit`): a `&Color`,
// a channel record or a notation string. `lighten`/`darken` need a color
// to mutate; `lightened`/`darkened` build a new one from any source.

use crate::error::Result;
use crate::record::Rgb;
use crate::value::{Color, IntoColorInit};

/// Weight used when a mix is given none.
pub const DEFAULT_MIX_WEIGHT: f64 = 50.0;

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f64::clamp` this never panics: `min > max` returns `min` for
/// anything at or below it, and NaN passes through.
#[inline]
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value <= min {
        min
    } else if value >= max {
        max
    } else {
        value
    }
}

/// Linear interpolation of two RGB records, floored per channel.
///
/// `weight` runs 0–100 (0 = all `a`, 100 = all `b`); `None` or NaN means
/// [`DEFAULT_MIX_WEIGHT`]. Alpha is not mixed.
///
/// ```
/// use n_color::{Rgb, mix_rgb};
///
/// let black = Rgb::new(0.0, 0.0, 0.0);
/// let white = Rgb::new(255.0, 255.0, 255.0);
/// assert_eq!(mix_rgb(&black, &white, None), Rgb::new(127.0, 127.0, 127.0));
/// ```
#[must_use]
pub fn mix_rgb(a: &Rgb, b: &Rgb, weight: Option<f64>) -> Rgb {
    let weight = weight.filter(|w| !w.is_nan()).unwrap_or(DEFAULT_MIX_WEIGHT);
    let t = clamp(weight / 100.0, 0.0, 1.0);
    let lerp = |x: f64, y: f64| (x + (y - x) * t).floor();
    Rgb::new(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b))
}

/// Mix two colors into a new one. See [`mix_rgb`] for the weighting.
///
/// The result is stored canonically as HSV, so reading its RGB back can
/// differ from the interpolated record by the usual ±1 rounding.
///
/// ```
/// use n_color::mix;
///
/// let purple = mix("#f00", "#00f", None).unwrap();
/// assert_eq!(purple.rgb_string().unwrap(), "rgb(128, 0, 128)");
/// ```
///
/// # Errors
///
/// [`ColorError::UndefinedChannel`](crate::ColorError::UndefinedChannel)
/// if either color is unset; the parse errors of [`Color::try_new`] for a
/// bad notation string.
pub fn mix(a: impl IntoColorInit, b: impl IntoColorInit, weight: Option<f64>) -> Result<Color> {
    let a = Color::try_new(a)?.rgb()?;
    let b = Color::try_new(b)?.rgb()?;
    Ok(Color::from(mix_rgb(&a, &b, weight)))
}

/// Raise HSV value by `amount`, clamped to 0–100. Mutates `color` in
/// place (listeners fire) and hands it back.
///
/// # Errors
///
/// [`ColorError::UndefinedChannel`](crate::ColorError::UndefinedChannel)
/// if the color is unset.
pub fn lighten(color: &mut Color, amount: f64) -> Result<&mut Color> {
    shift_value(color, amount)
}

/// Lower HSV value by `amount`, clamped to 0–100. Mutates `color` in
/// place (listeners fire) and hands it back.
///
/// # Errors
///
/// [`ColorError::UndefinedChannel`](crate::ColorError::UndefinedChannel)
/// if the color is unset.
pub fn darken(color: &mut Color, amount: f64) -> Result<&mut Color> {
    shift_value(color, -amount)
}

/// A new color: `source` with HSV value raised by `amount`, clamped to
/// 0–100.
///
/// # Errors
///
/// [`ColorError::UndefinedChannel`](crate::ColorError::UndefinedChannel)
/// for an unset source; the parse errors of [`Color::try_new`].
pub fn lightened(source: impl IntoColorInit, amount: f64) -> Result<Color> {
    let mut color = Color::try_new(source)?;
    shift_value(&mut color, amount)?;
    Ok(color)
}

/// A new color: `source` with HSV value lowered by `amount`, clamped to
/// 0–100.
///
/// # Errors
///
/// As for [`lightened`].
pub fn darkened(source: impl IntoColorInit, amount: f64) -> Result<Color> {
    let mut color = Color::try_new(source)?;
    shift_value(&mut color, -amount)?;
    Ok(color)
}

fn shift_value(color: &mut Color, delta: f64) -> Result<&mut Color> {
    let mut hsv = color.hsv()?;
    hsv.v = clamp(hsv.v + delta, 0.0, 100.0);
    color.set_hsv(hsv);
    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColorError;
    use crate::record::Hsv;
    use pretty_assertions::assert_eq;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(-1.0, 0.0, 100.0), 0.0);
        assert_eq!(clamp(0.0, 0.0, 100.0), 0.0);
        assert_eq!(clamp(42.0, 0.0, 100.0), 42.0);
        assert_eq!(clamp(100.0, 0.0, 100.0), 100.0);
        assert_eq!(clamp(115.0, 0.0, 100.0), 100.0);
    }

    // ── Mixing ───────────────────────────────────────────────────────────

    #[test]
    fn mix_endpoints_are_exact() {
        let a = Rgb::new(10.0, 200.0, 33.0);
        let b = Rgb::new(250.0, 3.0, 90.0);
        assert_eq!(mix_rgb(&a, &b, Some(0.0)), a);
        assert_eq!(mix_rgb(&a, &b, Some(100.0)), b);
    }

    #[test]
    fn mix_black_white_floors() {
        let black = Rgb::new(0.0, 0.0, 0.0);
        let white = Rgb::new(255.0, 255.0, 255.0);
        assert_eq!(mix_rgb(&black, &white, Some(50.0)), Rgb::new(127.0, 127.0, 127.0));
        assert_eq!(mix_rgb(&black, &white, None), Rgb::new(127.0, 127.0, 127.0));
        assert_eq!(mix_rgb(&black, &white, Some(f64::NAN)), Rgb::new(127.0, 127.0, 127.0));
    }

    #[test]
    fn mix_floors_downward_when_falling() {
        // 255 → 0 at 50%: 255 - 127.5 = 127.5 → 127.
        let white = Rgb::new(255.0, 255.0, 255.0);
        let black = Rgb::new(0.0, 0.0, 0.0);
        assert_eq!(mix_rgb(&white, &black, Some(50.0)), Rgb::new(127.0, 127.0, 127.0));
        // 10 → 0 at 25%: 7.5 → 7.
        let dim = Rgb::new(10.0, 10.0, 10.0);
        assert_eq!(mix_rgb(&dim, &black, Some(25.0)).r, 7.0);
    }

    #[test]
    fn mix_weight_is_clamped() {
        let a = Rgb::new(0.0, 0.0, 0.0);
        let b = Rgb::new(100.0, 100.0, 100.0);
        assert_eq!(mix_rgb(&a, &b, Some(250.0)), b);
        assert_eq!(mix_rgb(&a, &b, Some(-30.0)), a);
    }

    #[test]
    fn mix_colors() {
        let red = Color::from(Rgb::new(255.0, 0.0, 0.0));
        let blue = Color::from(Rgb::new(0.0, 0.0, 255.0));
        assert_eq!(mix(&red, &blue, Some(0.0)).unwrap().rgb().unwrap(), red.rgb().unwrap());
        assert_eq!(mix(&red, &blue, Some(100.0)).unwrap().rgb().unwrap(), blue.rgb().unwrap());
        // (127, 0, 127) is stored as hsv(300, 100, 50) and reads back as 128.
        assert_eq!(
            mix(&red, &blue, None).unwrap().hsv().unwrap(),
            Hsv::new(300.0, 100.0, 50.0)
        );
        assert_eq!(mix(&Color::new(), &blue, None), Err(ColorError::UndefinedChannel));
    }

    #[test]
    fn mix_any_color_source() {
        assert_eq!(
            mix("#f00", "#00f", None).unwrap().hsv().unwrap(),
            Hsv::new(300.0, 100.0, 50.0)
        );
        assert_eq!(
            mix(Rgb::new(0.0, 0.0, 0.0), "hsl(0, 0%, 100%)", Some(100.0))
                .unwrap()
                .hex_string()
                .unwrap(),
            "#FFF"
        );
        assert!(matches!(
            mix("red", "#00f", None),
            Err(ColorError::UnrecognizedShape { .. })
        ));
        assert!(matches!(
            mix("#f00", "rgb(0, 0", None),
            Err(ColorError::MalformedNotation { .. })
        ));
    }

    // ── Lighten / darken ─────────────────────────────────────────────────

    #[test]
    fn lighten_clamps_at_full_value() {
        let mut color = Color::from(Hsv::new(0.0, 0.0, 95.0));
        let v = lighten(&mut color, 20.0).unwrap().hsv().unwrap().v;
        assert_eq!(v, 100.0);
    }

    #[test]
    fn darken_clamps_at_zero() {
        let mut color = Color::from(Hsv::new(10.0, 40.0, 15.0));
        darken(&mut color, 20.0).unwrap();
        assert_eq!(color.hsv().unwrap(), Hsv::new(10.0, 40.0, 0.0));
    }

    #[test]
    fn lighten_and_darken_move_value_only() {
        let mut color = Color::from(Hsv::new(200.0, 60.0, 50.0));
        lighten(&mut color, 10.0).unwrap();
        assert_eq!(color.hsv().unwrap(), Hsv::new(200.0, 60.0, 60.0));
        darken(&mut color, 25.0).unwrap();
        assert_eq!(color.hsv().unwrap(), Hsv::new(200.0, 60.0, 35.0));
    }

    #[test]
    fn unset_color_cannot_be_lightened() {
        let mut color = Color::new();
        assert!(matches!(lighten(&mut color, 5.0), Err(ColorError::UndefinedChannel)));
        assert!(!color.is_set());
    }

    #[test]
    fn lightened_and_darkened_build_new_colors() {
        assert_eq!(
            lightened("#000", 20.0).unwrap().hsv().unwrap(),
            Hsv::new(0.0, 0.0, 20.0)
        );
        assert_eq!(
            darkened("rgb(255, 0, 0)", 50.0).unwrap().hsv().unwrap(),
            Hsv::new(0.0, 100.0, 50.0)
        );
        assert_eq!(
            lightened(Hsv::new(90.0, 10.0, 95.0), 20.0).unwrap().hsv().unwrap(),
            Hsv::new(90.0, 10.0, 100.0)
        );

        // A borrowed color is copied, not mutated.
        let source = Color::from(Hsv::new(0.0, 0.0, 40.0));
        let darker = darkened(&source, 10.0).unwrap();
        assert_eq!(darker.hsv().unwrap().v, 30.0);
        assert_eq!(source.hsv().unwrap().v, 40.0);

        assert_eq!(
            lightened(&Color::new(), 5.0),
            Err(ColorError::UndefinedChannel)
        );
        assert!(matches!(
            darkened("navy", 5.0),
            Err(ColorError::UnrecognizedShape { .. })
        ));
    }
}
