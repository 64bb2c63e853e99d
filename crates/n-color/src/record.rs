// SPDX-License-Identifier: MIT
//
// Channel records — the plain data shapes every other module trades in.
//
// A record is a fixed set of named f64 channels. Nothing here clamps:
// a hue of 400 or a red of -3 is stored as given and flows through the
// conversion kernel untouched. Only the algebra operations (lighten,
// darken, mix) clamp, and they do it explicitly.
//
//   Hsv { h: 0..360, s: 0..100, v: 0..100 }           ← canonical
//   Rgb { r: 0..255, g: 0..255, b: 0..255, a?: 0..1 }
//   Hsl { h: 0..360, s: 0..100, l: 0..100, a?: 0..1 }

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ColorError, Result};

// ─── Names ───────────────────────────────────────────────────────────────────

/// One of the three color models a record can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Model {
    /// Hue / saturation / value. The canonical storage model.
    #[default]
    Hsv,
    /// Red / green / blue bytes.
    Rgb,
    /// Hue / saturation / lightness.
    Hsl,
}

impl Model {
    /// The channels a record of this model carries, in notation order.
    ///
    /// Alpha is listed for the models that can carry it; whether a given
    /// record actually has it is up to the record.
    #[must_use]
    pub const fn channels(self) -> &'static [Channel] {
        match self {
            Self::Hsv => &[Channel::H, Channel::S, Channel::V],
            Self::Rgb => &[Channel::R, Channel::G, Channel::B, Channel::A],
            Self::Hsl => &[Channel::H, Channel::S, Channel::L, Channel::A],
        }
    }

    /// Lowercase model name, as used in notations (`"hsv"`, `"rgb"`, `"hsl"`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hsv => "hsv",
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Model {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hsv" => Ok(Self::Hsv),
            "rgb" => Ok(Self::Rgb),
            "hsl" => Ok(Self::Hsl),
            _ => Err(ColorError::UnknownModel { name: s.to_owned() }),
        }
    }
}

/// A single named channel.
///
/// `H` and `S` are shared between HSV and HSL; the model decides what
/// they mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Channel {
    /// Hue, degrees.
    H,
    /// Saturation, percent.
    S,
    /// Value, percent.
    V,
    /// Lightness, percent.
    L,
    /// Red, 0–255.
    R,
    /// Green, 0–255.
    G,
    /// Blue, 0–255.
    B,
    /// Alpha, 0–1.
    A,
}

impl Channel {
    /// Single-letter channel name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::H => "h",
            Self::S => "s",
            Self::V => "v",
            Self::L => "l",
            Self::R => "r",
            Self::G => "g",
            Self::B => "b",
            Self::A => "a",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "h" => Self::H,
            "s" => Self::S,
            "v" => Self::V,
            "l" => Self::L,
            "r" => Self::R,
            "g" => Self::G,
            "b" => Self::B,
            "a" => Self::A,
            _ => return Err(ColorError::UnknownChannelName { name: s.to_owned() }),
        })
    }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// Uniform by-name access to a record's channels.
///
/// This is what lets change detection and `set_channel` work on any of
/// the three shapes without a match per call site.
pub trait ChannelRecord {
    /// The model this record expresses.
    const MODEL: Model;

    /// Read a channel. `None` when the record does not carry it (alpha
    /// left unset, or a channel from another model).
    fn get(&self, channel: Channel) -> Option<f64>;

    /// Overwrite a channel.
    ///
    /// # Errors
    ///
    /// [`ColorError::UnknownChannel`] if the channel is not part of
    /// this model.
    fn set(&mut self, channel: Channel, value: f64) -> Result<()>;
}

const fn unknown(model: Model, channel: Channel) -> ColorError {
    ColorError::UnknownChannel { model, channel }
}

/// Hue (degrees), saturation and value (percent).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hsv {
    /// Hue, nominally `[0, 360)`.
    pub h: f64,
    /// Saturation, nominally `[0, 100]`.
    pub s: f64,
    /// Value, nominally `[0, 100]`.
    pub v: f64,
}

impl Hsv {
    /// Build an HSV record.
    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

impl ChannelRecord for Hsv {
    const MODEL: Model = Model::Hsv;

    fn get(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::H => Some(self.h),
            Channel::S => Some(self.s),
            Channel::V => Some(self.v),
            _ => None,
        }
    }

    fn set(&mut self, channel: Channel, value: f64) -> Result<()> {
        match channel {
            Channel::H => self.h = value,
            Channel::S => self.s = value,
            Channel::V => self.v = value,
            other => return Err(unknown(Self::MODEL, other)),
        }
        Ok(())
    }
}

/// Red, green and blue bytes plus optional alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    /// Red, nominally `[0, 255]`.
    pub r: f64,
    /// Green, nominally `[0, 255]`.
    pub g: f64,
    /// Blue, nominally `[0, 255]`.
    pub b: f64,
    /// Alpha, nominally `[0, 1]`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub a: Option<f64>,
}

impl Rgb {
    /// Build an opaque RGB record (no alpha channel).
    #[inline]
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }

    /// Build an RGB record carrying alpha.
    #[inline]
    #[must_use]
    pub const fn with_alpha(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a: Some(a) }
    }
}

impl ChannelRecord for Rgb {
    const MODEL: Model = Model::Rgb;

    fn get(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::R => Some(self.r),
            Channel::G => Some(self.g),
            Channel::B => Some(self.b),
            Channel::A => self.a,
            _ => None,
        }
    }

    fn set(&mut self, channel: Channel, value: f64) -> Result<()> {
        match channel {
            Channel::R => self.r = value,
            Channel::G => self.g = value,
            Channel::B => self.b = value,
            Channel::A => self.a = Some(value),
            other => return Err(unknown(Self::MODEL, other)),
        }
        Ok(())
    }
}

/// Hue (degrees), saturation and lightness (percent) plus optional alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hsl {
    /// Hue, nominally `[0, 360)`.
    pub h: f64,
    /// Saturation, nominally `[0, 100]`.
    pub s: f64,
    /// Lightness, nominally `[0, 100]`.
    pub l: f64,
    /// Alpha, nominally `[0, 1]`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub a: Option<f64>,
}

impl Hsl {
    /// Build an opaque HSL record (no alpha channel).
    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l, a: None }
    }

    /// Build an HSL record carrying alpha.
    #[inline]
    #[must_use]
    pub const fn with_alpha(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a: Some(a) }
    }
}

impl ChannelRecord for Hsl {
    const MODEL: Model = Model::Hsl;

    fn get(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::H => Some(self.h),
            Channel::S => Some(self.s),
            Channel::L => Some(self.l),
            Channel::A => self.a,
            _ => None,
        }
    }

    fn set(&mut self, channel: Channel, value: f64) -> Result<()> {
        match channel {
            Channel::H => self.h = value,
            Channel::S => self.s = value,
            Channel::L => self.l = value,
            Channel::A => self.a = Some(value),
            other => return Err(unknown(Self::MODEL, other)),
        }
        Ok(())
    }
}

// ─── Partial HSV ─────────────────────────────────────────────────────────────

/// A partial HSV update. Missing channels are back-filled from the
/// color's current value when applied with
/// [`Color::update_hsv`](crate::Color::update_hsv).
///
/// ```
/// use n_color::{Color, Hsv, HsvPatch};
///
/// let mut color = Color::from(Hsv::new(10.0, 50.0, 50.0));
/// color.update_hsv(HsvPatch::default().h(200.0)).unwrap();
/// assert_eq!(color.hsv().unwrap(), Hsv::new(200.0, 50.0, 50.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HsvPatch {
    /// New hue, if any.
    pub h: Option<f64>,
    /// New saturation, if any.
    pub s: Option<f64>,
    /// New value, if any.
    pub v: Option<f64>,
}

impl HsvPatch {
    /// Set the hue.
    #[must_use]
    pub const fn h(mut self, h: f64) -> Self {
        self.h = Some(h);
        self
    }

    /// Set the saturation.
    #[must_use]
    pub const fn s(mut self, s: f64) -> Self {
        self.s = Some(s);
        self
    }

    /// Set the value.
    #[must_use]
    pub const fn v(mut self, v: f64) -> Self {
        self.v = Some(v);
        self
    }

    /// Fill the gaps from `base`.
    #[must_use]
    pub fn over(self, base: Hsv) -> Hsv {
        Hsv {
            h: self.h.unwrap_or(base.h),
            s: self.s.unwrap_or(base.s),
            v: self.v.unwrap_or(base.v),
        }
    }

    /// The patch as a full record, if every channel is present.
    #[must_use]
    pub fn complete(self) -> Option<Hsv> {
        Some(Hsv::new(self.h?, self.s?, self.v?))
    }
}

impl From<Hsv> for HsvPatch {
    fn from(hsv: Hsv) -> Self {
        Self {
            h: Some(hsv.h),
            s: Some(hsv.s),
            v: Some(hsv.v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn names_parse_back() {
        for model in [Model::Hsv, Model::Rgb, Model::Hsl] {
            assert_eq!(model.name().parse::<Model>().unwrap(), model);
        }
        for &channel in Model::Rgb.channels().iter().chain(Model::Hsl.channels()) {
            assert_eq!(channel.to_string().parse::<Channel>().unwrap(), channel);
        }
        assert!(matches!(
            "cmyk".parse::<Model>(),
            Err(ColorError::UnknownModel { .. })
        ));
        assert!(matches!(
            "x".parse::<Channel>(),
            Err(ColorError::UnknownChannelName { .. })
        ));
    }

    #[test]
    fn set_rejects_foreign_channel() {
        let mut rgb = Rgb::new(1.0, 2.0, 3.0);
        assert_eq!(
            rgb.set(Channel::L, 4.0),
            Err(ColorError::UnknownChannel {
                model: Model::Rgb,
                channel: Channel::L
            })
        );
        let mut hsv = Hsv::default();
        assert!(hsv.set(Channel::A, 0.5).is_err());
    }

    #[test]
    fn alpha_is_optional() {
        let mut hsl = Hsl::new(10.0, 20.0, 30.0);
        assert_eq!(hsl.get(Channel::A), None);
        hsl.set(Channel::A, 0.25).unwrap();
        assert_eq!(hsl, Hsl::with_alpha(10.0, 20.0, 30.0, 0.25));
    }

    #[test]
    fn out_of_range_values_are_kept() {
        let mut hsv = Hsv::new(400.0, -5.0, 120.0);
        hsv.set(Channel::V, 250.0).unwrap();
        assert_eq!(hsv, Hsv::new(400.0, -5.0, 250.0));
    }

    #[test]
    fn patch_backfills() {
        let base = Hsv::new(1.0, 2.0, 3.0);
        assert_eq!(HsvPatch::default().s(9.0).over(base), Hsv::new(1.0, 9.0, 3.0));
        assert_eq!(HsvPatch::default().h(1.0).complete(), None);
        assert_eq!(HsvPatch::from(base).complete(), Some(base));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_shapes() {
        let json = serde_json::to_string(&Rgb::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(json, r#"{"r":1.0,"g":2.0,"b":3.0}"#);

        let hsl: Hsl = serde_json::from_str(r#"{"h":1,"s":2,"l":3,"a":0.5}"#).unwrap();
        assert_eq!(hsl, Hsl::with_alpha(1.0, 2.0, 3.0, 0.5));

        assert_eq!(serde_json::to_string(&Model::Hsl).unwrap(), r#""hsl""#);
        assert_eq!(serde_json::from_str::<Channel>(r#""v""#).unwrap(), Channel::V);
    }
}
