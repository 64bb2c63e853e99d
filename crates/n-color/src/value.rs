// SPDX-License-Identifier: MIT
//
// Color — the mutable color value.
//
// A Color holds exactly one canonical HSV record (or nothing, while
// unset). RGB, HSL and the string notations are recomputed from it on
// every read and never cached; every write, whatever notation it comes
// in, is normalized to HSV and funneled through `set_hsv`. That single
// funnel is where change detection happens:
//
//   set_rgb / set_hsl / set_*_string / set_channel / mix / lighten
//                 │
//                 ▼
//   set_hsv ── no listeners? ──▶ store
//      │
//      └─ listeners ──▶ diff old vs new ──▶ store ──▶ notify if anything changed
//
// Listeners receive `&Color`, so they can read the new value but cannot
// mutate the color that is notifying them.

use std::fmt;
use std::str::FromStr;

use crate::algebra;
use crate::changes::{Changes, compare};
use crate::convert::{hsl_to_hsv, hsv_to_hsl, hsv_to_rgb, rgb_to_hsv};
use crate::error::{ColorError, Result};
use crate::notation::{
    format_hex_string, format_hsl_string, format_rgb_string, parse_hex_string, parse_hsl_string,
    parse_rgb_string,
};
use crate::record::{Channel, ChannelRecord, Hsl, Hsv, HsvPatch, Model, Rgb};

// ─── Initializers ────────────────────────────────────────────────────────────

/// Everything a [`Color`] can be built or set from.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorInit {
    /// Another color's canonical state (`None` if that color was unset).
    Color(Option<Hsv>),
    /// An HSV record.
    Hsv(Hsv),
    /// An RGB record. Alpha is dropped.
    Rgb(Rgb),
    /// An HSL record. Alpha is dropped.
    Hsl(Hsl),
    /// `rgb(...)` / `rgba(...)` notation.
    RgbString(String),
    /// `hsl(...)` / `hsla(...)` notation.
    HslString(String),
    /// `#RGB` / `#RRGGBB` notation.
    HexString(String),
}

impl ColorInit {
    /// Pick the notation by prefix: `rgb`, `hsl`, or `#` followed by a
    /// hex digit. The body is not parsed yet.
    ///
    /// # Errors
    ///
    /// [`ColorError::UnrecognizedShape`] if no prefix matches.
    pub fn sniff(input: &str) -> Result<Self> {
        if input.starts_with("rgb") {
            Ok(Self::RgbString(input.to_owned()))
        } else if input.starts_with("hsl") {
            Ok(Self::HslString(input.to_owned()))
        } else if input
            .strip_prefix('#')
            .and_then(|rest| rest.bytes().next())
            .is_some_and(|c| c.is_ascii_hexdigit())
        {
            Ok(Self::HexString(input.to_owned()))
        } else {
            log::debug!("no color notation matches {input:?}");
            Err(ColorError::UnrecognizedShape {
                input: input.to_owned(),
            })
        }
    }
}

impl From<Hsv> for ColorInit {
    fn from(hsv: Hsv) -> Self {
        Self::Hsv(hsv)
    }
}

impl From<Rgb> for ColorInit {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<Hsl> for ColorInit {
    fn from(hsl: Hsl) -> Self {
        Self::Hsl(hsl)
    }
}

impl From<&Color> for ColorInit {
    fn from(color: &Color) -> Self {
        Self::Color(color.hsv)
    }
}

impl TryFrom<&str> for ColorInit {
    type Error = ColorError;

    fn try_from(input: &str) -> Result<Self> {
        Self::sniff(input)
    }
}

/// Anything that names a color: another [`Color`], a channel record, a
/// [`ColorInit`], or a notation string (sniffed by prefix).
///
/// Every operation that takes "some color" accepts this, so
/// `mix("#f00", &blue, None)` and `color.compare(Rgb::new(..))` both work.
pub trait IntoColorInit {
    /// Resolve to a typed initializer.
    ///
    /// # Errors
    ///
    /// [`ColorError::UnrecognizedShape`] for a string with no known prefix.
    fn into_color_init(self) -> Result<ColorInit>;
}

impl IntoColorInit for ColorInit {
    fn into_color_init(self) -> Result<ColorInit> {
        Ok(self)
    }
}

impl IntoColorInit for Hsv {
    fn into_color_init(self) -> Result<ColorInit> {
        Ok(ColorInit::Hsv(self))
    }
}

impl IntoColorInit for Rgb {
    fn into_color_init(self) -> Result<ColorInit> {
        Ok(ColorInit::Rgb(self))
    }
}

impl IntoColorInit for Hsl {
    fn into_color_init(self) -> Result<ColorInit> {
        Ok(ColorInit::Hsl(self))
    }
}

impl IntoColorInit for &Color {
    fn into_color_init(self) -> Result<ColorInit> {
        Ok(ColorInit::Color(self.hsv))
    }
}

impl IntoColorInit for &str {
    fn into_color_init(self) -> Result<ColorInit> {
        ColorInit::sniff(self)
    }
}

impl IntoColorInit for &String {
    fn into_color_init(self) -> Result<ColorInit> {
        ColorInit::sniff(self)
    }
}

impl IntoColorInit for String {
    fn into_color_init(self) -> Result<ColorInit> {
        ColorInit::sniff(&self)
    }
}

// ─── Listeners ───────────────────────────────────────────────────────────────

/// A change listener. Called with the color (already holding its new
/// value) and the per-channel change record in HSV.
pub type Listener = Box<dyn FnMut(&Color, &Changes)>;

/// Handle returned by [`Color::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

// ─── Color ───────────────────────────────────────────────────────────────────

/// A mutable color stored canonically as HSV.
///
/// ```
/// use n_color::{Color, Hsv};
///
/// let mut color: Color = "rgb(255, 0, 0)".parse().unwrap();
/// assert_eq!(color.hsv().unwrap(), Hsv::new(0.0, 100.0, 100.0));
/// assert_eq!(color.hex_string().unwrap(), "#F00");
///
/// color.set_hsl_string("hsl(120, 100%, 50%)").unwrap();
/// assert_eq!(color.rgb_string().unwrap(), "rgb(0, 255, 0)");
/// ```
///
/// Not synchronized: share across threads only behind an external lock.
pub struct Color {
    hsv: Option<Hsv>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl Color {
    // ─── Construction ────────────────────────────────────────────────────

    /// An unset color. Every read fails with
    /// [`ColorError::UndefinedChannel`] until a value is written.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hsv: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Build a color from anything that names one. Building from an
    /// unset color yields an unset color.
    ///
    /// # Errors
    ///
    /// [`ColorError::UnrecognizedShape`] or
    /// [`ColorError::MalformedNotation`] for a bad notation string.
    pub fn try_new(init: impl IntoColorInit) -> Result<Self> {
        let mut color = Self::new();
        match init.into_color_init()? {
            ColorInit::Color(None) => {}
            init => color.set(init)?,
        }
        Ok(color)
    }

    /// Start a [`ColorBuilder`].
    #[must_use]
    pub fn builder() -> ColorBuilder {
        ColorBuilder::default()
    }

    /// Whether the color holds a value.
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.hsv.is_some()
    }

    // ─── Canonical HSV ───────────────────────────────────────────────────

    /// A copy of the canonical HSV record.
    ///
    /// # Errors
    ///
    /// [`ColorError::UndefinedChannel`] while unset.
    pub fn hsv(&self) -> Result<Hsv> {
        self.hsv.ok_or(ColorError::UndefinedChannel)
    }

    /// Store a new canonical value.
    ///
    /// With no listeners this is a plain store. Otherwise the new value
    /// is diffed against the old one and, if any of h/s/v differs,
    /// every listener is called in registration order. Going from unset
    /// to set counts as every channel changing.
    pub fn set_hsv(&mut self, hsv: Hsv) {
        if self.listeners.is_empty() {
            self.hsv = Some(hsv);
            return;
        }

        let changes = match &self.hsv {
            Some(old) => compare(old, &hsv),
            None => Changes::all(Model::Hsv, Model::Hsv.channels()),
        };
        self.hsv = Some(hsv);

        if changes.any() {
            self.notify(&changes);
        }
    }

    /// Apply a partial HSV update; missing channels keep their current
    /// value.
    ///
    /// # Errors
    ///
    /// [`ColorError::UndefinedChannel`] if the color is unset and the
    /// patch does not name all three channels.
    pub fn update_hsv(&mut self, patch: HsvPatch) -> Result<()> {
        let hsv = match self.hsv {
            Some(current) => patch.over(current),
            None => patch.complete().ok_or(ColorError::UndefinedChannel)?,
        };
        log::trace!("applying {patch:?} as {hsv:?}");
        self.set_hsv(hsv);
        Ok(())
    }

    fn notify(&mut self, changes: &Changes) {
        log::trace!(
            "notifying {} listener(s) of {changes:?}",
            self.listeners.len()
        );
        // Listeners only see `&Color`, so nothing can touch the list
        // while it is out.
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in &mut listeners {
            listener(&*self, changes);
        }
        self.listeners = listeners;
    }

    // ─── Derived views ───────────────────────────────────────────────────

    /// The color as RGB (no alpha).
    ///
    /// # Errors
    ///
    /// [`ColorError::UndefinedChannel`] while unset.
    pub fn rgb(&self) -> Result<Rgb> {
        self.hsv().map(hsv_to_rgb)
    }

    /// Set from RGB. Alpha is dropped.
    pub fn set_rgb(&mut self, rgb: Rgb) {
        self.set_hsv(rgb_to_hsv(rgb));
    }

    /// The color as HSL (no alpha).
    ///
    /// # Errors
    ///
    /// [`ColorError::UndefinedChannel`] while unset.
    pub fn hsl(&self) -> Result<Hsl> {
        self.hsv().map(hsv_to_hsl)
    }

    /// Set from HSL. Alpha is dropped.
    pub fn set_hsl(&mut self, hsl: Hsl) {
        self.set_hsv(hsl_to_hsv(hsl));
    }

    /// `rgb(r, g, b)`.
    ///
    /// # Errors
    ///
    /// [`ColorError::UndefinedChannel`] while unset.
    pub fn rgb_string(&self) -> Result<String> {
        Ok(format_rgb_string(&self.rgb()?))
    }

    /// Set from `rgb(...)` / `rgba(...)`.
    ///
    /// # Errors
    ///
    /// [`ColorError::MalformedNotation`]; the color is left untouched.
    pub fn set_rgb_string(&mut self, input: &str) -> Result<()> {
        let rgb = parse_rgb_string(input)?;
        self.set_rgb(rgb);
        Ok(())
    }

    /// `hsl(h, s%, l%)`.
    ///
    /// # Errors
    ///
    /// [`ColorError::UndefinedChannel`] while unset.
    pub fn hsl_string(&self) -> Result<String> {
        Ok(format_hsl_string(&self.hsl()?))
    }

    /// Set from `hsl(...)` / `hsla(...)`.
    ///
    /// # Errors
    ///
    /// [`ColorError::MalformedNotation`]; the color is left untouched.
    pub fn set_hsl_string(&mut self, input: &str) -> Result<()> {
        let hsl = parse_hsl_string(input)?;
        self.set_hsl(hsl);
        Ok(())
    }

    /// `#RGB` or `#RRGGBB`.
    ///
    /// # Errors
    ///
    /// [`ColorError::UndefinedChannel`] while unset.
    pub fn hex_string(&self) -> Result<String> {
        Ok(format_hex_string(&self.rgb()?))
    }

    /// Set from `#RGB` / `#RRGGBB`.
    ///
    /// # Errors
    ///
    /// [`ColorError::MalformedNotation`]; the color is left untouched.
    pub fn set_hex_string(&mut self, input: &str) -> Result<()> {
        let rgb = parse_hex_string(input)?;
        self.set_rgb(rgb);
        Ok(())
    }

    // ─── Generic setters ─────────────────────────────────────────────────

    /// Set from anything that names a color. On error the current value
    /// is kept.
    ///
    /// # Errors
    ///
    /// [`ColorError::UndefinedChannel`] when the source is an unset color;
    /// [`ColorError::UnrecognizedShape`] or
    /// [`ColorError::MalformedNotation`] for a string that does not parse.
    pub fn set(&mut self, init: impl IntoColorInit) -> Result<()> {
        match init.into_color_init()? {
            ColorInit::Color(None) => return Err(ColorError::UndefinedChannel),
            ColorInit::Color(Some(hsv)) | ColorInit::Hsv(hsv) => self.set_hsv(hsv),
            ColorInit::Rgb(rgb) => self.set_rgb(rgb),
            ColorInit::Hsl(hsl) => self.set_hsl(hsl),
            ColorInit::RgbString(s) => self.set_rgb_string(&s)?,
            ColorInit::HslString(s) => self.set_hsl_string(&s)?,
            ColorInit::HexString(s) => self.set_hex_string(&s)?,
        }
        Ok(())
    }

    /// Read the `model` representation, overwrite one channel, write the
    /// whole representation back. Listeners fire as for a full set.
    ///
    /// ```
    /// use n_color::{Channel, Color, Model, Rgb};
    ///
    /// let mut color = Color::from(Rgb::new(255.0, 0.0, 0.0));
    /// color.set_channel(Model::Rgb, Channel::B, 255.0).unwrap();
    /// assert_eq!(color.rgb().unwrap(), Rgb::new(255.0, 0.0, 255.0));
    /// ```
    ///
    /// # Errors
    ///
    /// [`ColorError::UndefinedChannel`] while unset;
    /// [`ColorError::UnknownChannel`] if `model` has no such channel.
    pub fn set_channel(&mut self, model: Model, channel: Channel, value: f64) -> Result<()> {
        match model {
            Model::Hsv => {
                let hsv = with_channel(self.hsv()?, channel, value)?;
                self.set_hsv(hsv);
            }
            Model::Rgb => {
                let rgb = with_channel(self.rgb()?, channel, value)?;
                self.set_rgb(rgb);
            }
            Model::Hsl => {
                let hsl = with_channel(self.hsl()?, channel, value)?;
                self.set_hsl(hsl);
            }
        }
        Ok(())
    }

    // ─── Listeners ───────────────────────────────────────────────────────

    /// Register a change listener.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Self, &Changes) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ─── Comparison ──────────────────────────────────────────────────────

    /// Which HSV channels differ between `self` and `other`.
    ///
    /// # Errors
    ///
    /// [`ColorError::UndefinedChannel`] if either color is unset; the
    /// parse errors of [`try_new`](Self::try_new) for a bad `other`.
    pub fn compare(&self, other: impl IntoColorInit) -> Result<Changes> {
        self.compare_in(other, Model::Hsv)
    }

    /// Which channels of `model` differ between `self` and `other`.
    ///
    /// # Errors
    ///
    /// As for [`compare`](Self::compare).
    pub fn compare_in(&self, other: impl IntoColorInit, model: Model) -> Result<Changes> {
        let other = Self::try_new(other)?;
        Ok(match model {
            Model::Hsv => compare(&self.hsv()?, &other.hsv()?),
            Model::Rgb => compare(&self.rgb()?, &other.rgb()?),
            Model::Hsl => compare(&self.hsl()?, &other.hsl()?),
        })
    }

    // ─── Algebra ─────────────────────────────────────────────────────────

    /// Mix `other` into this color (`weight` 0–100, default 50).
    ///
    /// # Errors
    ///
    /// [`ColorError::UndefinedChannel`] if either color is unset; the
    /// parse errors of [`try_new`](Self::try_new) for a bad `other`.
    pub fn mix(&mut self, other: impl IntoColorInit, weight: Option<f64>) -> Result<()> {
        let mixed = algebra::mix(&*self, other, weight)?;
        self.set_hsv(mixed.hsv()?);
        Ok(())
    }

    /// Raise HSV value by `amount`, clamped to 100.
    ///
    /// # Errors
    ///
    /// [`ColorError::UndefinedChannel`] while unset.
    pub fn lighten(&mut self, amount: f64) -> Result<()> {
        algebra::lighten(self, amount).map(|_| ())
    }

    /// Lower HSV value by `amount`, clamped to 0.
    ///
    /// # Errors
    ///
    /// [`ColorError::UndefinedChannel`] while unset.
    pub fn darken(&mut self, amount: f64) -> Result<()> {
        algebra::darken(self, amount).map(|_| ())
    }
}

fn with_channel<R: ChannelRecord>(mut record: R, channel: Channel, value: f64) -> Result<R> {
    record.set(channel, value)?;
    Ok(record)
}

impl Default for Color {
    /// Default is unset.
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Color {
    /// Copies the canonical value only; listeners are not cloned.
    fn clone(&self) -> Self {
        Self {
            hsv: self.hsv,
            ..Self::new()
        }
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.hsv == other.hsv
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Color")
            .field("hsv", &self.hsv)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hex_string() {
            Ok(hex) => f.write_str(&hex),
            Err(_) => f.write_str("unset"),
        }
    }
}

impl From<Hsv> for Color {
    fn from(hsv: Hsv) -> Self {
        Self {
            hsv: Some(hsv),
            ..Self::new()
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from(rgb_to_hsv(rgb))
    }
}

impl From<Hsl> for Color {
    fn from(hsl: Hsl) -> Self {
        Self::from(hsl_to_hsv(hsl))
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Sniff the notation by prefix and parse it.
    fn from_str(s: &str) -> Result<Self> {
        Self::try_new(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorError;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Builder for a [`Color`] with an initial value and listeners.
///
/// The initial value is written before listeners are attached, so
/// building never notifies.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use n_color::{Color, Hsv};
///
/// let hits = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&hits);
/// let mut color = Color::builder()
///     .notation("#0f0")
///     .on_change(move |_, _| counter.set(counter.get() + 1))
///     .build()
///     .unwrap();
///
/// assert_eq!(hits.get(), 0);
/// color.set_hsv(Hsv::new(0.0, 100.0, 100.0));
/// assert_eq!(hits.get(), 1);
/// ```
#[derive(Default)]
pub struct ColorBuilder {
    init: Option<Init>,
    listeners: Vec<Listener>,
}

enum Init {
    Value(ColorInit),
    Notation(String),
}

impl ColorBuilder {
    /// Initial value from a record or another color.
    #[must_use]
    pub fn init(mut self, init: impl Into<ColorInit>) -> Self {
        self.init = Some(Init::Value(init.into()));
        self
    }

    /// Initial value from a notation string, sniffed at build time.
    #[must_use]
    pub fn notation(mut self, notation: impl Into<String>) -> Self {
        self.init = Some(Init::Notation(notation.into()));
        self
    }

    /// Add a change listener.
    #[must_use]
    pub fn on_change<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&Color, &Changes) + 'static,
    {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Build the color.
    ///
    /// # Errors
    ///
    /// [`ColorError::UnrecognizedShape`] or
    /// [`ColorError::MalformedNotation`] for a bad initial notation.
    pub fn build(self) -> Result<Color> {
        let mut color = match self.init {
            None => Color::new(),
            Some(Init::Value(init)) => Color::try_new(init)?,
            Some(Init::Notation(s)) => s.parse()?,
        };
        for listener in self.listeners {
            color.subscribe(listener);
        }
        Ok(color)
    }
}

impl fmt::Debug for ColorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorBuilder")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
