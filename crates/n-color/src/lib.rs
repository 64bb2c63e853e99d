// SPDX-License-Identifier: MIT

//! # n-color — Color value model for n-nvim
//!
//! One color, stored once, viewed many ways.
//!
//! - **[`record`]** — `Hsv`, `Rgb`, `Hsl` channel records and channel names
//! - **[`convert`]** — the conversion kernel (HSV ↔ RGB, HSV ↔ HSL)
//! - **[`notation`]** — `rgb(...)`, `hsl(...)` and `#hex` parsing/formatting
//! - **[`algebra`]** — `mix`, `lighten`/`lightened`, `darken`/`darkened`, `clamp`
//! - **[`changes`]** — per-channel change records
//! - **[`value`]** — [`Color`], the mutable value with change listeners
//!
//! ```text
//!   reads:   canonical HSV ──▶ RGB / HSL ──▶ strings
//!   writes:  any notation ──▶ HSV ──▶ diff ──▶ store ──▶ listeners
//! ```
//!
//! Channels are `f64` and are never clamped on the way in; out-of-range
//! values flow through the kernel unchanged. Only the algebra clamps.
//!
//! The crate logs through the [`log`] facade (`debug` for rejected
//! notations, `trace` for notifications) and never installs a logger.
//! Enable the `serde` feature to serialize the records.

// h/s/v/l and r/g/b are deliberately alike.
#![allow(clippy::similar_names)]

pub mod algebra;
pub mod changes;
pub mod convert;
pub mod error;
pub mod notation;
pub mod record;
pub mod value;

pub use algebra::{clamp, darken, darkened, lighten, lightened, mix, mix_rgb};
pub use changes::{ChannelSet, Changes, compare};
pub use convert::{hsl_to_hsv, hsv_to_hsl, hsv_to_rgb, rgb_to_hsv};
pub use error::{ColorError, Result};
pub use notation::{
    format_hex_string, format_hsl_string, format_rgb_string, parse_hex_string, parse_hsl_string,
    parse_notation, parse_rgb_string,
};
pub use record::{Channel, ChannelRecord, Hsl, Hsv, HsvPatch, Model, Rgb};
pub use value::{Color, ColorBuilder, ColorInit, IntoColorInit, Listener, ListenerId};
