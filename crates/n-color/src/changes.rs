// SPDX-License-Identifier: MIT
//
// Change records — which channels differ between two snapshots.
//
// A change record is a per-channel boolean map over the channels the
// first snapshot carries. It is stored as two bitsets: the channels that
// were compared, and the subset that changed. Both fit in one byte.

use std::fmt;

use crate::record::{Channel, ChannelRecord, Model};

bitflags::bitflags! {
    /// A set of channels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct ChannelSet: u8 {
        const H = 1 << 0;
        const S = 1 << 1;
        const V = 1 << 2;
        const L = 1 << 3;
        const R = 1 << 4;
        const G = 1 << 5;
        const B = 1 << 6;
        const A = 1 << 7;
    }
}

impl From<Channel> for ChannelSet {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::H => Self::H,
            Channel::S => Self::S,
            Channel::V => Self::V,
            Channel::L => Self::L,
            Channel::R => Self::R,
            Channel::G => Self::G,
            Channel::B => Self::B,
            Channel::A => Self::A,
        }
    }
}

/// Per-channel "did it change" flags produced by [`compare`].
///
/// ```
/// use n_color::{Channel, Hsv, compare};
///
/// let changes = compare(&Hsv::new(0.0, 50.0, 50.0), &Hsv::new(90.0, 50.0, 50.0));
/// assert!(changes.get(Channel::H));
/// assert!(!changes.get(Channel::S));
/// assert!(changes.any());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Changes {
    model: Model,
    compared: ChannelSet,
    changed: ChannelSet,
}

impl Changes {
    /// A record where every listed channel is reported as changed.
    ///
    /// Used when there was no previous value to compare against.
    #[must_use]
    pub fn all(model: Model, channels: &[Channel]) -> Self {
        let set = channels
            .iter()
            .fold(ChannelSet::empty(), |acc, &c| acc | ChannelSet::from(c));
        Self {
            model,
            compared: set,
            changed: set,
        }
    }

    /// The model the snapshots were compared in.
    #[inline]
    #[must_use]
    pub const fn model(&self) -> Model {
        self.model
    }

    /// Whether `channel` changed. Channels that were not compared read
    /// as unchanged.
    #[inline]
    #[must_use]
    pub fn get(&self, channel: Channel) -> bool {
        self.changed.contains(channel.into())
    }

    /// Whether `channel` took part in the comparison at all.
    #[inline]
    #[must_use]
    pub fn contains(&self, channel: Channel) -> bool {
        self.compared.contains(channel.into())
    }

    /// Whether any channel changed.
    #[inline]
    #[must_use]
    pub const fn any(&self) -> bool {
        !self.changed.is_empty()
    }

    /// The changed channels as a set.
    #[inline]
    #[must_use]
    pub const fn changed(&self) -> ChannelSet {
        self.changed
    }

    /// Walk the compared channels in model order with their flags.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, bool)> + '_ {
        self.model
            .channels()
            .iter()
            .filter(|&&c| self.contains(c))
            .map(|&c| (c, self.get(c)))
    }
}

impl fmt::Debug for Changes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (channel, changed) in self.iter() {
            map.entry(&channel.name(), &changed);
        }
        map.finish()
    }
}

/// Compare two same-shape records channel by channel.
///
/// The channels compared are the ones `a` carries; a channel present on
/// one side and absent on the other counts as changed. Comparison is by
/// value, so `-0.0` and `0.0` are equal and `NaN` always differs.
#[must_use]
pub fn compare<R: ChannelRecord>(a: &R, b: &R) -> Changes {
    let mut compared = ChannelSet::empty();
    let mut changed = ChannelSet::empty();
    for &channel in R::MODEL.channels() {
        let Some(old) = a.get(channel) else { continue };
        compared |= ChannelSet::from(channel);
        if b.get(channel) != Some(old) {
            changed |= ChannelSet::from(channel);
        }
    }
    Changes {
        model: R::MODEL,
        compared,
        changed,
    }
}
