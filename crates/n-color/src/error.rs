// SPDX-License-Identifier: MIT
//
// Error types for parsing notations and reading color state.

use thiserror::Error;

use crate::record::{Channel, Model};

/// Errors produced by the color model.
///
/// Parsing failures are local to the call that parsed; nothing here is
/// retryable and no error is ever stashed in global state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The string does not follow the grammar the parser expected.
    #[error("malformed {expected} notation: {input:?}")]
    MalformedNotation {
        /// The rejected input, verbatim.
        input: String,
        /// Which notation the parser was looking for (`rgb`, `hsl`, `hex`).
        expected: &'static str,
    },

    /// The input matches none of the recognized notations.
    #[error("unrecognized color shape: {input:?}")]
    UnrecognizedShape {
        /// The rejected input, verbatim.
        input: String,
    },

    /// A representation was requested while the color has no value yet.
    #[error("color channels are undefined (the color is unset)")]
    UndefinedChannel,

    /// The channel does not belong to the model it was addressed through.
    #[error("model {model} has no channel {channel}")]
    UnknownChannel {
        /// Model the lookup went through.
        model: Model,
        /// Channel that was asked for.
        channel: Channel,
    },

    /// A model name that is not `hsv`, `rgb` or `hsl`.
    #[error("unknown color model: {name:?}")]
    UnknownModel {
        /// The rejected name.
        name: String,
    },

    /// A channel name that is none of `h s v l r g b a`.
    #[error("unknown channel name: {name:?}")]
    UnknownChannelName {
        /// The rejected name.
        name: String,
    },
}

impl ColorError {
    pub(crate) fn malformed(input: &str, expected: &'static str) -> Self {
        log::debug!("rejecting {expected} notation {input:?}");
        Self::MalformedNotation {
            input: input.to_owned(),
            expected,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = ColorError> = std::result::Result<T, E>;
