// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light effects carried by effect mode payloads.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A light effect, identified on the wire by a 2-byte code.
///
/// # Examples
///
/// ```
/// use lightcolor_lib::gradient::Effect;
///
/// assert_eq!(Effect::from_code("0380"), Effect::Colorloop);
/// assert_eq!(Effect::Sunrise.code(), "0980");
/// assert_eq!("candle".parse::<Effect>().unwrap(), Effect::Candle);
///
/// let unknown = Effect::from_code("4242");
/// assert_eq!(unknown.to_string(), "unknown_4242");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Flickering candle.
    Candle,
    /// Fireplace.
    Fireplace,
    /// Hue cycle.
    Colorloop,
    /// Sunrise.
    Sunrise,
    /// Sparkle.
    Sparkle,
    /// Opal.
    Opal,
    /// Glisten.
    Glisten,
    /// Sunset.
    Sunset,
    /// Underwater.
    Underwater,
    /// Cosmos.
    Cosmos,
    /// Sunbeam.
    Sunbeam,
    /// Enchant.
    Enchant,
    /// A code missing from the table.
    Unknown(UnknownEffect),
}

/// Lowercase wire code of an effect missing from the table.
///
/// Only built by [`Effect::from_code`] and [`Effect::from_str`], so it never
/// holds the code of a known effect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownEffect(String);

impl UnknownEffect {
    /// Returns the wire code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }
}

static EFFECTS: [(Effect, &str, &str); 12] = [
    (Effect::Candle, "0180", "candle"),
    (Effect::Fireplace, "0280", "fireplace"),
    (Effect::Colorloop, "0380", "colorloop"),
    (Effect::Sunrise, "0980", "sunrise"),
    (Effect::Sparkle, "0a80", "sparkle"),
    (Effect::Opal, "0b80", "opal"),
    (Effect::Glisten, "0c80", "glisten"),
    (Effect::Sunset, "0d80", "sunset"),
    (Effect::Underwater, "0e80", "underwater"),
    (Effect::Cosmos, "0f80", "cosmos"),
    (Effect::Sunbeam, "1080", "sunbeam"),
    (Effect::Enchant, "1180", "enchant"),
];

impl Effect {
    /// Looks up a 4-hex-char code, falling back to [`Effect::Unknown`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        let code = code.to_ascii_lowercase();
        if let Some((effect, _, _)) = EFFECTS.iter().find(|(_, c, _)| *c == code) {
            return effect.clone();
        }
        tracing::debug!(code = %code, "Unknown effect code");
        Self::Unknown(UnknownEffect(code))
    }

    /// Returns the wire code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Unknown(unknown) => unknown.code(),
            known => EFFECTS
                .iter()
                .find(|(effect, _, _)| effect == known)
                .map_or("", |(_, code, _)| *code),
        }
    }

    /// Returns the effect name, `unknown_<code>` for unknown codes.
    #[must_use]
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            Self::Unknown(unknown) => Cow::Owned(format!("unknown_{}", unknown.code())),
            known => Cow::Borrowed(
                EFFECTS
                    .iter()
                    .find(|(effect, _, _)| effect == known)
                    .map_or("", |(_, _, name)| *name),
            ),
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Effect {
    type Err = ValueError;

    /// Parses an effect name, including the `unknown_<code>` form. A code
    /// that is in the table parses as its known effect.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if let Some((effect, _, _)) = EFFECTS.iter().find(|(_, _, n)| *n == name) {
            return Ok(effect.clone());
        }
        match name.strip_prefix("unknown_") {
            Some(code) if code.len() == 4 && code.bytes().all(|b| b.is_ascii_hexdigit()) => {
                Ok(Self::from_code(code))
            }
            _ => Err(ValueError::InvalidFormat(format!("unknown effect: {s}"))),
        }
    }
}
