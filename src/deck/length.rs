use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::foundation::core::Size;
use crate::foundation::error::{CarouselError, CarouselResult};

/// A CSS-like length used by layer geometry.
///
/// Serialized as a string (`"40vw"`, `"10vh"`, `"50%"`, `"300px"`). Bare JSON numbers are read
/// as pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f64),
    /// Percent of the viewport width.
    Vw(f64),
    /// Percent of the viewport height.
    Vh(f64),
    /// Percent of the containing box along the same axis.
    Percent(f64),
}

impl Length {
    /// Resolve to pixels. `axis_extent` is the container size along the axis this length is
    /// measured on.
    pub fn to_px(self, viewport: Size, axis_extent: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Vw(v) => viewport.width * v / 100.0,
            Self::Vh(v) => viewport.height * v / 100.0,
            Self::Percent(v) => axis_extent * v / 100.0,
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Self::Px(v) | Self::Vw(v) | Self::Vh(v) | Self::Percent(v) => v,
        }
    }
}

impl FromStr for Length {
    type Err = CarouselError;

    fn from_str(s: &str) -> CarouselResult<Self> {
        let s = s.trim();
        let parse = |num: &str| -> CarouselResult<f64> {
            let v: f64 = num
                .trim()
                .parse()
                .map_err(|_| CarouselError::validation(format!("invalid length '{s}'")))?;
            if !v.is_finite() {
                return Err(CarouselError::validation(format!(
                    "length '{s}' must be finite"
                )));
            }
            Ok(v)
        };

        if let Some(n) = s.strip_suffix("px") {
            Ok(Self::Px(parse(n)?))
        } else if let Some(n) = s.strip_suffix("vw") {
            Ok(Self::Vw(parse(n)?))
        } else if let Some(n) = s.strip_suffix("vh") {
            Ok(Self::Vh(parse(n)?))
        } else if let Some(n) = s.strip_suffix('%') {
            Ok(Self::Percent(parse(n)?))
        } else {
            Ok(Self::Px(parse(s)?))
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Vw(v) => write!(f, "{v}vw"),
            Self::Vh(v) => write!(f, "{v}vh"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

impl serde::Serialize for Length {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Length {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        match NumOrText::deserialize(d)? {
            NumOrText::Num(v) => Ok(Self::Px(v)),
            NumOrText::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrText {
    Num(f64),
    Text(String),
}

/// Deserialize an `f64` written either as a JSON number or a numeric string (`"0.9"`).
pub(crate) fn lenient_f64<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match NumOrText::deserialize(d)? {
        NumOrText::Num(v) => Ok(v),
        NumOrText::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got '{s}'"))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deck/length.rs"]
mod tests;
