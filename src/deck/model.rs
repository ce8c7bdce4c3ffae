use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    animation::timings::MotionTimings,
    deck::length::{Length, lenient_f64},
    foundation::core::{Point, Rect, Size},
    foundation::error::{CarouselError, CarouselResult},
    playback::autoplay::DEFAULT_AUTOPLAY_INTERVAL_MS,
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Static slideshow configuration.
///
/// A deck is pure data: it is built once (from JSON or [`crate::DeckBuilder`]), validated, and
/// never mutated while a [`crate::Carousel`] is mounted on it.
pub struct Deck {
    /// Ordered slides; navigation wraps over this order.
    pub slides: Vec<Slide>,
    /// Autoplay period.
    #[serde(default = "default_autoplay_interval_ms")]
    pub autoplay_interval_ms: u64,
    /// Animation durations and magnitudes.
    #[serde(default)]
    pub timings: MotionTimings,
    /// Viewport used to resolve `vw`/`vh` lengths.
    #[serde(default)]
    pub viewport: Viewport,
}

fn default_autoplay_interval_ms() -> u64 {
    DEFAULT_AUTOPLAY_INTERVAL_MS
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Viewport dimensions in pixels.
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl Viewport {
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One content + background + decoration configuration.
pub struct Slide {
    /// Stable unique key.
    pub key: String,
    /// Opaque text payload, carried for renderers.
    #[serde(default)]
    pub content: SlideContent,
    /// Full-bleed background layer.
    pub background: Background,
    /// Decorative layers in z-order; animation stagger follows this order.
    #[serde(default, alias = "parallaxLayers")]
    pub parallax_layers: Vec<ParallaxLayer>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Slide text. The carousel only needs to know how many text blocks animate in.
pub struct SlideContent {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub philosophy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
}

impl SlideContent {
    /// Text blocks below the title, in display order.
    pub fn text_blocks(&self) -> impl Iterator<Item = &str> {
        [&self.origin, &self.philosophy, &self.body, &self.quote]
            .into_iter()
            .filter_map(|s| s.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Background descriptor; `image` is a composite gradient or URL.
pub struct Background {
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl Background {
    pub fn resolved(&self) -> ResolvedBackground {
        ResolvedBackground {
            image: self.image.clone(),
            position: self
                .position
                .clone()
                .unwrap_or_else(|| "center".to_owned()),
            size: self.size.clone().unwrap_or_else(|| "cover".to_owned()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Background with defaults applied, as shown on the stage.
pub struct ResolvedBackground {
    pub image: String,
    pub position: String,
    pub size: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A decorative overlay that moves with the pointer.
pub struct ParallaxLayer {
    /// Image reference.
    #[serde(alias = "src")]
    pub source: String,
    /// Resting opacity in `[0, 1]`.
    #[serde(default = "default_layer_opacity")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Length>,
    /// Shift by half the layer size so the anchor becomes its center.
    #[serde(default)]
    pub centered: bool,
    /// Parallax sensitivity, `>= 0`.
    #[serde(deserialize_with = "lenient_f64")]
    pub depth: f64,
    /// Rotation in degrees.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rotate: f64,
    /// Pin the layer center to a point of the slide card instead of the viewport anchors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach: Option<AttachPoint>,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
    /// Layer width as a fraction of the card width (card-attached layers only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_by_card: Option<f64>,
}

fn default_layer_opacity() -> f64 {
    1.0
}

impl ParallaxLayer {
    /// A full-opacity layer with no geometry and zero depth.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            opacity: 1.0,
            width: None,
            height: None,
            left: None,
            top: None,
            right: None,
            bottom: None,
            centered: false,
            depth: 0.0,
            rotate: 0.0,
            attach: None,
            offset_x: 0.0,
            offset_y: 0.0,
            scale_by_card: None,
        }
    }

    pub fn depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn size(mut self, width: Length, height: Length) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Anchor from the left/top edges.
    pub fn at(mut self, left: Length, top: Length) -> Self {
        self.left = Some(left);
        self.top = Some(top);
        self
    }

    /// Anchor from the right/bottom edges.
    pub fn at_far(mut self, right: Length, bottom: Length) -> Self {
        self.right = Some(right);
        self.bottom = Some(bottom);
        self
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    pub fn attach(mut self, point: AttachPoint, offset_x: f64, offset_y: f64) -> Self {
        self.attach = Some(point);
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    pub fn scale_by_card(mut self, factor: f64) -> Self {
        self.scale_by_card = Some(factor);
        self
    }

    fn validate(&self, slide: &str, index: usize) -> CarouselResult<()> {
        let at = || format!("slide '{slide}' layer {index}");
        if self.source.trim().is_empty() {
            return Err(CarouselError::validation(format!(
                "{}: source must be non-empty",
                at()
            )));
        }
        if !(self.opacity.is_finite() && (0.0..=1.0).contains(&self.opacity)) {
            return Err(CarouselError::validation(format!(
                "{}: opacity must be in [0, 1]",
                at()
            )));
        }
        if !(self.depth.is_finite() && self.depth >= 0.0) {
            return Err(CarouselError::validation(format!(
                "{}: depth must be finite and >= 0",
                at()
            )));
        }
        if !self.rotate.is_finite() {
            return Err(CarouselError::validation(format!(
                "{}: rotate must be finite",
                at()
            )));
        }
        if self.left.is_some() && self.right.is_some() {
            return Err(CarouselError::validation(format!(
                "{}: left and right are mutually exclusive",
                at()
            )));
        }
        if self.top.is_some() && self.bottom.is_some() {
            return Err(CarouselError::validation(format!(
                "{}: top and bottom are mutually exclusive",
                at()
            )));
        }
        if !(self.offset_x.is_finite() && self.offset_y.is_finite()) {
            return Err(CarouselError::validation(format!(
                "{}: offsets must be finite",
                at()
            )));
        }
        if let Some(f) = self.scale_by_card {
            if !(f.is_finite() && f > 0.0) {
                return Err(CarouselError::validation(format!(
                    "{}: scale_by_card must be finite and > 0",
                    at()
                )));
            }
            if self.attach.is_none() {
                return Err(CarouselError::validation(format!(
                    "{}: scale_by_card requires attach",
                    at()
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// One of nine points on the slide card box.
pub enum AttachPoint {
    LeftTop,
    LeftMiddle,
    LeftBottom,
    CenterTop,
    CenterMiddle,
    CenterBottom,
    RightTop,
    RightMiddle,
    RightBottom,
}

impl AttachPoint {
    pub fn point(self, card: Rect) -> Point {
        let cx = card.x0 + card.width() / 2.0;
        let cy = card.y0 + card.height() / 2.0;
        let (x, y) = match self {
            Self::LeftTop => (card.x0, card.y0),
            Self::LeftMiddle => (card.x0, cy),
            Self::LeftBottom => (card.x0, card.y1),
            Self::CenterTop => (cx, card.y0),
            Self::CenterMiddle => (cx, cy),
            Self::CenterBottom => (cx, card.y1),
            Self::RightTop => (card.x1, card.y0),
            Self::RightMiddle => (card.x1, cy),
            Self::RightBottom => (card.x1, card.y1),
        };
        Point::new(x, y)
    }
}

impl Deck {
    /// Parse a deck from a JSON reader. The result is not validated.
    pub fn from_reader<R: std::io::Read>(r: R) -> CarouselResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CarouselError::serde(format!("parse deck JSON: {e}")))
    }

    /// Parse a deck from a JSON file on disk. The result is not validated.
    pub fn from_path(path: impl AsRef<Path>) -> CarouselResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CarouselError::config(format!("open deck JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> CarouselResult<()> {
        if self.slides.is_empty() {
            return Err(CarouselError::validation("deck must contain at least one slide"));
        }
        if self.autoplay_interval_ms == 0 {
            return Err(CarouselError::config("autoplay_interval_ms must be > 0"));
        }
        let vp = self.viewport;
        if !(vp.width.is_finite() && vp.height.is_finite() && vp.width > 0.0 && vp.height > 0.0) {
            return Err(CarouselError::config("viewport width/height must be > 0"));
        }
        self.timings.validate()?;

        let mut keys = BTreeSet::new();
        for slide in &self.slides {
            if slide.key.trim().is_empty() {
                return Err(CarouselError::validation("slide key must be non-empty"));
            }
            if !keys.insert(slide.key.as_str()) {
                return Err(CarouselError::validation(format!(
                    "duplicate slide key '{}'",
                    slide.key
                )));
            }
            if slide.background.image.trim().is_empty() {
                return Err(CarouselError::validation(format!(
                    "slide '{}': background image must be non-empty",
                    slide.key
                )));
            }
            for (i, layer) in slide.parallax_layers.iter().enumerate() {
                layer.validate(&slide.key, i)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deck/model.rs"]
mod tests;
