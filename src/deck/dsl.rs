use std::collections::BTreeSet;

use crate::{
    animation::timings::MotionTimings,
    deck::model::{Background, Deck, ParallaxLayer, Slide, SlideContent, Viewport},
    foundation::error::{CarouselError, CarouselResult},
    playback::autoplay::DEFAULT_AUTOPLAY_INTERVAL_MS,
};

/// Builder for [`Deck`](crate::Deck).
pub struct DeckBuilder {
    slides: Vec<Slide>,
    keys: BTreeSet<String>,
    autoplay_interval_ms: u64,
    timings: MotionTimings,
    viewport: Viewport,
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckBuilder {
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            keys: BTreeSet::new(),
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            timings: MotionTimings::default(),
            viewport: Viewport::default(),
        }
    }

    /// Append a slide under a unique key.
    pub fn slide(mut self, slide: Slide) -> CarouselResult<Self> {
        if !self.keys.insert(slide.key.clone()) {
            return Err(CarouselError::validation(format!(
                "duplicate slide key '{}'",
                slide.key
            )));
        }
        self.slides.push(slide);
        Ok(self)
    }

    pub fn autoplay_interval_ms(mut self, ms: u64) -> Self {
        self.autoplay_interval_ms = ms;
        self
    }

    pub fn timings(mut self, timings: MotionTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Viewport { width, height };
        self
    }

    /// Build and validate the final [`Deck`](crate::Deck).
    pub fn build(self) -> CarouselResult<Deck> {
        let deck = Deck {
            slides: self.slides,
            autoplay_interval_ms: self.autoplay_interval_ms,
            timings: self.timings,
            viewport: self.viewport,
        };
        deck.validate()?;
        Ok(deck)
    }
}

/// Builder for a single [`Slide`](crate::Slide).
pub struct SlideBuilder {
    key: String,
    content: SlideContent,
    background: Option<Background>,
    layers: Vec<ParallaxLayer>,
}

impl SlideBuilder {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            content: SlideContent::default(),
            background: None,
            layers: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.content.title = title.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.content.origin = Some(origin.into());
        self
    }

    pub fn philosophy(mut self, philosophy: impl Into<String>) -> Self {
        self.content.philosophy = Some(philosophy.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.content.body = Some(body.into());
        self
    }

    pub fn quote(mut self, quote: impl Into<String>) -> Self {
        self.content.quote = Some(quote.into());
        self
    }

    /// Background image with default position (`center`) and size (`cover`).
    pub fn background(mut self, image: impl Into<String>) -> Self {
        self.background = Some(Background {
            image: image.into(),
            position: None,
            size: None,
        });
        self
    }

    pub fn background_with(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    pub fn layer(mut self, layer: ParallaxLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn build(self) -> CarouselResult<Slide> {
        let background = self.background.ok_or_else(|| {
            CarouselError::validation(format!("slide '{}' has no background", self.key))
        })?;
        Ok(Slide {
            key: self.key,
            content: self.content,
            background,
            parallax_layers: self.layers,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deck/dsl.rs"]
mod tests;
