//! Timed event scripts replayed against a [`Carousel`].

use std::{fs::File, io::BufReader, path::Path};

use crate::{
    carousel::controller::{Carousel, CarouselStats, Event},
    deck::model::Deck,
    foundation::{
        core::{Millis, Rect},
        error::{CarouselError, CarouselResult},
    },
    stage::tree::StageSnapshot,
};

/// One event at a fixed offset from mount.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: Event,
}

/// A recorded or hand-written session.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Script {
    /// Container box at mount. Defaults to the deck viewport at the origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<Rect>,
    /// Minimum session length; the replay always runs until animation settles.
    #[serde(default)]
    pub duration_ms: u64,
    /// Events in non-decreasing `at_ms` order.
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn from_reader<R: std::io::Read>(r: R) -> CarouselResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CarouselError::serde(format!("parse script JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> CarouselResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CarouselError::config(format!("open script JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> CarouselResult<()> {
        if let Some(w) = self
            .events
            .windows(2)
            .find(|w| w[1].at_ms < w[0].at_ms)
        {
            return Err(CarouselError::config(format!(
                "script events out of order: {} ms after {} ms",
                w[1].at_ms, w[0].at_ms
            )));
        }
        Ok(())
    }

    fn last_event_ms(&self) -> u64 {
        self.events.last().map_or(0, |e| e.at_ms)
    }

    /// Mount `deck` at time zero and replay the script, sampling the stage every `step_ms`.
    ///
    /// Events fire at their own time, between samples. Autoplay stops once the last event and
    /// `duration_ms` are both sampled; sampling then continues until no animation is pending.
    /// Every sample is passed to `sink`.
    pub fn replay(
        &self,
        deck: Deck,
        step_ms: u64,
        mut sink: impl FnMut(&StageSnapshot) -> CarouselResult<()>,
    ) -> CarouselResult<CarouselStats> {
        if step_ms == 0 {
            return Err(CarouselError::config("step_ms must be > 0"));
        }
        self.validate()?;
        let container = self
            .container
            .unwrap_or_else(|| Rect::from_origin_size((0.0, 0.0), deck.viewport.size()));
        let mut carousel = Carousel::mount(deck, container, Millis::ZERO)?;

        let until = self.duration_ms.max(self.last_event_ms());
        let mut pending = self.events.iter().peekable();
        let mut t = 0u64;
        loop {
            while let Some(e) = pending.next_if(|e| e.at_ms <= t) {
                carousel.handle(e.event.clone(), Millis(e.at_ms));
            }
            carousel.tick(Millis(t));
            sink(&carousel.snapshot())?;

            if t >= until {
                carousel.stop_autoplay();
                if !carousel.is_animating() {
                    break;
                }
            }
            t = t.saturating_add(step_ms);
        }
        tracing::debug!(samples = t / step_ms + 1, "script replay finished");
        Ok(carousel.stats())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/script.rs"]
mod tests;
