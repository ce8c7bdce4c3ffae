use crate::foundation::error::{CarouselError, CarouselResult};

/// Durations (milliseconds) and magnitudes of every carousel animation.
///
/// Defaults reproduce the showcase page: 0.4 s background cross-fade halves, a 20 % panel push,
/// 0.6 s staggered decoration fade-in and 0.6 s / 0.8 s parallax follow and reset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionTimings {
    /// Each half (out, in) of the background cross-fade.
    pub bg_fade_ms: u64,
    /// Group fade-out of the outgoing decorative layers.
    pub decor_out_ms: u64,
    /// Scale the decorative layers shrink to while hidden.
    pub decor_hidden_scale: f64,
    pub panel_out_ms: u64,
    pub panel_in_delay_ms: u64,
    pub panel_in_ms: u64,
    /// Horizontal push distance, percent of the panel width.
    pub panel_shift_percent: f64,
    pub content_rise_ms: u64,
    pub content_rise_px: f64,
    pub decor_in_ms: u64,
    pub decor_stagger_ms: u64,
    pub parallax_follow_ms: u64,
    pub parallax_reset_ms: u64,
    pub entrance: EntranceTimings,
}

impl Default for MotionTimings {
    fn default() -> Self {
        Self {
            bg_fade_ms: 400,
            decor_out_ms: 400,
            decor_hidden_scale: 0.9,
            panel_out_ms: 500,
            panel_in_delay_ms: 100,
            panel_in_ms: 600,
            panel_shift_percent: 20.0,
            content_rise_ms: 600,
            content_rise_px: 20.0,
            decor_in_ms: 600,
            decor_stagger_ms: 100,
            parallax_follow_ms: 600,
            parallax_reset_ms: 800,
            entrance: EntranceTimings::default(),
        }
    }
}

/// First-render entrance of the initial slide.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EntranceTimings {
    pub card_ms: u64,
    pub card_rise_px: f64,
    pub title_delay_ms: u64,
    pub title_ms: u64,
    pub title_rise_px: f64,
    pub text_delay_ms: u64,
    pub text_stagger_ms: u64,
    pub text_ms: u64,
    pub text_rise_px: f64,
    pub decor_ms: u64,
    pub decor_stagger_ms: u64,
    pub decor_rise_px: f64,
}

impl Default for EntranceTimings {
    fn default() -> Self {
        Self {
            card_ms: 800,
            card_rise_px: 30.0,
            title_delay_ms: 150,
            title_ms: 600,
            title_rise_px: 20.0,
            text_delay_ms: 250,
            text_stagger_ms: 80,
            text_ms: 600,
            text_rise_px: 10.0,
            decor_ms: 1200,
            decor_stagger_ms: 80,
            decor_rise_px: 30.0,
        }
    }
}

impl MotionTimings {
    /// Time from the start of a slide change until the incoming panel is at rest.
    pub fn panel_settle_ms(&self) -> u64 {
        self.panel_in_delay_ms.saturating_add(self.panel_in_ms)
    }

    pub fn validate(&self) -> CarouselResult<()> {
        if !(self.decor_hidden_scale.is_finite() && self.decor_hidden_scale > 0.0) {
            return Err(CarouselError::animation(
                "decor_hidden_scale must be finite and > 0",
            ));
        }
        for (name, v) in [
            ("panel_shift_percent", self.panel_shift_percent),
            ("content_rise_px", self.content_rise_px),
            ("entrance.card_rise_px", self.entrance.card_rise_px),
            ("entrance.title_rise_px", self.entrance.title_rise_px),
            ("entrance.text_rise_px", self.entrance.text_rise_px),
            ("entrance.decor_rise_px", self.entrance.decor_rise_px),
        ] {
            if !v.is_finite() {
                return Err(CarouselError::animation(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timings.rs"]
mod tests;
