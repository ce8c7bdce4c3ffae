use std::collections::BTreeMap;

use crate::{
    deck::model::{Deck, ResolvedBackground},
    foundation::core::{Affine, Cursor, Millis, Point, Rect, Transform2D, Vec2},
    stage::layout::{LayerPlacement, LayoutContext, place_layer},
};

/// Handle of one stage element. Handles are created at mount and never reused.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u64);

/// Animatable element property.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Prop {
    Opacity,
    Scale,
    /// Horizontal shift in percent of the element width (slide panels).
    XPercent,
    /// Downward offset in pixels used by rise-in animations.
    Rise,
    ParallaxX,
    ParallaxY,
    RotateDeg,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Props {
    pub opacity: f64,
    pub scale: f64,
    pub x_percent: f64,
    pub rise: f64,
    pub parallax_x: f64,
    pub parallax_y: f64,
    pub rotate_deg: f64,
}

impl Default for Props {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            x_percent: 0.0,
            rise: 0.0,
            parallax_x: 0.0,
            parallax_y: 0.0,
            rotate_deg: 0.0,
        }
    }
}

impl Props {
    pub fn get(&self, prop: Prop) -> f64 {
        match prop {
            Prop::Opacity => self.opacity,
            Prop::Scale => self.scale,
            Prop::XPercent => self.x_percent,
            Prop::Rise => self.rise,
            Prop::ParallaxX => self.parallax_x,
            Prop::ParallaxY => self.parallax_y,
            Prop::RotateDeg => self.rotate_deg,
        }
    }

    pub fn set(&mut self, prop: Prop, value: f64) {
        let slot = match prop {
            Prop::Opacity => &mut self.opacity,
            Prop::Scale => &mut self.scale,
            Prop::XPercent => &mut self.x_percent,
            Prop::Rise => &mut self.rise,
            Prop::ParallaxX => &mut self.parallax_x,
            Prop::ParallaxY => &mut self.parallax_y,
            Prop::RotateDeg => &mut self.rotate_deg,
        };
        *slot = value;
    }

    pub fn parallax(&self) -> Vec2 {
        Vec2::new(self.parallax_x, self.parallax_y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ElementKind {
    Background,
    Panel { slide: usize },
    /// The card inside a panel; the block that rises in after a transition.
    Content { slide: usize },
    Title { slide: usize },
    TextBlock { slide: usize, index: usize },
    Layer { slide: usize, index: usize },
}

#[derive(Clone, Debug)]
struct Element {
    kind: ElementKind,
    props: Props,
    placement: Option<LayerPlacement>,
}

/// Handles for every element of one mounted slide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideHandles {
    pub panel: ElementId,
    pub content: ElementId,
    pub title: ElementId,
    pub text_blocks: Vec<ElementId>,
    pub layers: Vec<ElementId>,
}

/// Last background image swap, recorded for inspection.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SwapRecord {
    pub at: Millis,
    /// Background opacity at the instant of the swap.
    pub opacity: f64,
    pub image: String,
}

/// Explicit render tree: the background, one panel per slide and every decorative layer.
///
/// Elements are addressed by [`ElementId`] handles handed out at mount, so animations never look
/// elements up by name. Slides can be unmounted to model render targets that do not exist yet;
/// their handles then resolve to nothing. Unmounting frees the elements, so the tree stays the
/// size of what is mounted however often slides are remounted.
#[derive(Clone, Debug)]
pub struct Stage {
    elements: BTreeMap<ElementId, Element>,
    next_id: u64,
    background: ElementId,
    background_desc: ResolvedBackground,
    slides: Vec<Option<SlideHandles>>,
    last_swap: Option<SwapRecord>,
}

impl Stage {
    /// Build the tree for `deck` with slide `active` showing.
    pub fn new(deck: &Deck, active: usize, layout: &LayoutContext) -> Self {
        let mut stage = Self {
            elements: BTreeMap::new(),
            next_id: 0,
            background: ElementId(0),
            background_desc: deck.slides[active].background.resolved(),
            slides: vec![None; deck.slides.len()],
            last_swap: None,
        };
        stage.background = stage.push(ElementKind::Background, Props::default(), None);
        for i in 0..deck.slides.len() {
            stage.mount_slide(deck, i, i == active, layout);
        }
        stage
    }

    fn push(
        &mut self,
        kind: ElementKind,
        props: Props,
        placement: Option<LayerPlacement>,
    ) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            Element {
                kind,
                props,
                placement,
            },
        );
        id
    }

    /// Create the elements of slide `index`, replacing any previous mount.
    ///
    /// A visible slide shows its panel and layers at rest; a hidden one is transparent.
    pub fn mount_slide(
        &mut self,
        deck: &Deck,
        index: usize,
        visible: bool,
        layout: &LayoutContext,
    ) -> Option<&SlideHandles> {
        let slide = deck.slides.get(index)?;
        self.unmount_slide(index);

        let shown = Props {
            opacity: if visible { 1.0 } else { 0.0 },
            ..Props::default()
        };
        let panel = self.push(ElementKind::Panel { slide: index }, shown, None);
        let content = self.push(ElementKind::Content { slide: index }, Props::default(), None);
        let title = self.push(ElementKind::Title { slide: index }, Props::default(), None);
        let text_blocks = (0..slide.content.text_blocks().count())
            .map(|k| {
                self.push(
                    ElementKind::TextBlock { slide: index, index: k },
                    Props::default(),
                    None,
                )
            })
            .collect();
        let layers = slide
            .parallax_layers
            .iter()
            .enumerate()
            .map(|(k, layer)| {
                let props = Props {
                    opacity: if visible { layer.opacity } else { 0.0 },
                    rotate_deg: layer.rotate,
                    ..Props::default()
                };
                self.push(
                    ElementKind::Layer { slide: index, index: k },
                    props,
                    Some(place_layer(layer, layout)),
                )
            })
            .collect();

        self.slides[index] = Some(SlideHandles {
            panel,
            content,
            title,
            text_blocks,
            layers,
        });
        self.slides[index].as_ref()
    }

    /// Drop the elements of slide `index`. Their handles stop resolving.
    pub fn unmount_slide(&mut self, index: usize) -> bool {
        let Some(handles) = self.slides.get_mut(index).and_then(Option::take) else {
            return false;
        };
        let ids = [handles.panel, handles.content, handles.title]
            .into_iter()
            .chain(handles.text_blocks)
            .chain(handles.layers);
        for id in ids {
            self.elements.remove(&id);
        }
        true
    }

    pub fn slide(&self, index: usize) -> Option<&SlideHandles> {
        self.slides.get(index).and_then(Option::as_ref)
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn background(&self) -> ElementId {
        self.background
    }

    pub fn background_desc(&self) -> &ResolvedBackground {
        &self.background_desc
    }

    pub fn last_swap(&self) -> Option<&SwapRecord> {
        self.last_swap.as_ref()
    }

    /// Layer handles of every mounted slide.
    pub fn all_layers(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.slides
            .iter()
            .flatten()
            .flat_map(|h| h.layers.iter().copied())
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Number of mounted elements, the background included.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.element(id).map(|e| e.kind)
    }

    pub fn props(&self, id: ElementId) -> Option<&Props> {
        self.element(id).map(|e| &e.props)
    }

    pub fn get(&self, id: ElementId, prop: Prop) -> Option<f64> {
        self.props(id).map(|p| p.get(prop))
    }

    /// Write a property. Returns `false` when the element is not mounted.
    pub fn set(&mut self, id: ElementId, prop: Prop, value: f64) -> bool {
        match self.elements.get_mut(&id) {
            Some(e) => {
                e.props.set(prop, value);
                true
            }
            None => false,
        }
    }

    pub fn placement(&self, id: ElementId) -> Option<LayerPlacement> {
        self.element(id).and_then(|e| e.placement)
    }

    /// Replace the background descriptor in one step.
    pub fn swap_background(&mut self, desc: ResolvedBackground, at: Millis) {
        let opacity = self
            .get(self.background, Prop::Opacity)
            .unwrap_or_default();
        self.last_swap = Some(SwapRecord {
            at,
            opacity,
            image: desc.image.clone(),
        });
        self.background_desc = desc;
    }

    /// Re-resolve every layer box against a new layout.
    pub fn relayout(&mut self, deck: &Deck, layout: &LayoutContext) {
        for (slide_index, handles) in self.slides.iter().enumerate() {
            let Some(handles) = handles else { continue };
            for (k, id) in handles.layers.iter().enumerate() {
                let Some(layer) = deck.slides[slide_index].parallax_layers.get(k) else {
                    continue;
                };
                if let Some(e) = self.elements.get_mut(id) {
                    e.placement = Some(place_layer(layer, layout));
                }
            }
        }
    }

    /// Full transform of a layer in container space, including rotation about its center,
    /// scale, parallax and rise offsets.
    pub fn layer_transform(&self, id: ElementId) -> Option<Affine> {
        let e = self.element(id)?;
        let placement = e.placement?;
        let size = placement.size();
        let t = Transform2D {
            translate: placement.rect.origin().to_vec2()
                + placement.centering
                + e.props.parallax()
                + Vec2::new(0.0, e.props.rise),
            rotation_deg: e.props.rotate_deg,
            scale: e.props.scale,
            anchor: Point::new(size.width / 2.0, size.height / 2.0),
        };
        Some(t.to_affine())
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Serializable view of the whole tree.
    pub fn snapshot(
        &self,
        deck: &Deck,
        at: Millis,
        current: usize,
        cursor: Cursor,
    ) -> StageSnapshot {
        let bg = self.props(self.background).copied().unwrap_or_default();
        let slides = deck
            .slides
            .iter()
            .enumerate()
            .map(|(i, slide)| {
                let Some(h) = self.slide(i) else {
                    return SlideSnapshot {
                        key: slide.key.clone(),
                        mounted: false,
                        panel: None,
                        content: None,
                        layers: Vec::new(),
                    };
                };
                let layers = h
                    .layers
                    .iter()
                    .zip(&slide.parallax_layers)
                    .filter_map(|(id, def)| {
                        Some(LayerSnapshot {
                            id: *id,
                            source: def.source.clone(),
                            props: *self.props(*id)?,
                            rect: self.placement(*id)?.rect,
                            transform: self.layer_transform(*id)?.as_coeffs(),
                        })
                    })
                    .collect();
                SlideSnapshot {
                    key: slide.key.clone(),
                    mounted: true,
                    panel: self.props(h.panel).copied(),
                    content: self.props(h.content).copied(),
                    layers,
                }
            })
            .collect();

        StageSnapshot {
            at,
            current_index: current,
            cursor,
            background: BackgroundSnapshot {
                desc: self.background_desc.clone(),
                opacity: bg.opacity,
            },
            slides,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct StageSnapshot {
    pub at: Millis,
    pub current_index: usize,
    pub cursor: Cursor,
    pub background: BackgroundSnapshot,
    pub slides: Vec<SlideSnapshot>,
}

impl StageSnapshot {
    /// Keys of slides whose panel is at least partly visible.
    pub fn visible_panels(&self) -> Vec<&str> {
        self.slides
            .iter()
            .filter(|s| s.panel.is_some_and(|p| p.opacity > 0.0))
            .map(|s| s.key.as_str())
            .collect()
    }
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct BackgroundSnapshot {
    #[serde(flatten)]
    pub desc: ResolvedBackground,
    pub opacity: f64,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct SlideSnapshot {
    pub key: String,
    pub mounted: bool,
    pub panel: Option<Props>,
    pub content: Option<Props>,
    pub layers: Vec<LayerSnapshot>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct LayerSnapshot {
    pub id: ElementId,
    pub source: String,
    pub props: Props,
    pub rect: Rect,
    /// Affine coefficients `[a, b, c, d, e, f]`.
    pub transform: [f64; 6],
}

#[cfg(test)]
#[path = "../../tests/unit/stage/tree.rs"]
mod tests;
