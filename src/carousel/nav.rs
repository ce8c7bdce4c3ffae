use crate::foundation::core::{Cursor, Direction};

/// One effective slide change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NavTransition {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

/// Cyclic index over `len` slides. There is no terminal state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideNav {
    current: usize,
    len: usize,
}

impl SlideNav {
    /// Starts at slide `0`. `len` is at least one.
    pub fn new(len: usize) -> Self {
        Self {
            current: 0,
            len: len.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; a carousel has at least one slide.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Advance with wrap-around. Always reported as forward, including the wrap from the last
    /// slide to the first.
    pub fn go_next(&mut self) -> Option<NavTransition> {
        let to = (self.current + 1) % self.len;
        self.move_to(to, Direction::Forward)
    }

    /// Step back with wrap-around. Always reported as backward.
    pub fn go_previous(&mut self) -> Option<NavTransition> {
        let to = (self.current + self.len - 1) % self.len;
        self.move_to(to, Direction::Backward)
    }

    /// Jump straight to `index`. Returns `None` for the current slide or an index out of range.
    pub fn jump_to(&mut self, index: usize) -> Option<NavTransition> {
        if index >= self.len {
            tracing::debug!(index, len = self.len, "jump target out of range");
            return None;
        }
        let direction = Direction::between(self.current, index)?;
        self.move_to(index, direction)
    }

    fn move_to(&mut self, to: usize, direction: Direction) -> Option<NavTransition> {
        if to == self.current {
            return None;
        }
        let from = self.current;
        self.current = to;
        Some(NavTransition {
            from,
            to,
            direction,
        })
    }
}

/// Mutable controller state: where the deck is and where the pointer is.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselState {
    pub nav: SlideNav,
    pub cursor: Cursor,
}

impl CarouselState {
    pub fn new(len: usize) -> Self {
        Self {
            nav: SlideNav::new(len),
            cursor: Cursor::CENTER,
        }
    }

    pub fn current_index(&self) -> usize {
        self.nav.current()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/nav.rs"]
mod tests;
