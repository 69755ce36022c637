//! Swatch row presentation state.
//!
//! The row starts collapsed (swatches stacked on the first dot), fans out
//! the first time it scrolls into view, and then stays open until the page
//! returns to the very top. Nothing here touches a palette; it only decides
//! where dots go and whether they are spread.

/// Reveal state of a swatch row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Stacked; waiting to come into view
    Collapsed,
    /// Fan-out animation running
    Revealed,
    /// Fully open; stays open until re-armed at the page top
    PinnedOpen,
}

/// Inputs driving [`SwatchReveal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealEvent {
    /// The row entered (`true`) or fully left (`false`) the viewport
    Intersection(bool),
    /// The page scrolled to vertical offset `y`
    Scroll(f64),
    /// The fan-out animation completed
    AnimationFinished,
}

/// Scroll-driven reveal state machine.
///
/// ```
/// use swatch_palette::{RevealEvent, RevealState, SwatchReveal};
///
/// let mut reveal = SwatchReveal::new(false);
/// reveal.handle(RevealEvent::Intersection(true));
/// assert_eq!(reveal.state(), RevealState::Revealed);
/// reveal.handle(RevealEvent::AnimationFinished);
/// reveal.handle(RevealEvent::Intersection(false));
/// assert_eq!(reveal.state(), RevealState::PinnedOpen);
/// reveal.handle(RevealEvent::Scroll(0.0));
/// assert_eq!(reveal.state(), RevealState::Collapsed);
/// ```
#[derive(Debug, Clone)]
pub struct SwatchReveal {
    state: RevealState,
    in_view: bool,
    last_scroll_y: f64,
    reduced_motion: bool,
}

impl SwatchReveal {
    /// With `reduced_motion` the row is open from the start and never
    /// animates or collapses.
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            state: if reduced_motion {
                RevealState::PinnedOpen
            } else {
                RevealState::Collapsed
            },
            in_view: false,
            last_scroll_y: 0.0,
            reduced_motion,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Whether swatches should be drawn spread out.
    pub fn is_open(&self) -> bool {
        self.state != RevealState::Collapsed
    }

    /// Apply one event and return the resulting state.
    pub fn handle(&mut self, event: RevealEvent) -> RevealState {
        if self.reduced_motion {
            if let RevealEvent::Intersection(visible) = event {
                self.in_view = visible;
            }
            return self.state;
        }

        match event {
            RevealEvent::Intersection(visible) => {
                self.in_view = visible;
                if visible && self.state == RevealState::Collapsed {
                    self.state = RevealState::Revealed;
                }
            }
            RevealEvent::Scroll(y) => {
                let going_down = y > self.last_scroll_y;
                self.last_scroll_y = y;

                if y <= 0.0 {
                    self.state = RevealState::Collapsed;
                } else if going_down && self.in_view && self.state == RevealState::Collapsed {
                    self.state = RevealState::Revealed;
                }
            }
            RevealEvent::AnimationFinished => {
                if self.state == RevealState::Revealed {
                    self.state = RevealState::PinnedOpen;
                }
            }
        }
        self.state
    }
}

/// Geometry of a swatch row, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwatchLayout {
    /// Dot diameter
    pub dot_size: f64,
    /// Space between expanded dots
    pub gap: f64,
}

impl Default for SwatchLayout {
    fn default() -> Self {
        Self {
            dot_size: 16.0,
            gap: 8.0,
        }
    }
}

impl SwatchLayout {
    /// Row width needed to hold `count` expanded swatches.
    ///
    /// A lone swatch gets a little extra room for its wiggle animation.
    pub fn row_width(&self, count: usize) -> f64 {
        match count {
            0 => 0.0,
            1 => self.dot_size + self.single_nudge(),
            n => self.dot_size + (n - 1) as f64 * self.step(),
        }
    }

    /// Horizontal offset of swatch `index` when the row is open.
    pub fn offset(&self, index: usize) -> f64 {
        index as f64 * self.step()
    }

    /// Wiggle distance for a single-swatch row.
    pub fn single_nudge(&self) -> f64 {
        self.gap.min(self.dot_size * 0.75)
    }

    fn step(&self) -> f64 {
        self.dot_size + self.gap
    }
}
