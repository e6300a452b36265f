//! Win celebration: the effect-trigger seam and its tachyonfx confetti.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::Color;
use ratzilla::ratatui::Frame;
use tachyonfx::{fx, Duration, Effect, Interpolation};

/// Invoked once when a round ends in a win.
pub trait EffectTrigger {
    fn celebrate(&mut self);
}

/// Length of the confetti burst.
const CONFETTI_MS: u32 = 1_500;
/// Longest frame gap fed to the effect.
const MAX_FRAME_MS: f64 = 100.0;

fn confetti() -> Effect {
    fx::parallel(&[
        fx::coalesce((CONFETTI_MS, Interpolation::QuadOut)),
        fx::fade_from_fg(Color::Yellow, (CONFETTI_MS, Interpolation::SineOut)),
    ])
}

/// Plays the confetti effect over the frame until it finishes.
pub struct Confetti {
    effect: Option<Effect>,
    last_frame_ms: Option<f64>,
    /// Number of bursts started since page load.
    pub bursts: u32,
}

impl Confetti {
    pub fn new() -> Self {
        Self {
            effect: None,
            last_frame_ms: None,
            bursts: 0,
        }
    }

    pub fn start(&mut self) {
        self.effect = Some(confetti());
        self.last_frame_ms = None;
        self.bursts += 1;
    }

    pub fn is_playing(&self) -> bool {
        self.effect.is_some()
    }

    /// Apply the running effect to what has already been drawn in `area`.
    pub fn render(&mut self, f: &mut Frame, area: Rect, now_ms: f64) {
        let Some(effect) = self.effect.as_mut() else {
            return;
        };

        let elapsed = match self.last_frame_ms {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);

        effect.process(Duration::from_millis(elapsed as u32), f.buffer_mut(), area);
        if effect.done() {
            self.effect = None;
            self.last_frame_ms = None;
        }
    }
}

/// Handle that lets the game trigger confetti owned by the render loop.
#[derive(Clone)]
pub struct SharedConfetti(pub Rc<RefCell<Confetti>>);

impl EffectTrigger for SharedConfetti {
    fn celebrate(&mut self) {
        self.0.borrow_mut().start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celebrate_starts_burst() {
        let shared = Rc::new(RefCell::new(Confetti::new()));
        let mut trigger = SharedConfetti(shared.clone());
        assert!(!shared.borrow().is_playing());

        trigger.celebrate();
        assert!(shared.borrow().is_playing());
        assert_eq!(shared.borrow().bursts, 1);
    }

    #[test]
    fn restart_counts_bursts() {
        let mut c = Confetti::new();
        c.start();
        c.start();
        assert!(c.is_playing());
        assert_eq!(c.bursts, 2);
    }
}
