/// Catch the Dip: buy at the bottom of a simulated price run.

pub mod actions;
pub mod celebrate;
pub mod logic;
pub mod render;
pub mod rng;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::console::{self, RoundEvent};
use crate::games::Game;
use crate::input::{ClickState, InputEvent};
use crate::time::TickTimer;

use actions::*;
use celebrate::EffectTrigger;
use logic::TickOutcome;
use rng::RandomSource;
use state::{DipState, TICK_MS};

/// One game session: the current round plus the timer that drives it.
pub struct DipGame {
    pub state: DipState,
    /// At most one tick stream per session; restarted on every new round.
    timer: TickTimer,
    rng: Box<dyn RandomSource>,
    effects: Box<dyn EffectTrigger>,
    revision: u64,
}

impl DipGame {
    /// Start a session with the first round already running.
    pub fn new(mut rng: Box<dyn RandomSource>, effects: Box<dyn EffectTrigger>) -> Self {
        let state = DipState::new(logic::seed_price(&mut *rng));
        let mut timer = TickTimer::new(TICK_MS);
        timer.start();
        console::record(&RoundEvent::Started {
            opening_price: state.last_price(),
        });

        Self {
            state,
            timer,
            rng,
            effects,
            revision: 0,
        }
    }

    /// Feed the frame clock; processes however many ticks are due.
    pub fn advance(&mut self, now_ms: f64) {
        let due = self.timer.update(now_ms);
        if due > 0 {
            self.tick(due);
        }
    }

    /// Buy at the current tick. Returns false if the buy was ignored.
    pub fn buy(&mut self) -> bool {
        match logic::buy(&mut self.state) {
            Some(index) => {
                self.revision += 1;
                console::record(&RoundEvent::Bought {
                    index,
                    price: self.state.series[index].price,
                });
                true
            }
            None => false,
        }
    }

    /// Abandon the current round (running or not) and start a fresh one.
    pub fn reset(&mut self) {
        let mid_round = !self.state.is_over();
        self.timer.cancel();
        self.state = DipState::new(logic::seed_price(&mut *self.rng));
        self.timer.start();
        self.revision += 1;

        console::record(&RoundEvent::Reset { mid_round });
        console::record(&RoundEvent::Started {
            opening_price: self.state.last_price(),
        });
    }

    /// Bumped on every state change; poll to detect updates.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    fn end_round(&mut self) {
        self.timer.cancel();

        if let Some(dip_index) = self.state.dip_index {
            let score = logic::score(&self.state);
            console::record(&RoundEvent::Ended {
                dip_index,
                dip_price: self.state.series[dip_index].price,
                buy_index: self.state.buy_index,
                win: score.map(|s| s.win).unwrap_or(false),
            });
        }

        if logic::claim_celebration(&mut self.state) {
            self.effects.celebrate();
        }
    }
}

impl Game for DipGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key('b') | InputEvent::Key(' ') | InputEvent::Click(BUY) => {
                self.buy();
                true
            }
            InputEvent::Key('r') | InputEvent::Click(PLAY_AGAIN) => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    fn tick(&mut self, delta_ticks: u32) {
        for _ in 0..delta_ticks {
            match logic::tick(&mut self.state, &mut *self.rng) {
                TickOutcome::Appended => self.revision += 1,
                TickOutcome::Ended => {
                    self.revision += 1;
                    self.end_round();
                    break;
                }
                TickOutcome::Idle => break,
            }
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}
