/// Catch the Dip game logic. Pure functions, fully testable.

use super::rng::RandomSource;
use super::state::{
    DipState, Phase, Score, PRICE_CEILING, PRICE_FLOOR, SEED_BASE, SEED_SPREAD, VOLATILITY,
};

/// What a single tick did to the round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// A new point was appended; the round continues.
    Appended,
    /// The series was full; the dip is revealed and the round is over.
    Ended,
    /// The round was already over; nothing changed.
    Idle,
}

/// Round to cents.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Opening price for a new round, uniform on `[35, 55)`.
pub fn seed_price<R: RandomSource + ?Sized>(rng: &mut R) -> f64 {
    round_cents(SEED_BASE + rng.next_unit() * SEED_SPREAD)
}

/// Next price: a random move of up to ±15 around `previous`, kept in range.
pub fn next_price<R: RandomSource + ?Sized>(previous: f64, rng: &mut R) -> f64 {
    let moved = previous + (rng.next_unit() - 0.5) * VOLATILITY;
    round_cents(moved).clamp(PRICE_FLOOR, PRICE_CEILING)
}

/// Index of the lowest price; ties go to the earliest index.
pub fn dip_index(state: &DipState) -> usize {
    state
        .series
        .iter()
        .enumerate()
        .fold(0, |min_idx, (idx, point)| {
            if point.price < state.series[min_idx].price {
                idx
            } else {
                min_idx
            }
        })
}

/// Advance the round by one tick.
pub fn tick<R: RandomSource + ?Sized>(state: &mut DipState, rng: &mut R) -> TickOutcome {
    if state.is_over() {
        return TickOutcome::Idle;
    }

    if state.is_full() {
        state.dip_index = Some(dip_index(state));
        state.phase = Phase::Ended;
        return TickOutcome::Ended;
    }

    let price = next_price(state.last_price(), rng);
    state.push_price(price);
    TickOutcome::Appended
}

/// Register a buy at the current tick. Returns the buy index, or `None`
/// if the round is over or the player already bought.
pub fn buy(state: &mut DipState) -> Option<usize> {
    if state.is_over() || state.buy_index.is_some() {
        return None;
    }
    let index = state.current_index();
    state.buy_index = Some(index);
    Some(index)
}

/// Score of a finished round. `None` while running or if the player never bought.
pub fn score(state: &DipState) -> Option<Score> {
    if !state.is_over() {
        return None;
    }
    let buy = state.buy_point()?;
    let dip = state.dip_point()?;
    Some(Score {
        buy_price: buy.price,
        dip_price: dip.price,
        win: state.buy_index == state.dip_index,
    })
}

/// Returns true exactly once per round, the first time it is called after
/// a winning round has ended.
pub fn claim_celebration(state: &mut DipState) -> bool {
    if state.celebration_fired {
        return false;
    }
    match score(state) {
        Some(s) if s.win => {
            state.celebration_fired = true;
            true
        }
        _ => false,
    }
}
