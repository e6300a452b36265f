/// Catch the Dip round state definitions.

/// Number of points in a finished series.
pub const MAX_POINTS: usize = 26;
/// Milliseconds between ticks.
pub const TICK_MS: u32 = 400;

pub const PRICE_FLOOR: f64 = 10.0;
pub const PRICE_CEILING: f64 = 60.0;
/// The opening price is drawn from `[SEED_BASE, SEED_BASE + SEED_SPREAD)`.
pub const SEED_BASE: f64 = 35.0;
pub const SEED_SPREAD: f64 = 20.0;
/// Width of the per-tick price move, centred on zero.
pub const VOLATILITY: f64 = 30.0;
/// Padding above and below the price range on the chart's Y axis.
pub const CHART_PADDING: f64 = 10.0;

/// A single weekly price.
#[derive(Clone, Debug, PartialEq)]
pub struct PricePoint {
    /// 1-indexed position in the series.
    pub week: usize,
    pub price: f64,
}

impl PricePoint {
    pub fn label(&self) -> String {
        format!("Week {}", self.week)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Running,
    Ended,
}

/// Result of a finished round in which the player bought.
#[derive(Clone, Debug, PartialEq)]
pub struct Score {
    pub buy_price: f64,
    pub dip_price: f64,
    pub win: bool,
}

/// Everything that belongs to one round. Replaced wholesale on reset.
#[derive(Clone, Debug)]
pub struct DipState {
    pub series: Vec<PricePoint>,
    pub buy_index: Option<usize>,
    /// Set exactly when the phase becomes `Ended`.
    pub dip_index: Option<usize>,
    pub phase: Phase,
    /// The win celebration fires at most once per round.
    pub celebration_fired: bool,
}

impl DipState {
    pub fn new(opening_price: f64) -> Self {
        Self {
            series: vec![PricePoint {
                week: 1,
                price: opening_price,
            }],
            buy_index: None,
            dip_index: None,
            phase: Phase::Running,
            celebration_fired: false,
        }
    }

    /// Build a state from a list of prices, still running.
    #[cfg(test)]
    pub fn from_prices(prices: &[f64]) -> Self {
        let mut state = Self::new(prices[0]);
        for &price in &prices[1..] {
            state.push_price(price);
        }
        state
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub fn is_full(&self) -> bool {
        self.series.len() >= MAX_POINTS
    }

    /// Index of the most recently appended point.
    pub fn current_index(&self) -> usize {
        self.series.len() - 1
    }

    pub fn last_price(&self) -> f64 {
        self.series[self.current_index()].price
    }

    pub fn push_price(&mut self, price: f64) {
        let week = self.series.len() + 1;
        self.series.push(PricePoint { week, price });
    }

    pub fn buy_point(&self) -> Option<&PricePoint> {
        self.buy_index.and_then(|i| self.series.get(i))
    }

    pub fn dip_point(&self) -> Option<&PricePoint> {
        self.dip_index.and_then(|i| self.series.get(i))
    }

    pub fn min_price(&self) -> f64 {
        self.series.iter().map(|p| p.price).fold(f64::INFINITY, f64::min)
    }

    pub fn max_price(&self) -> f64 {
        self.series
            .iter()
            .map(|p| p.price)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
