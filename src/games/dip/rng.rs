//! Randomness source for price generation.

/// A source of uniform draws on `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// 64-bit linear congruential generator.
#[derive(Clone, Debug)]
pub struct Lcg {
    seed: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the page clock and the browser's RNG.
    ///
    /// Only meaningful in the browser; native builds use [`Lcg::new`].
    pub fn from_entropy() -> Self {
        let clock = js_sys::Date::now() as u64;
        let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
        Self::new(clock ^ (noise << 32))
    }

    fn next_u64(&mut self) -> u64 {
        self.seed = self
            .seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.seed
    }
}

impl RandomSource for Lcg {
    fn next_unit(&mut self) -> f64 {
        // Top 53 bits → exact f64 mantissa, never reaches 1.0
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Replays a fixed list of draws, then repeats the last one.
#[cfg(test)]
pub struct Scripted {
    draws: Vec<f64>,
    pos: usize,
}

#[cfg(test)]
impl Scripted {
    pub fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.to_vec(),
            pos: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for Scripted {
    fn next_unit(&mut self) -> f64 {
        let draw = self.draws[self.pos.min(self.draws.len() - 1)];
        self.pos += 1;
        draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_unit_interval() {
        let mut rng = Lcg::new(42);
        for _ in 0..10_000 {
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u), "draw out of range: {}", u);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Lcg::new(12345);
        let mut b = Lcg::new(12345);
        for _ in 0..100 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }

    #[test]
    fn draws_spread_across_interval() {
        let mut rng = Lcg::new(999);
        let n = 10_000;
        let below_half = (0..n).filter(|_| rng.next_unit() < 0.5).count();
        assert!((4_500..5_500).contains(&below_half), "skewed: {}", below_half);
    }

    #[test]
    fn scripted_repeats_last_draw() {
        let mut s = Scripted::new(&[0.1, 0.9]);
        assert_eq!(s.next_unit(), 0.1);
        assert_eq!(s.next_unit(), 0.9);
        assert_eq!(s.next_unit(), 0.9);
    }
}
