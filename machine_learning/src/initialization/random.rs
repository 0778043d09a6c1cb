use std::{cell::RefCell, rc::Rc};

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::ParamGen;
use crate::Result;

/// A parameter generator that follows a certain probabilistic distribution.
///
/// The random number generator is shared so that many generators can be chained while drawing
/// from the same seeded stream.
pub struct RandParamGen<R: Rng, D: Distribution<f32>> {
    rng: Rc<RefCell<R>>,
    distribution: D,
    remaining: usize,
}

impl<R: Rng, D: Distribution<f32>> RandParamGen<R, D> {
    /// Creates a new `RandParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `distribution` - The distribution to sample the random numbers from.
    /// * `limit` - The maximum amount of numbers to generate.
    pub fn new(rng: Rc<RefCell<R>>, distribution: D, limit: usize) -> Self {
        Self {
            rng,
            distribution,
            remaining: limit,
        }
    }
}

impl<R: Rng> RandParamGen<R, Uniform<f32>> {
    /// Creates a new `RandParamGen` with an inclusive uniform distribution.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `limit` - The maximum amount of numbers to generate.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The inclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low > high or not finite).
    pub fn uniform_inclusive(
        rng: Rc<RefCell<R>>,
        limit: usize,
        low: f32,
        high: f32,
    ) -> Result<Self> {
        Ok(Self::new(rng, Uniform::new_inclusive(low, high)?, limit))
    }

    /// Creates a new `RandParamGen` sampling from `[-rate, rate]`.
    pub fn symmetric(rng: Rc<RefCell<R>>, limit: usize, rate: f32) -> Result<Self> {
        Self::uniform_inclusive(rng, limit, -rate, rate)
    }
}

impl<R: Rng, D: Distribution<f32>> ParamGen for RandParamGen<R, D> {
    fn sample(&mut self, mut n: usize) -> Option<Vec<f32>> {
        if self.remaining == 0 {
            return None;
        }

        n = n.min(self.remaining);
        self.remaining -= n;

        let mut rng = self.rng.borrow_mut();
        let sample = (0..n).map(|_| self.distribution.sample(&mut *rng)).collect();
        Some(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded_rng() -> Rc<RefCell<StdRng>> {
        Rc::new(RefCell::new(StdRng::seed_from_u64(42)))
    }

    #[test]
    fn exact() {
        const SIZE: usize = 10;

        let mut param_gen = RandParamGen::symmetric(seeded_rng(), SIZE, 1.).unwrap();
        let sample = param_gen.sample(SIZE).unwrap();

        assert_eq!(sample.len(), SIZE);
        assert!(param_gen.sample(1).is_none());
    }

    #[test]
    fn stays_within_the_rate() {
        let mut param_gen = RandParamGen::symmetric(seeded_rng(), 1000, 2.5).unwrap();
        let sample = param_gen.sample(1000).unwrap();

        assert!(sample.iter().all(|x| (-2.5..=2.5).contains(x)));
        assert!(sample.iter().any(|&x| x < 0.));
        assert!(sample.iter().any(|&x| x > 0.));
    }

    #[test]
    fn same_seed_same_sample() {
        let mut a = RandParamGen::symmetric(seeded_rng(), 5, 1.).unwrap();
        let mut b = RandParamGen::symmetric(seeded_rng(), 5, 1.).unwrap();

        assert_eq!(a.sample(5), b.sample(5));
    }

    #[test]
    fn shared_rng_advances() {
        let rng = seeded_rng();
        let mut a = RandParamGen::symmetric(rng.clone(), 5, 1.).unwrap();
        let mut b = RandParamGen::symmetric(rng, 5, 1.).unwrap();

        assert_ne!(a.sample(5), b.sample(5));
    }

    #[test]
    fn invalid_range() {
        assert!(RandParamGen::uniform_inclusive(seeded_rng(), 1, 1., -1.).is_err());
        assert!(RandParamGen::symmetric(seeded_rng(), 1, f32::NAN).is_err());
    }
}
