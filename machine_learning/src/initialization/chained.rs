use super::ParamGen;

/// A parameter generator that delegates the generation to a chain of parameter generators.
///
/// Each generator of the chain knows how many values it has to produce, so one can have for
/// example a random generator for the weights of a layer followed by a constant one for its
/// biases.
pub struct ChainedParamGen<'a> {
    param_gens: Vec<Box<dyn ParamGen + 'a>>,
    curr: usize,
}

impl<'a> ChainedParamGen<'a> {
    /// Creates a new `ChainedParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `param_gens` - A vec of potentially different parameter generators.
    pub fn new(param_gens: Vec<Box<dyn ParamGen + 'a>>) -> Self {
        Self {
            param_gens,
            curr: 0,
        }
    }
}

impl ParamGen for ChainedParamGen<'_> {
    fn sample(&mut self, n: usize) -> Option<Vec<f32>> {
        if self.curr == self.param_gens.len() {
            return None;
        }

        match self.param_gens[self.curr].sample(n) {
            Some(sample) if sample.len() == n => Some(sample),
            Some(mut sample) => {
                self.curr += 1;

                if let Some(next_sample) = self.sample(n - sample.len()) {
                    sample.extend(next_sample);
                }

                Some(sample)
            }
            None => {
                self.curr += 1;
                self.sample(n)
            }
        }
    }
}
