/// The logistic sigmoid, scaled by `amp`.
#[derive(Clone, Copy, Debug)]
pub struct Sigmoid {
    amp: f32,
}

impl Sigmoid {
    pub fn new(amp: f32) -> Self {
        Self { amp }
    }

    pub fn f(&self, z: f32) -> f32 {
        self.amp / (1. + (-z).exp())
    }
}

impl Default for Sigmoid {
    fn default() -> Self {
        Self::new(1.)
    }
}
