use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for reply selection.
pub trait ReplyPicker: Send {
    /// Return an index in `0..candidates`. `candidates` is never zero.
    fn pick(&mut self, candidates: usize) -> usize;
}

/// Uniform choice with replacement.
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl ReplyPicker for RandomPicker {
    fn pick(&mut self, candidates: usize) -> usize {
        self.rng.random_range(0..candidates)
    }
}
