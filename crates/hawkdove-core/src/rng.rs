/// Deterministic RNG helpers.
///
/// Every random draw in the engine goes through a generator that is passed in
/// explicitly, so a sweep is reproducible from its seeds alone. This is **not**
/// cryptographic.

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    /// Uniform index in `0..bound`, unbiased by rejection.
    fn gen_index(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "empty range");
        let span = bound as u64;
        let threshold = u64::MAX - (u64::MAX % span);
        loop {
            let x = self.next_u64();
            if x < threshold {
                return (x % span) as usize;
            }
        }
    }

    /// In-place Fisher-Yates shuffle, walking from the back.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.gen_index(i + 1);
            items.swap(i, j);
        }
    }

    /// A uniformly random permutation of `0..len`.
    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..len).collect();
        self.shuffle(&mut perm);
        perm
    }
}

/// SplitMix64: good seeding RNG and small deterministic generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn step(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        mix64(self.state)
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.step()
    }
}

const GOLDEN_GAMMA: u64 = 0x9E3779B97F4A7C15;

pub fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Independent random streams carved out of one user seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum Stream {
    InitialGrid = 1,
    TieBreak = 2,
    Shuffle = 3,
}

pub fn derive_seed(global_seed: u64, id: u64, stream: Stream) -> u64 {
    let x = global_seed ^ mix64(id.wrapping_add(GOLDEN_GAMMA)) ^ mix64(stream as u64);
    mix64(x)
}
