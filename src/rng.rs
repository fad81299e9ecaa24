use std::collections::HashMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One master generator, one derived stream per named consumer. Streams are
/// seeded in first-use order, which is fixed by the system registration order.
pub struct RngManager {
    master: ChaCha8Rng,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            master: ChaCha8Rng::seed_from_u64(seed),
            streams: HashMap::new(),
        }
    }

    pub fn stream(&mut self, name: &str) -> SystemRng<'_> {
        let master = &mut self.master;
        let inner = self
            .streams
            .entry(name.to_string())
            .or_insert_with(|| ChaCha8Rng::seed_from_u64(master.next_u64()));
        SystemRng { inner }
    }
}

pub struct SystemRng<'a> {
    inner: &'a mut ChaCha8Rng,
}

impl<'a> RngCore for SystemRng<'a> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_yields_same_stream() {
        let mut a = RngManager::new(7);
        let mut b = RngManager::new(7);
        let draws_a: Vec<u64> = (0..8).map(|_| a.stream("volcanism").next_u64()).collect();
        let draws_b: Vec<u64> = (0..8).map(|_| b.stream("volcanism").next_u64()).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn named_streams_are_independent() {
        let mut a = RngManager::new(7);
        let mut b = RngManager::new(7);
        a.stream("volcanism");
        b.stream("volcanism");
        a.stream("biosphere");
        b.stream("biosphere");
        for _ in 0..100 {
            a.stream("biosphere").next_u64();
        }
        assert_eq!(
            a.stream("volcanism").next_u64(),
            b.stream("volcanism").next_u64(),
            "draws in one stream must not shift another"
        );
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = RngManager::new(1);
        let mut b = RngManager::new(2);
        assert_ne!(a.stream("volcanism").next_u64(), b.stream("volcanism").next_u64());
    }
}
