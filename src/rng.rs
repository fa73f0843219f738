use crate::Direction;

/// A source of random `u64`s, supplied by the caller. Any reasonable PRNG
/// works here: this crate never seeds or owns one itself for
/// caller-facing randomness (maze carving, the occasional goal jitter);
/// it only consumes a stream.
///
/// Implemented for any `FnMut() -> u64`, so a closure over `rand`'s
/// `ThreadRng`, a `SmallRng`, or a hand-rolled generator all work without
/// an adapter type.
pub trait Rng {
    fn next_u64(&mut self) -> u64;

    /// Draws a `u64` in `[0, bound)` using Lemire's rejection-free bias
    /// reduction. `bound == 0` always returns `0`.
    #[inline]
    fn bounded(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        let mut x = self.next_u64();
        let mut m = (x as u128) * (bound as u128);
        let mut l = m as u64;
        if l < bound {
            let t = bound.wrapping_neg() % bound;
            while l < t {
                x = self.next_u64();
                m = (x as u128) * (bound as u128);
                l = m as u64;
            }
        }
        (m >> 64) as u64
    }
}

impl<F: FnMut() -> u64> Rng for F {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        self()
    }
}

/// A small deterministic generator used internally by the greedy-descent
/// tie-break shuffle (see [`shuffle_directions`]), not exposed for general
/// use. Splitmix64, chosen for its single multiply-xor step and good
/// avalanche from a plain integer seed.
struct SplitMix64(u64);

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl Rng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.next()
    }
}

/// Reseeds a deterministic local generator from `(start_hash, target_count)`
/// and shuffles `directions` in place with Fisher-Yates.
///
/// Under [`crate::Measurement::Euclidean`] the first four slots (cardinals)
/// and the remaining slots (diagonals) are shuffled independently, so
/// cardinals are always tried before diagonals, reproduced verbatim from
/// the reference behaviour this crate's greedy descent is modeled on; it is
/// unclear whether this was an intentional bias toward cardinal movement or
/// an artifact, so it is preserved rather than "fixed".
pub fn shuffle_directions(directions: &mut [Direction], start_hash: u64, target_count: usize) {
    let mut rng = SplitMix64::new(start_hash ^ (target_count as u64).wrapping_mul(0x2545F4914F6CDD1D));
    if directions.len() > 4 && directions[..4].iter().all(Direction::is_cardinal) {
        let (cardinals, diagonals) = directions.split_at_mut(4);
        fisher_yates(cardinals, &mut rng);
        fisher_yates(diagonals, &mut rng);
    } else {
        fisher_yates(directions, &mut rng);
    }
}

fn fisher_yates<R: Rng>(slice: &mut [Direction], rng: &mut R) {
    for i in (1..slice.len()).rev() {
        let j = rng.bounded((i + 1) as u64) as usize;
        slice.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OUTWARDS;

    #[test]
    fn same_seed_same_shuffle() {
        let mut a = OUTWARDS;
        let mut b = OUTWARDS;
        shuffle_directions(&mut a, 42, 3);
        shuffle_directions(&mut b, 42, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_usually_differs() {
        let mut a = OUTWARDS;
        let mut b = OUTWARDS;
        shuffle_directions(&mut a, 42, 3);
        shuffle_directions(&mut b, 1337, 3);
        assert_ne!(a, b);
    }

    #[test]
    fn euclidean_shuffle_keeps_cardinal_diagonal_partition() {
        let mut dirs = OUTWARDS;
        shuffle_directions(&mut dirs, 7, 1);
        for d in &dirs[..4] {
            assert!(d.is_cardinal());
        }
        for d in &dirs[4..] {
            assert!(d.is_diagonal());
        }
    }

    #[test]
    fn closure_impls_rng() {
        let mut state = 0u64;
        let mut closure = || {
            state = state.wrapping_add(1);
            state
        };
        assert_eq!(closure.next_u64(), 1);
        assert_eq!(closure.next_u64(), 2);
    }
}
