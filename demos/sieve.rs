use zero_alloc_bitset::{Error, FixedBitSet};

/// Marks every composite below `composites.bit_len()` in `composites`,
/// reusing both buffers across calls.
fn sieve(composites: &mut FixedBitSet, multiples: &mut FixedBitSet) -> Result<(), Error> {
    let limit = composites.bit_len();
    composites.zero();
    for idx in 0..limit.min(2) {
        composites.set(idx)?;
    }

    let mut p = 2;
    while p * p < limit {
        if !composites.get(p)? {
            multiples.zero();
            for multiple in (p * p..limit).step_by(p) {
                multiples.set(multiple)?;
            }
            composites.or(multiples)?;
        }
        p += 1;
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    const LIMIT: usize = 100;
    let mut composites = FixedBitSet::new(LIMIT);
    let mut multiples = FixedBitSet::new(LIMIT);

    for _ in 0..3 {
        sieve(&mut composites, &mut multiples)?;
    }

    let primes: Vec<usize> = composites.iter_zeros().collect();
    println!("{} primes below {LIMIT}: {primes:?}", primes.len());
    println!("{composites}");
    Ok(())
}
