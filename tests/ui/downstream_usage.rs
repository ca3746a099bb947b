use zero_alloc_bitset::{Error, FixedBitSet};

fn survivors(candidates: &mut FixedBitSet, rejected: &FixedBitSet) -> Result<usize, Error> {
    candidates.and_not(rejected)?;
    Ok(candidates.popcount())
}

fn main() -> Result<(), Error> {
    let mut candidates = FixedBitSet::from_ones(64, 0..64)?;
    let rejected = FixedBitSet::from_ones(64, (0..64).step_by(2))?;
    assert_eq!(survivors(&mut candidates, &rejected)?, 32);

    let err = survivors(&mut candidates, &FixedBitSet::new(8)).unwrap_err();
    assert_eq!(
        err,
        Error::LengthMismatch {
            expected: 8,
            found: 1
        }
    );
    let _: &dyn std::error::Error = &err;
    Ok(())
}
