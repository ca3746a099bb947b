use crate::Error;
use alloc::boxed::Box;
use alloc::vec;
use core::fmt::{self, Debug, Display, Formatter, Write};
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use tracing::{debug, trace};

/// Computes the number of bytes needed to store `bit_count` bits.
///
/// # Examples
/// ```
/// use zero_alloc_bitset::byte_len_for;
///
/// assert_eq!(byte_len_for(0), 0);
/// assert_eq!(byte_len_for(9), 2);
/// assert_eq!(byte_len_for(16), 2);
/// assert_eq!(byte_len_for(100), 13);
/// ```
pub const fn byte_len_for(bit_count: usize) -> usize {
    bit_count.div_ceil(8)
}

/// Mask selecting the logical bits of the last byte of a `bit_count` long
/// bitset.
pub(crate) const fn last_byte_mask(bit_count: usize) -> u8 {
    match bit_count % 8 {
        0 => !0u8,
        used => (1u8 << used) - 1,
    }
}

/// A bitset whose length is fixed at construction.
///
/// Bit `i` lives in byte `i >> 3` at bit position `i & 7`, with bit 0 being
/// the least significant bit of a byte. The backing buffer holds exactly
/// [`byte_len_for`]`(len)` bytes. It is allocated once by [`new`] and never
/// reallocated.
///
/// Apart from construction (including [`Clone`]) and turning the bitset into
/// an owned `String`, no operation allocates.
///
/// If `len` is not a multiple of 8, the last byte carries padding bits that
/// are not part of the bitset. Their value is unspecified: the byte-wise
/// operations ([`and`], [`or`], [`and_not`], [`copy_from`]) and writes
/// through [`bytes_mut`] may leave them set. Counting, iteration, equality
/// and hashing ignore them.
///
/// [`new`]: FixedBitSet::new
/// [`and`]: FixedBitSet::and
/// [`or`]: FixedBitSet::or
/// [`and_not`]: FixedBitSet::and_not
/// [`copy_from`]: FixedBitSet::copy_from
/// [`bytes_mut`]: FixedBitSet::bytes_mut
#[derive(Clone)]
pub struct FixedBitSet {
    len: usize,
    bits: Box<[u8]>,
}

impl FixedBitSet {
    /// Creates a bitset of `len` bits, all unset.
    ///
    /// This allocates the backing buffer of [`byte_len_for`]`(len)` bytes. A
    /// zero length bitset does not allocate at all.
    ///
    /// # Examples
    /// ```
    /// use zero_alloc_bitset::FixedBitSet;
    ///
    /// let bits = FixedBitSet::new(100);
    /// assert_eq!(bits.bit_len(), 100);
    /// assert_eq!(bits.byte_len(), 13);
    /// assert_eq!(bits.popcount(), 0);
    /// ```
    pub fn new(len: usize) -> Self {
        let bits = vec![0u8; byte_len_for(len)].into_boxed_slice();
        trace!(bits = len, bytes = bits.len(), "allocated bitset");
        Self { len, bits }
    }

    /// Creates a bitset of `len` bits with only the given indices set.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] for the first index `>= len`.
    ///
    /// # Examples
    /// ```
    /// use zero_alloc_bitset::FixedBitSet;
    ///
    /// let bits = FixedBitSet::from_ones(5, [0, 2, 4]).unwrap();
    /// assert!(bits.get(2).unwrap());
    /// assert!(!bits.get(1).unwrap());
    /// assert!(FixedBitSet::from_ones(5, [5]).is_err());
    /// ```
    pub fn from_ones<I: IntoIterator<Item = usize>>(len: usize, indices: I) -> Result<Self, Error> {
        let mut bitset = Self::new(len);
        for idx in indices {
            bitset.set(idx)?;
        }
        Ok(bitset)
    }

    /// Sets the bit at the given index.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `idx >= self.bit_len()`.
    ///
    /// # Examples
    /// ```
    /// use zero_alloc_bitset::FixedBitSet;
    ///
    /// let mut bits = FixedBitSet::new(32);
    /// bits.set(9).unwrap();
    /// assert_eq!(bits.bytes()[1], 0b10);
    /// ```
    #[inline]
    pub fn set(&mut self, idx: usize) -> Result<(), Error> {
        let (byte_idx, mask) = self.locate(idx)?;
        self.bits[byte_idx] |= mask;
        Ok(())
    }

    /// Clears the bit at the given index.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `idx >= self.bit_len()`.
    ///
    /// # Examples
    /// ```
    /// use zero_alloc_bitset::FixedBitSet;
    ///
    /// let mut bits = FixedBitSet::new(8);
    /// bits.set(3).unwrap();
    /// bits.clear(3).unwrap();
    /// assert!(!bits.get(3).unwrap());
    /// ```
    #[inline]
    pub fn clear(&mut self, idx: usize) -> Result<(), Error> {
        let (byte_idx, mask) = self.locate(idx)?;
        self.bits[byte_idx] &= !mask;
        Ok(())
    }

    /// Returns `true` if the bit at the given index is set.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `idx >= self.bit_len()`.
    ///
    /// # Examples
    /// ```
    /// use zero_alloc_bitset::{Error, FixedBitSet};
    ///
    /// let mut bits = FixedBitSet::new(100);
    /// bits.set(65).unwrap();
    /// assert_eq!(bits.get(65), Ok(true));
    /// assert_eq!(bits.get(0), Ok(false));
    /// assert_eq!(bits.get(100), Err(Error::OutOfRange { idx: 100, len: 100 }));
    /// ```
    #[inline]
    pub fn get(&self, idx: usize) -> Result<bool, Error> {
        let (byte_idx, mask) = self.locate(idx)?;
        Ok(self.bits[byte_idx] & mask != 0)
    }

    #[inline]
    fn locate(&self, idx: usize) -> Result<(usize, u8), Error> {
        if idx >= self.len {
            return Err(Error::OutOfRange { idx, len: self.len });
        }
        Ok((idx >> 3, 1 << (idx & 7)))
    }

    /// Returns the number of bits, as given at construction.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.len
    }

    /// Returns the number of bytes in the backing buffer.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` if the bitset holds no bits at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Performs an in-place bitwise AND with `other`.
    ///
    /// Works byte-wise over the whole buffer, padding bits included.
    ///
    /// # Errors
    /// Returns [`Error::LengthMismatch`] if the byte lengths differ. `self` is
    /// left untouched in that case.
    ///
    /// # Examples
    /// ```
    /// use zero_alloc_bitset::FixedBitSet;
    ///
    /// let mut a = FixedBitSet::from_ones(100, [1, 27]).unwrap();
    /// let b = FixedBitSet::from_ones(100, [25, 27]).unwrap();
    /// a.and(&b).unwrap();
    /// assert_eq!(a.iter_ones().collect::<Vec<_>>(), [27]);
    /// ```
    #[inline]
    pub fn and(&mut self, other: &Self) -> Result<(), Error> {
        self.check_same_byte_len(other)?;
        for (self_byte, other_byte) in self.bits.iter_mut().zip(other.bits.iter()) {
            *self_byte &= other_byte
        }
        Ok(())
    }

    /// Performs an in-place `self & !other`, clearing every bit set in
    /// `other`.
    ///
    /// # Errors
    /// Returns [`Error::LengthMismatch`] if the byte lengths differ. `self` is
    /// left untouched in that case.
    ///
    /// # Examples
    /// ```
    /// use zero_alloc_bitset::FixedBitSet;
    ///
    /// let mut a = FixedBitSet::from_ones(10, [1, 4, 7]).unwrap();
    /// let b = FixedBitSet::from_ones(10, [4, 9]).unwrap();
    /// a.and_not(&b).unwrap();
    /// assert_eq!(a.iter_ones().collect::<Vec<_>>(), [1, 7]);
    /// ```
    #[inline]
    pub fn and_not(&mut self, other: &Self) -> Result<(), Error> {
        self.check_same_byte_len(other)?;
        for (self_byte, other_byte) in self.bits.iter_mut().zip(other.bits.iter()) {
            *self_byte &= !other_byte
        }
        Ok(())
    }

    /// Performs an in-place bitwise OR with `other`.
    ///
    /// # Errors
    /// Returns [`Error::LengthMismatch`] if the byte lengths differ. `self` is
    /// left untouched in that case.
    ///
    /// # Examples
    /// ```
    /// use zero_alloc_bitset::FixedBitSet;
    ///
    /// let mut a = FixedBitSet::from_ones(10, [1]).unwrap();
    /// let b = FixedBitSet::from_ones(10, [8]).unwrap();
    /// a.or(&b).unwrap();
    /// assert_eq!(a.iter_ones().collect::<Vec<_>>(), [1, 8]);
    /// ```
    #[inline]
    pub fn or(&mut self, other: &Self) -> Result<(), Error> {
        self.check_same_byte_len(other)?;
        for (self_byte, other_byte) in self.bits.iter_mut().zip(other.bits.iter()) {
            *self_byte |= other_byte
        }
        Ok(())
    }

    /// Unsets every bit.
    #[inline]
    pub fn zero(&mut self) {
        self.bits.fill(0);
    }

    /// Overwrites the buffer of `self` with the buffer of `other`.
    ///
    /// The two bitsets stay independent afterwards.
    ///
    /// # Errors
    /// Returns [`Error::LengthMismatch`] if the byte lengths differ. `self` is
    /// left untouched in that case.
    ///
    /// # Examples
    /// ```
    /// use zero_alloc_bitset::FixedBitSet;
    ///
    /// let mut a = FixedBitSet::new(20);
    /// let b = FixedBitSet::from_ones(20, [3, 19]).unwrap();
    /// a.copy_from(&b).unwrap();
    /// assert_eq!(a.bytes(), b.bytes());
    /// assert!(a.copy_from(&FixedBitSet::new(40)).is_err());
    /// ```
    #[inline]
    pub fn copy_from(&mut self, other: &Self) -> Result<(), Error> {
        self.check_same_byte_len(other)?;
        self.bits.copy_from_slice(&other.bits);
        Ok(())
    }

    fn check_same_byte_len(&self, other: &Self) -> Result<(), Error> {
        if self.bits.len() != other.bits.len() {
            debug!(
                expected = self.bits.len(),
                found = other.bits.len(),
                "rejected operand with different byte length"
            );
            return Err(Error::LengthMismatch {
                expected: self.bits.len(),
                found: other.bits.len(),
            });
        }
        Ok(())
    }

    /// Returns the backing buffer without copying.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Returns the backing buffer for writing, without copying.
    ///
    /// The slice *is* the bitset's storage: writes through it change what
    /// [`get`] and every other operation observe. Bits written at or beyond
    /// [`bit_len`] in the last byte are padding and are ignored by counting,
    /// iteration and equality.
    ///
    /// # Examples
    /// ```
    /// use zero_alloc_bitset::FixedBitSet;
    ///
    /// let mut bits = FixedBitSet::new(16);
    /// bits.bytes_mut()[1] = 0b100;
    /// assert!(bits.get(10).unwrap());
    /// ```
    ///
    /// [`get`]: FixedBitSet::get
    /// [`bit_len`]: FixedBitSet::bit_len
    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bits
    }

    /// Returns the number of set bits in `[0, bit_len)`.
    ///
    /// Padding bits of the last byte are masked out before counting.
    ///
    /// # Examples
    /// ```
    /// use zero_alloc_bitset::FixedBitSet;
    ///
    /// let mut bits = FixedBitSet::new(100);
    /// bits.bytes_mut()[12] = 0xff; // bits 96..100 plus 4 padding bits
    /// assert_eq!(bits.popcount(), 4);
    /// ```
    #[inline]
    pub fn popcount(&self) -> usize {
        let Some((last, full)) = self.bits.split_last() else {
            return 0;
        };
        let full: usize = full.iter().map(|b| b.count_ones() as usize).sum();
        full + (last & last_byte_mask(self.len)).count_ones() as usize
    }

    /// Returns an iterator over all bits as `bool`, from index 0 upwards.
    ///
    /// The iterator yields exactly `bit_len()` items.
    ///
    /// # Examples
    /// ```
    /// use zero_alloc_bitset::FixedBitSet;
    ///
    /// let bits = FixedBitSet::from_ones(4, [0, 2]).unwrap();
    /// assert_eq!(bits.iter().collect::<Vec<_>>(), [true, false, true, false]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            bytes: &self.bits,
            len: self.len,
            idx: 0,
        }
    }

    /// Returns an iterator over the indices of all set bits, in ascending
    /// order.
    ///
    /// Whole zero bytes are skipped, so draining the iterator runs in
    /// O(max(k, b)) where k is the number of set bits and b the byte length.
    ///
    /// # Examples
    /// ```
    /// use zero_alloc_bitset::FixedBitSet;
    ///
    /// let bits = FixedBitSet::from_ones(300, [299, 3, 64]).unwrap();
    /// assert_eq!(bits.iter_ones().collect::<Vec<_>>(), [3, 64, 299]);
    /// ```
    #[inline]
    pub fn iter_ones(&self) -> IterOnes<'_> {
        IterOnes {
            bytes: &self.bits,
            len: self.len,
            byte_idx: 0,
            current: logical_byte(&self.bits, 0, self.len),
            base_bit_idx: 0,
        }
    }

    /// Returns an iterator over the indices of all unset bits, in ascending
    /// order.
    ///
    /// # Examples
    /// ```
    /// use zero_alloc_bitset::FixedBitSet;
    ///
    /// let bits = FixedBitSet::from_ones(5, [0, 2, 4]).unwrap();
    /// assert_eq!(bits.iter_zeros().collect::<Vec<_>>(), [1, 3]);
    /// ```
    #[inline]
    pub fn iter_zeros(&self) -> IterZeros<'_> {
        IterZeros {
            bytes: &self.bits,
            len: self.len,
            byte_idx: 0,
            current: logical_zeros(&self.bits, 0, self.len),
            base_bit_idx: 0,
        }
    }

    fn logical_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.bits.len()).map(|byte_idx| logical_byte(&self.bits, byte_idx, self.len))
    }
}

/// Byte `byte_idx` with padding bits cleared; `0` past the end.
#[inline]
fn logical_byte(bytes: &[u8], byte_idx: usize, len: usize) -> u8 {
    match bytes.get(byte_idx) {
        Some(byte) if byte_idx + 1 == bytes.len() => byte & last_byte_mask(len),
        Some(byte) => *byte,
        None => 0,
    }
}

/// Inverted byte `byte_idx` with padding bits cleared; `0` past the end.
#[inline]
fn logical_zeros(bytes: &[u8], byte_idx: usize, len: usize) -> u8 {
    match bytes.get(byte_idx) {
        Some(byte) if byte_idx + 1 == bytes.len() => !byte & last_byte_mask(len),
        Some(byte) => !byte,
        None => 0,
    }
}

/// Bitsets are equal when they have the same length and the same logical
/// bits. Padding bits are not compared.
impl PartialEq for FixedBitSet {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.logical_bytes().eq(other.logical_bytes())
    }
}

impl Eq for FixedBitSet {}

impl Hash for FixedBitSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for byte in self.logical_bytes() {
            state.write_u8(byte);
        }
    }
}

impl<'bitset> IntoIterator for &'bitset FixedBitSet {
    type Item = bool;
    type IntoIter = Iter<'bitset>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for FixedBitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "LSB -> ")?;
        for (i, bit) in self.iter().enumerate() {
            if i % 8 == 0 {
                write!(f, "{i}: ")?;
            }
            f.write_char(if bit { '1' } else { '0' })?;
            if i % 8 == 7 && i + 1 < self.len {
                f.write_char(' ')?;
            }
        }
        write!(f, " <- MSB")
    }
}

/// Writes one `0`/`1` character per physical bit, least significant bit of
/// each byte first.
///
/// Padding bits are included, so the output is always `8 * byte_len()`
/// characters long. Formatting into a caller-provided buffer does not
/// allocate; `to_string()` does.
///
/// # Examples
/// ```
/// use zero_alloc_bitset::FixedBitSet;
///
/// let bits = FixedBitSet::from_ones(10, [0, 9]).unwrap();
/// assert_eq!(bits.to_string(), "1000000001000000");
/// ```
impl Display for FixedBitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in self.bits.iter() {
            for shift in 0..8u32 {
                f.write_char(if byte >> shift & 1 == 1 { '1' } else { '0' })?;
            }
        }
        Ok(())
    }
}

/// Iterator over all bits of a bitset as `bool` values.
///
/// Returned by [`FixedBitSet::iter()`].
#[derive(Clone, Copy)]
pub struct Iter<'bitset> {
    bytes: &'bitset [u8],
    len: usize,
    idx: usize,
}

impl Iterator for Iter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.len {
            return None;
        }
        let bit = self.bytes[self.idx >> 3] >> (self.idx & 7) & 1;
        self.idx += 1;
        Some(bit != 0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Iterator over the indices of set bits, in ascending order.
///
/// Returned by [`FixedBitSet::iter_ones()`].
#[derive(Clone, Copy)]
pub struct IterOnes<'bitset> {
    bytes: &'bitset [u8],
    len: usize,
    byte_idx: usize,
    current: u8,
    base_bit_idx: usize,
}

impl Iterator for IterOnes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.byte_idx < self.bytes.len() {
            if self.current != 0 {
                let tz = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1; // unset LSB
                return Some(self.base_bit_idx + tz);
            }

            self.byte_idx += 1;
            self.base_bit_idx += 8;
            self.current = logical_byte(self.bytes, self.byte_idx, self.len);
        }
        None
    }
}

impl FusedIterator for IterOnes<'_> {}

/// Iterator over the indices of unset bits, in ascending order.
///
/// Returned by [`FixedBitSet::iter_zeros()`].
#[derive(Clone, Copy)]
pub struct IterZeros<'bitset> {
    bytes: &'bitset [u8],
    len: usize,
    byte_idx: usize,
    current: u8,
    base_bit_idx: usize,
}

impl Iterator for IterZeros<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.byte_idx < self.bytes.len() {
            if self.current != 0 {
                let tz = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.base_bit_idx + tz);
            }

            self.byte_idx += 1;
            self.base_bit_idx += 8;
            self.current = logical_zeros(self.bytes, self.byte_idx, self.len);
        }
        None
    }
}

impl FusedIterator for IterZeros<'_> {}
