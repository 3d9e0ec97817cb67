use std::fmt;

use bitvec::array::BitArray;
use bitvec::order::Lsb0;

/// A set of bytes with one bit per value in `0..=255`.
///
/// Character classes are always materialized as a `ByteSet`, ranges and
/// negations included, so membership is a single bit test while matching.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ByteSet {
    bits: BitArray<[u64; 4], Lsb0>,
}

impl ByteSet {
    pub fn empty() -> Self {
        ByteSet {
            bits: BitArray::new([0; 4]),
        }
    }

    pub fn insert(&mut self, byte: u8) {
        self.bits.set(byte as usize, true);
    }

    pub fn insert_range(&mut self, start: u8, end: u8) {
        for byte in start..=end {
            self.insert(byte);
        }
    }

    pub fn union(&mut self, other: &ByteSet) {
        for byte in other.bits.iter_ones() {
            self.bits.set(byte, true);
        }
    }

    /// Complements the set over the whole byte alphabet.
    pub fn negate(&mut self) {
        for byte in 0..256 {
            let value = !self.bits[byte];
            self.bits.set(byte, value);
        }
    }

    #[inline]
    pub fn contains(&self, byte: u8) -> bool {
        self.bits[byte as usize]
    }

    /// Returns the set denoted by `\d`, `\D`, `\w` or `\W`.
    pub fn escape_class(byte: u8) -> Option<ByteSet> {
        let mut set = ByteSet::empty();
        match byte {
            b'd' | b'D' => {
                set.insert_range(b'0', b'9');
            }
            b'w' | b'W' => {
                set.insert_range(b'a', b'z');
                set.insert_range(b'A', b'Z');
                set.insert_range(b'0', b'9');
                set.insert(b'_');
            }
            _ => return None,
        }
        if byte.is_ascii_uppercase() {
            set.negate();
        }
        Some(set)
    }
}

impl fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for byte in self.bits.iter_ones() {
            write!(f, "{}", (byte as u8).escape_ascii())?;
        }
        write!(f, "]")
    }
}
