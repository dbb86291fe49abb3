//! Bloom filter over normalized strings.
//!
//! For a filter with `m` bits, `k` hash slots and `n` inserted items the
//! false positive rate is approximately `(1 - e^(-kn/m))^k`. There are no
//! false negatives: an item that was added always tests positive until the
//! filter is cleared.
//!
//! One 64-bit FNV-1a hash is computed per item; slot `i` mixes that base hash
//! with `i` through a 64-bit finalizer, so the `k` bit positions behave as
//! independent hashes without running `k` hash functions.

use crate::matching::normalize::{fold, is_indexable_token, tokens};
use bitvec::prelude::*;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Item count assumed when a filter is sized for zero expected items.
pub const DEFAULT_EXPECTED_ITEMS: usize = 1000;

/// Bits per expected item for a ~1% false positive rate.
const BITS_PER_ITEM: f64 = 9.6;

/// Hash slots for a ~1% false positive rate at [`BITS_PER_ITEM`].
const DEFAULT_HASH_COUNT: usize = 7;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;
const SLOT_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

type Bits = BitVec<u64, Lsb0>;

/// Thread-safe bloom filter over case-folded, trimmed strings.
pub struct BloomFilter {
    bits: RwLock<Bits>,
    size: usize,
    hash_count: usize,
}

impl BloomFilter {
    /// Create a zeroed filter with `size` bits and `hash_count` hash slots.
    ///
    /// Both values are clamped to at least 1.
    pub fn new(size: usize, hash_count: usize) -> Self {
        let size = size.max(1);
        Self {
            bits: RwLock::new(bitvec![u64, Lsb0; 0; size]),
            size,
            hash_count: hash_count.max(1),
        }
    }

    /// Create a filter sized for `expected_items` at roughly 1% false positives.
    ///
    /// Uses 9.6 bits per item and 7 hash slots. Zero expected items falls back
    /// to [`DEFAULT_EXPECTED_ITEMS`].
    pub fn for_expected_items(expected_items: usize) -> Self {
        let n = if expected_items == 0 {
            DEFAULT_EXPECTED_ITEMS
        } else {
            expected_items
        };
        let size = (n as f64 * BITS_PER_ITEM).round() as usize;
        Self::new(size, DEFAULT_HASH_COUNT)
    }

    /// Insert an item.
    pub fn add(&self, item: &str) {
        let item = fold(item);
        let mut bits = self.write();
        self.set_positions(&mut bits, &item);
    }

    /// Insert several items under a single lock acquisition.
    pub fn add_multiple<I, S>(&self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bits = self.write();
        for item in items {
            let item = fold(item.as_ref());
            self.set_positions(&mut bits, &item);
        }
    }

    /// Whether the item might have been inserted.
    ///
    /// `false` is definitive; `true` may be a false positive.
    pub fn may_contain(&self, item: &str) -> bool {
        let item = fold(item);
        let bits = self.read();
        self.check_positions(&bits, &item)
    }

    /// Whether any word of a query might have been inserted.
    ///
    /// A single-word query is checked as-is. For multi-word queries only
    /// words of at least two chars are checked, and one hit is enough.
    pub fn may_contain_any_word(&self, query: &str) -> bool {
        let query = fold(query);
        let words: Vec<&str> = tokens(&query).collect();
        let bits = self.read();

        if let [word] = words.as_slice() {
            return self.check_positions(&bits, word);
        }

        words
            .iter()
            .any(|word| is_indexable_token(word) && self.check_positions(&bits, word))
    }

    /// Reset every bit to zero in place.
    pub fn clear(&self) {
        self.write().fill(false);
    }

    /// Number of bits in the filter.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of hash slots per item.
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Number of bits currently set.
    pub fn set_bits(&self) -> usize {
        self.read().count_ones()
    }

    /// Theoretical false positive rate after `inserted` distinct items.
    pub fn estimated_false_positive_rate(&self, inserted: usize) -> f64 {
        let k = self.hash_count as f64;
        let exponent = -k * inserted as f64 / self.size as f64;
        (1.0 - exponent.exp()).powf(k)
    }

    fn set_positions(&self, bits: &mut Bits, item: &str) {
        for pos in self.positions(item) {
            bits.set(pos, true);
        }
    }

    fn check_positions(&self, bits: &Bits, item: &str) -> bool {
        self.positions(item).all(|pos| bits[pos])
    }

    fn positions(&self, item: &str) -> impl Iterator<Item = usize> {
        let base = fnv1a_64(item.as_bytes());
        let size = self.size as u64;
        (0..self.hash_count as u64)
            .map(move |slot| (fmix64(base ^ slot.wrapping_mul(SLOT_SEED)) % size) as usize)
    }

    fn read(&self) -> RwLockReadGuard<'_, Bits> {
        self.bits.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Bits> {
        self.bits.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloomFilter")
            .field("size", &self.size)
            .field("hash_count", &self.hash_count)
            .field("set_bits", &self.set_bits())
            .finish()
    }
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// MurmurHash3 64-bit finalizer.
fn fmix64(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    h
}
