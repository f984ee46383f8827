//! LZ4 block constants, little-endian memory helpers, match-length counting
//! and the match-finder hash table.
//!
//! Everything here is bounds-checked slice code. Callers in `compress` and
//! `decompress_core` uphold the positional preconditions noted on each helper,
//! which are also asserted in debug builds.

use crate::config::LZ4_MEMORY_USAGE;

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum match length encoded in an LZ4 block.
pub const MINMATCH: usize = 4;

/// Last N bytes of the input are always emitted as literals.
/// See doc/lz4_Block_format.md#parsing-restrictions.
pub const LASTLITERALS: usize = 5;

/// A match may not start within the last `MFLIMIT` bytes of the input.
pub const MFLIMIT: usize = 12;

/// Minimum input length that may produce any match at all.
pub const LZ4_MIN_LENGTH: usize = MFLIMIT + 1;

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;
pub const GB: usize = 1 << 30;

/// Maximum back-reference distance representable in the 16-bit offset field.
pub const LZ4_DISTANCE_MAX: usize = 65_535;

/// Largest input a single block may describe (2 113 929 216 bytes).
pub const LZ4_MAX_INPUT_SIZE: usize = 0x7E00_0000;

pub const ML_BITS: u32 = 4;
pub const ML_MASK: u32 = (1u32 << ML_BITS) - 1;
pub const RUN_BITS: u32 = 8 - ML_BITS;
pub const RUN_MASK: u32 = (1u32 << RUN_BITS) - 1;

// ─────────────────────────────────────────────────────────────────────────────
// Hash-table sizing (derived from LZ4_MEMORY_USAGE)
// ─────────────────────────────────────────────────────────────────────────────

/// Hash log: number of bits kept from each hash value.
pub const LZ4_HASHLOG: u32 = LZ4_MEMORY_USAGE - 2;
/// Hash-table size in bytes.
pub const LZ4_HASHTABLESIZE: usize = 1 << LZ4_MEMORY_USAGE;
/// Number of u32 entries in the hash table.
pub const LZ4_HASH_SIZE_U32: usize = 1 << LZ4_HASHLOG;

// ─────────────────────────────────────────────────────────────────────────────
// Match-finder hash table
// ─────────────────────────────────────────────────────────────────────────────

/// Single-slot-per-bucket table mapping a 4-byte prefix hash to the most
/// recent source position that produced it.
///
/// Positions are stored as `u32`, which covers every input up to
/// [`LZ4_MAX_INPUT_SIZE`]. A zeroed slot reads as position 0; candidates are
/// always verified against the source bytes, so a stale or empty slot only
/// costs a failed comparison.
#[derive(Clone)]
pub struct HashTable {
    slots: [u32; LZ4_HASH_SIZE_U32],
}

impl HashTable {
    /// Create a zeroed table.
    pub const fn new() -> Self {
        Self {
            slots: [0u32; LZ4_HASH_SIZE_U32],
        }
    }

    /// Forget every recorded position.
    pub fn reset(&mut self) {
        self.slots.fill(0);
    }

    #[inline(always)]
    pub(crate) fn get(&self, h: u32) -> usize {
        self.slots[h as usize] as usize
    }

    #[inline(always)]
    pub(crate) fn put(&mut self, h: u32, pos: usize) {
        debug_assert!(pos <= LZ4_MAX_INPUT_SIZE);
        self.slots[h as usize] = pos as u32;
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Little-endian reads and writes
// ─────────────────────────────────────────────────────────────────────────────

/// Read a little-endian `u16` at `pos`. `src[pos..pos + 2]` must be in bounds.
#[inline(always)]
pub fn read_le16(src: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([src[pos], src[pos + 1]])
}

/// Read a little-endian `u32` at `pos`. `src[pos..pos + 4]` must be in bounds.
#[inline(always)]
pub fn read_le32(src: &[u8], pos: usize) -> u32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(&src[pos..pos + 4]);
    u32::from_le_bytes(b)
}

/// Read a little-endian `u64` at `pos`. `src[pos..pos + 8]` must be in bounds.
#[inline(always)]
pub fn read_le64(src: &[u8], pos: usize) -> u64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&src[pos..pos + 8]);
    u64::from_le_bytes(b)
}

/// Write `value` as little-endian at `pos`, or return `None` if it does not fit.
#[inline(always)]
pub fn write_le16(dst: &mut [u8], pos: usize, value: u16) -> Option<usize> {
    let end = pos.checked_add(2)?;
    dst.get_mut(pos..end)?.copy_from_slice(&value.to_le_bytes());
    Some(end)
}

// ─────────────────────────────────────────────────────────────────────────────
// Match-length counting
// ─────────────────────────────────────────────────────────────────────────────

/// Count how many bytes match between `src[ip..]` and `src[mp..]`, stopping at
/// `limit`. Equivalent to `LZ4_count`.
///
/// Preconditions: `mp < ip <= limit <= src.len()`.
#[inline(always)]
pub fn count(src: &[u8], mut ip: usize, mut mp: usize, limit: usize) -> usize {
    debug_assert!(mp < ip && ip <= limit && limit <= src.len());
    let start = ip;
    const STEP: usize = core::mem::size_of::<u64>();

    // Word at a time. Reads are little-endian, so the lowest set bit of the
    // XOR marks the first differing byte on every host.
    while ip + STEP <= limit {
        let diff = read_le64(src, mp) ^ read_le64(src, ip);
        if diff != 0 {
            return ip - start + (diff.trailing_zeros() >> 3) as usize;
        }
        ip += STEP;
        mp += STEP;
    }

    while ip < limit && src[ip] == src[mp] {
        ip += 1;
        mp += 1;
    }
    ip - start
}

// ─────────────────────────────────────────────────────────────────────────────
// Hashing
// ─────────────────────────────────────────────────────────────────────────────

/// 4-byte Knuth-multiplicative hash, keeping the top [`LZ4_HASHLOG`] bits.
///
/// Equivalent to `LZ4_hash4`.
#[inline(always)]
pub fn hash4(sequence: u32) -> u32 {
    sequence.wrapping_mul(2_654_435_761u32) >> (32 - LZ4_HASHLOG)
}

/// Hash of the four bytes starting at `pos`.
#[inline(always)]
pub fn hash_position(src: &[u8], pos: usize) -> u32 {
    hash4(read_le32(src, pos))
}
