//! LZ4 block compression: one-shot API.
//!
//! | Rust function                  | C equivalent                    |
//! |--------------------------------|---------------------------------|
//! | [`compress_bound`]             | `LZ4_compressBound`             |
//! | [`compress_generic`]           | `LZ4_compress_generic`          |
//! | [`compress_fast_ext_state`]    | `LZ4_compress_fast_extState`    |
//! | [`compress_fast`]              | `LZ4_compress_fast`             |
//! | [`compress_default`]           | `LZ4_compress_default`          |
//!
//! The encoder uses a hash table to find back-references (matches) within a
//! sliding window of up to [`LZ4_DISTANCE_MAX`] bytes. Each compressed
//! sequence consists of a literal run followed by a match (offset + length);
//! bytes that cannot be matched are emitted as a final literal run.
//!
//! Every write into the destination is checked against its length, so a
//! too-small buffer yields [`CompressError::InsufficientDestinationBuffer`]
//! instead of a truncated stream. A destination of at least
//! [`compress_bound`] bytes can never fail.
//!
//! See the [LZ4 block format document] for the authoritative description
//! of the on-disk layout.
//!
//! [LZ4 block format document]: https://github.com/lz4/lz4/blob/dev/doc/lz4_Block_format.md

use tracing::{debug, trace};

use super::length::{write_variable_length, LENGTH_CONTINUES};
use super::types::{
    count, hash_position, read_le32, write_le16, HashTable, LASTLITERALS, LZ4_DISTANCE_MAX,
    LZ4_MIN_LENGTH, MFLIMIT, MINMATCH, ML_BITS, ML_MASK,
};
use crate::config::LZ4_SKIP_TRIGGER;

pub use super::types::LZ4_MAX_INPUT_SIZE;
pub use crate::config::{LZ4_ACCELERATION_DEFAULT, LZ4_ACCELERATION_MAX};

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by LZ4 block compression functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CompressError {
    /// The destination ran out of room before the block was complete.
    /// Whatever was written is not a valid block.
    #[error("insufficient destination buffer")]
    InsufficientDestinationBuffer,
    /// The input exceeds [`LZ4_MAX_INPUT_SIZE`].
    #[error("input exceeds the maximum block size of {LZ4_MAX_INPUT_SIZE} bytes")]
    InputTooLarge,
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility
// ─────────────────────────────────────────────────────────────────────────────

/// Worst-case compressed size for a given input size.
///
/// Returns 0 if `input_size` exceeds [`LZ4_MAX_INPUT_SIZE`].
/// Equivalent to `LZ4_compressBound` / `LZ4_COMPRESSBOUND`.
#[inline]
pub const fn compress_bound(input_size: usize) -> usize {
    if input_size > LZ4_MAX_INPUT_SIZE {
        0
    } else {
        input_size + (input_size / 255) + 16
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sequence writers
// ─────────────────────────────────────────────────────────────────────────────

/// Write a token carrying `literals.len()` in its high nibble, the literal
/// length continuation bytes, then the literals themselves.
///
/// Returns `(token_pos, next_op)`; the match nibble of the token is left zero.
#[inline(always)]
fn write_literals(
    dst: &mut [u8],
    op: usize,
    literals: &[u8],
) -> Result<(usize, usize), CompressError> {
    let lit_length = literals.len();
    let token_pos = op;
    let mut op = op;

    let token = dst
        .get_mut(op)
        .ok_or(CompressError::InsufficientDestinationBuffer)?;
    op += 1;

    if lit_length >= LENGTH_CONTINUES {
        *token = (LENGTH_CONTINUES << ML_BITS) as u8;
        op = write_variable_length(dst, op, lit_length - LENGTH_CONTINUES)
            .ok_or(CompressError::InsufficientDestinationBuffer)?;
    } else {
        *token = (lit_length << ML_BITS) as u8;
    }

    dst.get_mut(op..op + lit_length)
        .ok_or(CompressError::InsufficientDestinationBuffer)?
        .copy_from_slice(literals);
    Ok((token_pos, op + lit_length))
}

/// Write the offset field and the match length (nibble into `dst[token_pos]`,
/// continuation bytes after the offset).
#[inline(always)]
fn write_match(
    dst: &mut [u8],
    token_pos: usize,
    op: usize,
    offset: usize,
    match_code: usize,
) -> Result<usize, CompressError> {
    debug_assert!(offset >= 1 && offset <= LZ4_DISTANCE_MAX);
    let mut op = write_le16(dst, op, offset as u16)
        .ok_or(CompressError::InsufficientDestinationBuffer)?;

    if match_code >= ML_MASK as usize {
        dst[token_pos] |= ML_MASK as u8;
        op = write_variable_length(dst, op, match_code - ML_MASK as usize)
            .ok_or(CompressError::InsufficientDestinationBuffer)?;
    } else {
        dst[token_pos] |= match_code as u8;
    }
    Ok(op)
}

// ─────────────────────────────────────────────────────────────────────────────
// Core compression loop
// ─────────────────────────────────────────────────────────────────────────────

/// Inner core of LZ4 block compression.
///
/// `table` is reset before use, so positions left over from an earlier input
/// never reach the search. `acceleration` is clamped to
/// `LZ4_ACCELERATION_DEFAULT..=LZ4_ACCELERATION_MAX`, and inputs above
/// [`LZ4_MAX_INPUT_SIZE`] are refused with [`CompressError::InputTooLarge`].
///
/// Equivalent to `LZ4_compress_generic` for the no-dictionary, limited-output
/// case.
pub fn compress_generic(
    table: &mut HashTable,
    src: &[u8],
    dst: &mut [u8],
    acceleration: u32,
) -> Result<usize, CompressError> {
    let input_size = src.len();
    if input_size > LZ4_MAX_INPUT_SIZE {
        return Err(CompressError::InputTooLarge);
    }
    let acceleration = acceleration.clamp(
        LZ4_ACCELERATION_DEFAULT as u32,
        LZ4_ACCELERATION_MAX as u32,
    );
    table.reset();

    let mut anchor: usize = 0;
    let mut op: usize = 0;

    // Breaking out of 'compress at any point skips to the trailing-literals
    // epilogue, which encodes every remaining unmatched byte.
    'compress: {
        // Input too small to compress; emit everything as literals.
        if input_size < LZ4_MIN_LENGTH {
            break 'compress;
        }

        let mflimit_plus_one = input_size - MFLIMIT + 1;
        let match_limit = input_size - LASTLITERALS;

        // ── First byte ───────────────────────────────────────────────────────
        table.put(hash_position(src, 0), 0);
        let mut ip: usize = 1;
        let mut forward_h = hash_position(src, ip);

        // ── Main find-match / encode loop ────────────────────────────────────
        loop {
            // ── Find a match ─────────────────────────────────────────────────
            let mut match_pos;
            {
                let mut forward_ip = ip;
                let mut step: usize = 1;
                let mut search_match_nb: u32 = acceleration << LZ4_SKIP_TRIGGER;
                loop {
                    let h = forward_h;
                    ip = forward_ip;
                    forward_ip += step;
                    step = (search_match_nb >> LZ4_SKIP_TRIGGER) as usize;
                    search_match_nb = search_match_nb.wrapping_add(1);

                    if forward_ip > mflimit_plus_one {
                        break 'compress; // not enough room for a match + trailing literals
                    }

                    match_pos = table.get(h);
                    forward_h = hash_position(src, forward_ip);
                    table.put(h, ip);

                    // Reject if too far or the 4-byte prefix differs (hash collision).
                    if match_pos + LZ4_DISTANCE_MAX < ip
                        || read_le32(src, match_pos) != read_le32(src, ip)
                    {
                        continue;
                    }
                    break;
                }
            }

            // ── Catch up: extend the match backwards over pending literals ───
            while ip > anchor && match_pos > 0 && src[ip - 1] == src[match_pos - 1] {
                ip -= 1;
                match_pos -= 1;
            }

            // ── Encode literals ──────────────────────────────────────────────
            let (mut token_pos, next_op) = write_literals(dst, op, &src[anchor..ip])?;
            op = next_op;

            // ── Encode match, then opportunistically test the next position ──
            // If the bytes at the end of the current match also match an
            // earlier position, emit a zero-literal sequence straight away
            // instead of returning to the find-match scan.
            loop {
                let match_code = count(src, ip + MINMATCH, match_pos + MINMATCH, match_limit);
                op = write_match(dst, token_pos, op, ip - match_pos, match_code)?;
                ip += match_code + MINMATCH;
                anchor = ip;

                // Too close to the end for another match.
                if ip >= mflimit_plus_one {
                    break 'compress;
                }

                table.put(hash_position(src, ip - 2), ip - 2);

                let h = hash_position(src, ip);
                let candidate = table.get(h);
                table.put(h, ip);
                if candidate + LZ4_DISTANCE_MAX >= ip
                    && read_le32(src, candidate) == read_le32(src, ip)
                {
                    let token = dst
                        .get_mut(op)
                        .ok_or(CompressError::InsufficientDestinationBuffer)?;
                    *token = 0;
                    token_pos = op;
                    op += 1;
                    match_pos = candidate;
                    continue;
                }

                ip += 1;
                forward_h = hash_position(src, ip);
                break;
            }
        }
    }

    // ── Trailing-literals epilogue ───────────────────────────────────────────
    let (_, op) = write_literals(dst, op, &src[anchor..])?;
    Ok(op)
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot public API
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into `dst` using a caller-owned hash table.
///
/// The table is reset on entry, so nothing carries over between calls; this
/// only saves re-allocating the table when compressing many blocks.
///
/// Equivalent to `LZ4_compress_fast_extState`.
pub fn compress_fast_ext_state(
    state: &mut HashTable,
    src: &[u8],
    dst: &mut [u8],
    acceleration: i32,
) -> Result<usize, CompressError> {
    if src.len() > LZ4_MAX_INPUT_SIZE {
        debug!(src_len = src.len(), "lz4 block compression rejected oversized input");
        return Err(CompressError::InputTooLarge);
    }

    let acceleration = acceleration.clamp(LZ4_ACCELERATION_DEFAULT, LZ4_ACCELERATION_MAX) as u32;

    let result = compress_generic(state, src, dst, acceleration);
    match result {
        Ok(written) => trace!(
            src_len = src.len(),
            written,
            acceleration,
            "lz4 block compressed"
        ),
        Err(err) => debug!(
            src_len = src.len(),
            dst_len = dst.len(),
            bound = compress_bound(src.len()),
            %err,
            "lz4 block compression failed"
        ),
    }
    result
}

/// Compress `src` into `dst` with a user-supplied `acceleration` factor.
///
/// Larger factors probe fewer positions, trading ratio for speed. Values
/// below 1 behave as 1; values above [`LZ4_ACCELERATION_MAX`] are clamped.
/// The hash table lives on the stack for the duration of the call.
///
/// Equivalent to `LZ4_compress_fast`.
///
/// Returns the number of bytes written to `dst`.
pub fn compress_fast(src: &[u8], dst: &mut [u8], acceleration: i32) -> Result<usize, CompressError> {
    let mut table = HashTable::new();
    compress_fast_ext_state(&mut table, src, dst, acceleration)
}

/// Compress `src` into `dst` with the default acceleration factor (1).
///
/// This is the recommended entry point for one-shot LZ4 block compression.
///
/// Equivalent to `LZ4_compress_default`.
///
/// Returns the number of bytes written to `dst`.
pub fn compress_default(src: &[u8], dst: &mut [u8]) -> Result<usize, CompressError> {
    compress_fast(src, dst, LZ4_ACCELERATION_DEFAULT)
}

/// Compress `src` into a freshly allocated `Vec` sized by [`compress_bound`].
///
/// Returns an empty `Vec` only when `src` exceeds [`LZ4_MAX_INPUT_SIZE`];
/// every other input yields at least one byte.
pub fn compress_block_to_vec(src: &[u8]) -> Vec<u8> {
    let bound = compress_bound(src.len());
    if bound == 0 {
        return Vec::new();
    }
    let mut dst = vec![0u8; bound];
    match compress_default(src, &mut dst) {
        Ok(n) => {
            dst.truncate(n);
            dst
        }
        Err(_) => Vec::new(),
    }
}
