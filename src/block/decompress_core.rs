//! LZ4 block decompression core engine.
//!
//! Implements:
//!   - `copy_match`              overlap-safe back-reference copy
//!   - `decompress_generic`      the bounds-checked token walk used by the
//!                               safe and partial decoders
//!   - `decompress_fast_generic` the token walk driven by a known
//!                               decompressed size
//!
//! # Security boundary
//!
//! This module is the **security-critical decompression path**. Malformed or
//! truncated input must return `Err(DecompressError::MalformedSource)` and an
//! undersized destination `Err(DecompressError::InsufficientDestinationBuffer)`;
//! neither may panic. All buffer accesses that depend on stream content go
//! through checked `get` / `get_mut` lookups or are preceded by an explicit
//! range test.

use super::length::{read_variable_length, LENGTH_CONTINUES};
use super::types::{read_le16, MINMATCH, ML_BITS, ML_MASK};

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by LZ4 block decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecompressError {
    /// A literal run or match copy would write past the end of the destination.
    /// Retrying with a larger destination may succeed.
    #[error("insufficient destination buffer")]
    InsufficientDestinationBuffer,
    /// The compressed data violates the block format: zero offset, offset
    /// reaching before the start of the output, or a token, length or literal
    /// run truncated by the end of the source.
    #[error("malformed lz4 block")]
    MalformedSource,
}

#[inline(always)]
fn malformed<T>() -> Result<T, DecompressError> {
    Err(DecompressError::MalformedSource)
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlap-safe match copy
// ─────────────────────────────────────────────────────────────────────────────

/// Copy `length` bytes from `dst[op - offset..]` to `dst[op..]`.
///
/// When `offset < length` the source and destination overlap and the match
/// repeats the last `offset` bytes as a pattern. A single `copy_within` would
/// copy the *old* contents of the overlapping tail, so the copy is split into
/// chunks that never overlap: each chunk reads from the start of the match
/// and the readable span doubles after every step, because everything already
/// written extends the same period.
///
/// Preconditions (checked by every caller): `1 <= offset <= op` and
/// `op + length <= dst.len()`.
#[inline(always)]
pub fn copy_match(dst: &mut [u8], op: usize, offset: usize, length: usize) {
    debug_assert!(offset >= 1 && offset <= op && op + length <= dst.len());
    let start = op - offset;

    if offset >= length {
        dst.copy_within(start..start + length, op);
        return;
    }

    if offset == 1 {
        let b = dst[start];
        dst[op..op + length].fill(b);
        return;
    }

    // `copied` stays a multiple of `offset` until the final chunk, so
    // `op + copied - start` is always a whole number of periods.
    let mut copied = 0;
    while copied < length {
        let n = (offset + copied).min(length - copied);
        dst.copy_within(start..start + n, op + copied);
        copied += n;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared token pieces
// ─────────────────────────────────────────────────────────────────────────────

/// Decode the literal length carried by `token`, reading continuation bytes
/// from `src[ip..]` when the nibble is saturated.
#[inline(always)]
fn literal_length(token: u8, src: &[u8], ip: usize) -> Result<(usize, usize), DecompressError> {
    let lit_length = (token >> ML_BITS) as usize;
    if lit_length != LENGTH_CONTINUES {
        return Ok((lit_length, ip));
    }
    match read_variable_length(src, ip) {
        Some((extra, ip)) => match lit_length.checked_add(extra) {
            Some(total) => Ok((total, ip)),
            None => malformed(),
        },
        None => malformed(),
    }
}

/// Decode the match length carried by `token` (including `MINMATCH`),
/// reading continuation bytes from `src[ip..]` when the nibble is saturated.
#[inline(always)]
fn match_length(token: u8, src: &[u8], ip: usize) -> Result<(usize, usize), DecompressError> {
    let ml = (token & ML_MASK as u8) as usize;
    if ml != ML_MASK as usize {
        return Ok((ml + MINMATCH, ip));
    }
    match read_variable_length(src, ip) {
        Some((extra, ip)) => match (ml + MINMATCH).checked_add(extra) {
            Some(total) => Ok((total, ip)),
            None => malformed(),
        },
        None => malformed(),
    }
}

/// Read the 2-byte offset at `src[ip..]` and validate it against the number
/// of bytes already produced.
#[inline(always)]
fn match_offset(src: &[u8], ip: usize, op: usize) -> Result<(usize, usize), DecompressError> {
    if src.len() - ip < 2 {
        return malformed();
    }
    let offset = read_le16(src, ip) as usize;
    // Offset 0 is never valid; a larger offset than `op` points before the
    // start of the output.
    if offset == 0 || offset > op {
        return malformed();
    }
    Ok((offset, ip + 2))
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_generic: safe / partial token walk
// ─────────────────────────────────────────────────────────────────────────────

/// Core bounds-checked LZ4 block decompression loop.
///
/// | Parameter          | Meaning                                            |
/// |--------------------|----------------------------------------------------|
/// | `src`              | Compressed block                                   |
/// | `dst`              | Output buffer                                      |
/// | `output_size`      | Capacity to decode into, clamped to `dst.len()`    |
/// | `partial_decoding` | `false` = decode the whole block; `true` = stop as |
/// |                    | soon as `output_size` bytes have been produced     |
///
/// In full-block mode decoding ends when the source is exhausted right after
/// a literal run; any copy that would exceed `output_size` is
/// `InsufficientDestinationBuffer`. In partial mode the copy that crosses
/// `output_size` is clamped and decoding stops there.
///
/// Returns the number of bytes written to `dst`.
pub fn decompress_generic(
    src: &[u8],
    dst: &mut [u8],
    output_size: usize,
    partial_decoding: bool,
) -> Result<usize, DecompressError> {
    let output_size = output_size.min(dst.len());
    let dst = &mut dst[..output_size];

    if partial_decoding && output_size == 0 {
        return Ok(0);
    }

    let iend = src.len();
    let mut ip: usize = 0;
    let mut op: usize = 0;

    loop {
        // Every sequence starts with a token; a missing one means the block
        // was cut short (or ended on a match, which the format forbids).
        let token = match src.get(ip) {
            Some(&t) => t,
            None => return malformed(),
        };
        ip += 1;

        // ── Literals ──────────────────────────────────────────────────────────
        let (lit_length, next_ip) = literal_length(token, src, ip)?;
        ip = next_ip;

        if lit_length > iend - ip {
            return malformed();
        }
        let room = output_size - op;
        if lit_length > room {
            if !partial_decoding {
                return Err(DecompressError::InsufficientDestinationBuffer);
            }
            dst[op..].copy_from_slice(&src[ip..ip + room]);
            return Ok(output_size);
        }
        dst[op..op + lit_length].copy_from_slice(&src[ip..ip + lit_length]);
        ip += lit_length;
        op += lit_length;

        // Last sequence: literals only, and the source ends exactly here.
        if ip == iend {
            break;
        }
        if partial_decoding && op == output_size {
            break;
        }

        // ── Match ─────────────────────────────────────────────────────────────
        let (offset, next_ip) = match_offset(src, ip, op)?;
        ip = next_ip;
        let (length, next_ip) = match_length(token, src, ip)?;
        ip = next_ip;

        let room = output_size - op;
        if length > room {
            if !partial_decoding {
                return Err(DecompressError::InsufficientDestinationBuffer);
            }
            copy_match(dst, op, offset, room);
            return Ok(output_size);
        }
        copy_match(dst, op, offset, length);
        op += length;

        if partial_decoding && op == output_size {
            break;
        }
    }

    Ok(op)
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_fast_generic: size-driven token walk
// ─────────────────────────────────────────────────────────────────────────────

/// Token walk that stops once exactly `original_size` bytes are produced.
///
/// The destination is narrowed to `original_size` once up front; after that
/// no per-token capacity decision is made: a sequence that does not fit is a
/// structural error (`MalformedSource`), because the caller vouched for the
/// size. Back-references reaching before the start of the output are still
/// rejected. Source bytes after the sequence that completes the output are
/// not read.
///
/// Returns `original_size`.
pub fn decompress_fast_generic(
    src: &[u8],
    dst: &mut [u8],
    original_size: usize,
) -> Result<usize, DecompressError> {
    let Some(dst) = dst.get_mut(..original_size) else {
        return Err(DecompressError::InsufficientDestinationBuffer);
    };

    let mut ip: usize = 0;
    let mut op: usize = 0;

    loop {
        let token = match src.get(ip) {
            Some(&t) => t,
            None => return malformed(),
        };
        ip += 1;

        let (lit_length, next_ip) = literal_length(token, src, ip)?;
        ip = next_ip;

        let (Some(lits), Some(out)) = (
            src.get(ip..ip.saturating_add(lit_length)),
            dst.get_mut(op..op.saturating_add(lit_length)),
        ) else {
            return malformed();
        };
        out.copy_from_slice(lits);
        ip += lit_length;
        op += lit_length;

        if op == original_size {
            break;
        }

        let (offset, next_ip) = match_offset(src, ip, op)?;
        ip = next_ip;
        let (length, next_ip) = match_length(token, src, ip)?;
        ip = next_ip;

        // The block's last bytes are always literals, so a match may not
        // complete the output.
        if length >= original_size - op {
            return malformed();
        }
        copy_match(dst, op, offset, length);
        op += length;
    }

    Ok(original_size)
}
