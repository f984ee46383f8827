//! Public LZ4 block decompression API.
//!
//!   - One-shot decompression: [`decompress_safe`], [`decompress_safe_partial`]
//!   - Trusted-size decompression: [`decompress_fast`]
//!   - Allocation helper: [`decompress_block_to_vec`]
//!
//! # Choosing a mode
//!
//! [`decompress_safe`] validates every literal run, offset and length against
//! both the source and the destination and is the right choice for any input
//! that did not come from a trusted encoder. [`decompress_fast`] is driven by
//! the caller's `original_size` instead of the destination capacity: it never
//! reads or writes out of bounds, but it cannot tell a corrupted stream that
//! happens to decode to `original_size` bytes from the real one, and it
//! ignores anything in `src` after the last sequence it needs. Picking the
//! mode according to how far the input is trusted is the caller's
//! responsibility.

use tracing::{debug, trace};

use super::decompress_core::{decompress_fast_generic, decompress_generic, DecompressError};

/// Decompress a full LZ4 block.
///
/// `dst.len()` is the capacity; the original size does not need to be known.
/// Equivalent to `LZ4_decompress_safe`.
///
/// Returns the number of bytes written into `dst`, which equals the size of
/// the data originally compressed.
pub fn decompress_safe(src: &[u8], dst: &mut [u8]) -> Result<usize, DecompressError> {
    let capacity = dst.len();
    let result = decompress_generic(src, dst, capacity, false);
    log_outcome("decompress_safe", src.len(), capacity, &result);
    result
}

/// Decompress up to `target_output_size` bytes from an LZ4 block.
///
/// Equivalent to `LZ4_decompress_safe_partial`.
///
/// At most `min(target_output_size, dst.len())` bytes are written; decoding
/// stops as soon as that many bytes have been produced, so only the prefix
/// of the block needed to reach the target has to be well formed.
pub fn decompress_safe_partial(
    src: &[u8],
    dst: &mut [u8],
    target_output_size: usize,
) -> Result<usize, DecompressError> {
    let output_size = target_output_size.min(dst.len());
    let result = decompress_generic(src, dst, output_size, true);
    log_outcome("decompress_safe_partial", src.len(), output_size, &result);
    result
}

/// Decompress a block whose decompressed size is known exactly.
///
/// Equivalent to `LZ4_decompress_fast`, except that the result is the number
/// of bytes written (always `original_size` on success).
///
/// Fails with `InsufficientDestinationBuffer` if `dst` is shorter than
/// `original_size`, and with `MalformedSource` if the stream references data
/// before the start of the output or does not produce exactly
/// `original_size` bytes. See the module docs for what this mode does *not*
/// protect against.
pub fn decompress_fast(
    src: &[u8],
    dst: &mut [u8],
    original_size: usize,
) -> Result<usize, DecompressError> {
    let result = decompress_fast_generic(src, dst, original_size);
    log_outcome("decompress_fast", src.len(), original_size, &result);
    result
}

/// Decompress `src` into a new `Vec` of exactly `original_size` bytes.
///
/// Returns an empty `Vec` if decoding fails or produces a different size.
pub fn decompress_block_to_vec(src: &[u8], original_size: usize) -> Vec<u8> {
    let mut dst = vec![0u8; original_size];
    match decompress_safe(src, &mut dst) {
        Ok(n) if n == original_size => dst,
        _ => Vec::new(),
    }
}

fn log_outcome(
    op: &'static str,
    src_len: usize,
    dst_len: usize,
    result: &Result<usize, DecompressError>,
) {
    match result {
        Ok(written) => trace!(op, src_len, dst_len, written, "lz4 block decompressed"),
        Err(err) => debug!(op, src_len, dst_len, %err, "lz4 block decompression failed"),
    }
}
