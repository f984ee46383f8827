// lz4-block: LZ4 block format codec
//
// The codec works on caller-provided slices only: no framing, no checksums,
// no state carried between calls. Size destinations for compression with
// `compress_bound`; decompression needs either the destination capacity
// (`decompress_safe`) or the exact original size (`decompress_fast`) from
// whatever container the caller uses.

pub mod block;
pub mod config;

// ── Version constants (block format as of lz4 1.10.0) ────────────────────────
pub const LZ4_VERSION_MAJOR: u32 = 1;
pub const LZ4_VERSION_MINOR: u32 = 10;
pub const LZ4_VERSION_RELEASE: u32 = 0;
pub const LZ4_VERSION_NUMBER: u32 =
    LZ4_VERSION_MAJOR * 100 * 100 + LZ4_VERSION_MINOR * 100 + LZ4_VERSION_RELEASE;
pub const LZ4_VERSION_STRING: &str = "1.10.0";

/// Returns the runtime version number (equivalent to LZ4_versionNumber()).
pub fn version_number() -> u32 {
    LZ4_VERSION_NUMBER
}

/// Returns the runtime version string (equivalent to LZ4_versionString()).
pub fn version_string() -> &'static str {
    LZ4_VERSION_STRING
}

/// Returns the size in bytes of the match-finder state (LZ4_sizeofState()).
pub fn size_of_state() -> usize {
    core::mem::size_of::<block::HashTable>()
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use block::{
    compress_block_to_vec, compress_bound, compress_default, compress_fast,
    compress_fast_ext_state, decompress_block_to_vec, decompress_fast, decompress_safe,
    decompress_safe_partial, CompressError, DecompressError, HashTable, LZ4_ACCELERATION_DEFAULT,
    LZ4_ACCELERATION_MAX, LZ4_DISTANCE_MAX, LZ4_MAX_INPUT_SIZE,
};
