//! LZ4 block compression and decompression.
//!
//! This module contains the LZ4 block-format engine: worst-case bound
//! calculation, the hash-table compressor, and the safe, partial and
//! trusted-size decoders.

pub mod compress;
pub mod decompress_api;
pub mod decompress_core;
pub mod length;
pub mod types;

// Re-export the most important public API items at the module level.
pub use compress::{
    compress_block_to_vec, compress_bound, compress_default, compress_fast,
    compress_fast_ext_state, CompressError, LZ4_ACCELERATION_DEFAULT, LZ4_ACCELERATION_MAX,
    LZ4_MAX_INPUT_SIZE,
};
pub use decompress_api::{
    decompress_block_to_vec, decompress_fast, decompress_safe, decompress_safe_partial,
};
pub use decompress_core::DecompressError;
pub use types::{HashTable, LZ4_DISTANCE_MAX};
