//! E2E Test Suite: Block One-Shot API
//!
//! Drives the crate-root entry points the way an application would:
//! - compress_bound
//! - compress_default / compress_fast / compress_fast_ext_state
//! - decompress_safe / decompress_safe_partial / decompress_fast
//! - compress_block_to_vec / decompress_block_to_vec
//!
//! Each test produces real blocks and checks that every decoder recovers the
//! original bytes.

extern crate lz4;

use lz4::{
    compress_block_to_vec, compress_bound, compress_default, compress_fast,
    compress_fast_ext_state, decompress_block_to_vec, decompress_fast, decompress_safe,
    decompress_safe_partial, HashTable, LZ4_ACCELERATION_DEFAULT, LZ4_ACCELERATION_MAX,
    LZ4_MAX_INPUT_SIZE,
};

fn decode_both(compressed: &[u8], original: &[u8]) {
    let mut safe = vec![0u8; original.len()];
    let n = decompress_safe(compressed, &mut safe).expect("safe decompression should succeed");
    assert_eq!(n, original.len());
    assert_eq!(safe, original);

    let mut fast = vec![0u8; original.len()];
    let n = decompress_fast(compressed, &mut fast, original.len())
        .expect("fast decompression should succeed");
    assert_eq!(n, original.len());
    assert_eq!(fast, original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: compress_default roundtrip, typical data
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_default_roundtrip_typical_data() {
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(20);

    let mut compressed = vec![0u8; compress_bound(original.len())];
    let compressed_size =
        compress_default(&original, &mut compressed).expect("compression should succeed");

    assert!(
        compressed_size < original.len(),
        "compressed size {} should be less than original {}",
        compressed_size,
        original.len()
    );
    decode_both(&compressed[..compressed_size], &original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: compress_default roundtrip, incompressible data
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_default_roundtrip_incompressible_data() {
    // xorshift noise: no 4-byte repeats worth matching
    let mut x: u32 = 0x9E37_79B9;
    let original: Vec<u8> = (0..10_000)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x >> 24) as u8
        })
        .collect();

    let bound = compress_bound(original.len());
    let mut compressed = vec![0u8; bound];
    let compressed_size = compress_default(&original, &mut compressed).unwrap();
    assert!(compressed_size <= bound);
    decode_both(&compressed[..compressed_size], &original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: compress_fast over the acceleration range
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_fast_acceleration_range() {
    let original: Vec<u8> = (0..32_768u32).map(|i| ((i / 7) % 97) as u8).collect();

    for accel in [
        LZ4_ACCELERATION_DEFAULT,
        2,
        8,
        64,
        1024,
        LZ4_ACCELERATION_MAX,
    ] {
        let mut compressed = vec![0u8; compress_bound(original.len())];
        let n = compress_fast(&original, &mut compressed, accel).unwrap();
        assert!(n <= compress_bound(original.len()), "accel {accel}");
        decode_both(&compressed[..n], &original);
    }
}

#[test]
fn test_compress_fast_out_of_range_acceleration_is_clamped() {
    let original = b"clamp clamp clamp clamp clamp clamp clamp".to_vec();
    let mut reference = vec![0u8; compress_bound(original.len())];
    let ref_size = compress_default(&original, &mut reference).unwrap();

    for accel in [0, -1, i32::MIN] {
        let mut compressed = vec![0u8; compress_bound(original.len())];
        let n = compress_fast(&original, &mut compressed, accel).unwrap();
        assert_eq!(&compressed[..n], &reference[..ref_size], "accel {accel}");
    }

    let mut max = vec![0u8; compress_bound(original.len())];
    let mut over = max.clone();
    let n_max = compress_fast(&original, &mut max, LZ4_ACCELERATION_MAX).unwrap();
    let n_over = compress_fast(&original, &mut over, i32::MAX).unwrap();
    assert_eq!(max[..n_max], over[..n_over]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: compress_bound
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_compress_bound_values() {
    assert_eq!(compress_bound(0), 16);
    assert_eq!(compress_bound(255), 255 + 1 + 16);
    assert_eq!(compress_bound(65_536), 65_536 + 257 + 16);
    assert_eq!(compress_bound(LZ4_MAX_INPUT_SIZE + 1), 0);
    assert!(compress_bound(LZ4_MAX_INPUT_SIZE) > LZ4_MAX_INPUT_SIZE);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: decompress_safe_partial
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_decompress_safe_partial_prefixes() {
    let original = b"Partial decoding stops as soon as the target is reached. ".repeat(40);
    let mut compressed = vec![0u8; compress_bound(original.len())];
    let n = compress_default(&original, &mut compressed).unwrap();

    for target in [1usize, 64, 1000, original.len() - 1, original.len()] {
        let mut out = vec![0u8; original.len()];
        let got = decompress_safe_partial(&compressed[..n], &mut out, target).unwrap();
        assert_eq!(got, target);
        assert_eq!(&out[..got], &original[..got]);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: caller-owned state reused across many blocks
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_ext_state_reused_across_blocks() {
    let mut state = Box::new(HashTable::new());
    for i in 0..32usize {
        let original = format!("block number {i} ").repeat(10 + i * 3).into_bytes();
        let mut compressed = vec![0u8; compress_bound(original.len())];
        let n = compress_fast_ext_state(&mut state, &original, &mut compressed, 1).unwrap();

        let mut fresh = vec![0u8; compress_bound(original.len())];
        let m = compress_default(&original, &mut fresh).unwrap();
        assert_eq!(compressed[..n], fresh[..m]);
        decode_both(&compressed[..n], &original);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: Vec convenience wrappers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_vec_wrappers_roundtrip() {
    let original = vec![0xA5u8; 200_000];
    let compressed = compress_block_to_vec(&original);
    assert!(!compressed.is_empty());
    assert!(compressed.len() < 1_000);
    assert_eq!(decompress_block_to_vec(&compressed, original.len()), original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: block sizes around the 64 KiB window
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_around_window_size() {
    let pattern = b"window-edge pattern 0123456789";
    for len in [65_534usize, 65_535, 65_536, 65_537, 200_000] {
        let original: Vec<u8> = pattern.iter().copied().cycle().take(len).collect();
        let compressed = compress_block_to_vec(&original);
        decode_both(&compressed, &original);
    }
}

#[test]
fn test_roundtrip_far_repeat_beyond_window() {
    // The second copy of the chunk sits 70 000 bytes after the first, which
    // is out of reach for a back-reference.
    let mut x: u32 = 12345;
    let chunk: Vec<u8> = (0..1024)
        .map(|_| {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12345);
            (x >> 16) as u8
        })
        .collect();
    let mut original = chunk.clone();
    original.extend(std::iter::repeat(0u8).take(70_000 - chunk.len()));
    original.extend_from_slice(&chunk);

    let compressed = compress_block_to_vec(&original);
    decode_both(&compressed, &original);
}
