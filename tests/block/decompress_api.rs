// Unit tests for the public LZ4 block decompression API
//
// Covers:
//   - decompress_safe: round trips, exact-size and short destinations,
//     corrupted offsets
//   - decompress_safe_partial: target clamping and prefix decoding
//   - decompress_fast: known-size decoding and rejection of bad references
//   - decompress_block_to_vec: convenience wrapper

use lz4::block::compress::{compress_bound, compress_default, compress_fast};
use lz4::block::decompress_api::{
    decompress_block_to_vec, decompress_fast, decompress_safe, decompress_safe_partial,
};
use lz4::block::decompress_core::DecompressError;
use rand::RngCore;

fn compress_vec(src: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress_default(src, &mut dst).expect("compression should succeed");
    dst.truncate(n);
    dst
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut data);
    data
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_safe
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn safe_round_trip_random_4096() {
    let data = random_bytes(4096);
    let compressed = compress_vec(&data);
    let mut out = vec![0u8; 4096];
    assert_eq!(decompress_safe(&compressed, &mut out), Ok(4096));
    assert_eq!(out, data);
}

#[test]
fn safe_round_trip_text() {
    let data = b"It was the best of times, it was the worst of times, it was the age of wisdom, \
                 it was the age of foolishness, it was the epoch of belief"
        .to_vec();
    let compressed = compress_vec(&data);
    assert!(compressed.len() < data.len());
    let mut out = vec![0u8; data.len()];
    assert_eq!(decompress_safe(&compressed, &mut out), Ok(data.len()));
    assert_eq!(out, data);
}

#[test]
fn safe_larger_destination_reports_original_size() {
    let data = b"abcabcabcabcabcabcabcabcabcabcabcabc".to_vec();
    let compressed = compress_vec(&data);
    let mut out = vec![0u8; 1000];
    assert_eq!(decompress_safe(&compressed, &mut out), Ok(data.len()));
    assert_eq!(&out[..data.len()], &data[..]);
}

#[test]
fn safe_empty_round_trip() {
    let compressed = compress_vec(&[]);
    assert_eq!(compressed, vec![0u8]);
    let mut out: [u8; 0] = [];
    assert_eq!(decompress_safe(&compressed, &mut out), Ok(0));
}

#[test]
fn safe_sixteen_a_round_trip() {
    let data = [b'a'; 16];
    let compressed = compress_vec(&data);
    assert!(compressed.len() < 16);
    let mut out = [0u8; 16];
    assert_eq!(decompress_safe(&compressed, &mut out), Ok(16));
    assert_eq!(out, [b'a'; 16]);
}

#[test]
fn safe_one_byte_destination_fails() {
    let data = random_bytes(4096);
    let compressed = compress_vec(&data);
    let mut out = [0u8; 1];
    assert_eq!(
        decompress_safe(&compressed, &mut out),
        Err(DecompressError::InsufficientDestinationBuffer)
    );
}

#[test]
fn safe_one_byte_short_destination_fails() {
    let data = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
    let compressed = compress_vec(&data);
    let mut out = vec![0u8; data.len() - 1];
    assert_eq!(
        decompress_safe(&compressed, &mut out),
        Err(DecompressError::InsufficientDestinationBuffer)
    );
}

#[test]
fn safe_offset_rewritten_before_output_start() {
    let data = [b'a'; 16];
    let mut compressed = compress_vec(&data);
    // Stream is [token, 'a', off_lo, off_hi, ...]. Point the match 2 bytes
    // back while only 1 byte has been produced.
    assert_eq!(&compressed[2..4], &[1, 0]);
    compressed[2] = 0x02;
    let mut out = [0u8; 16];
    assert_eq!(
        decompress_safe(&compressed, &mut out),
        Err(DecompressError::MalformedSource)
    );

    compressed[2] = 0xFF;
    compressed[3] = 0xFF;
    assert_eq!(
        decompress_safe(&compressed, &mut out),
        Err(DecompressError::MalformedSource)
    );
}

#[test]
fn safe_zero_offset_is_malformed() {
    let data = [b'a'; 16];
    let mut compressed = compress_vec(&data);
    compressed[2] = 0;
    compressed[3] = 0;
    let mut out = [0u8; 16];
    assert_eq!(
        decompress_safe(&compressed, &mut out),
        Err(DecompressError::MalformedSource)
    );
}

#[test]
fn safe_truncated_stream_is_rejected() {
    let data = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
    let compressed = compress_vec(&data);
    let mut out = vec![0u8; data.len()];
    // Cuts inside the first literal run and inside the final one.
    for cut in [1, 2, 10, compressed.len() - 1] {
        assert_eq!(
            decompress_safe(&compressed[..cut], &mut out),
            Err(DecompressError::MalformedSource),
            "cut at {cut}"
        );
    }
}

#[test]
fn safe_never_panics_on_garbage() {
    let mut out = vec![0u8; 4096];
    for seed in 0..200u32 {
        let garbage: Vec<u8> = (0..64u32)
            .map(|i| (i.wrapping_mul(2_654_435_761).wrapping_add(seed * 97) >> 7) as u8)
            .collect();
        let _ = decompress_safe(&garbage, &mut out);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_safe_partial
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn partial_prefix_matches_original() {
    let data = b"partial decoding returns a prefix of the original data; ".repeat(10);
    let compressed = compress_vec(&data);
    for target in [0usize, 1, 5, 17, 100, 333, data.len()] {
        let mut out = vec![0u8; data.len()];
        let n = decompress_safe_partial(&compressed, &mut out, target).unwrap();
        assert_eq!(n, target, "target {target}");
        assert_eq!(&out[..n], &data[..n]);
    }
}

#[test]
fn partial_target_clamped_to_destination() {
    let data = vec![b'z'; 200];
    let compressed = compress_vec(&data);
    let mut out = vec![0u8; 50];
    assert_eq!(decompress_safe_partial(&compressed, &mut out, 10_000), Ok(50));
    assert!(out.iter().all(|&b| b == b'z'));
}

#[test]
fn partial_target_beyond_block_returns_full_size() {
    let data = b"short block".to_vec();
    let compressed = compress_vec(&data);
    let mut out = vec![0u8; 64];
    assert_eq!(
        decompress_safe_partial(&compressed, &mut out, 64),
        Ok(data.len())
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_fast
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn fast_round_trip_random_4096() {
    let data = random_bytes(4096);
    let compressed = compress_vec(&data);
    let mut out = vec![0u8; 4096];
    assert_eq!(decompress_fast(&compressed, &mut out, 4096), Ok(4096));
    assert_eq!(out, data);
}

#[test]
fn fast_round_trip_compressible() {
    let data = b"0123456789".repeat(1000);
    let mut dst = vec![0u8; compress_bound(data.len())];
    let n = compress_fast(&data, &mut dst, 4).unwrap();
    let mut out = vec![0u8; data.len()];
    assert_eq!(decompress_fast(&dst[..n], &mut out, data.len()), Ok(data.len()));
    assert_eq!(out, data);
}

#[test]
fn fast_empty() {
    let compressed = compress_vec(&[]);
    let mut out: [u8; 0] = [];
    assert_eq!(decompress_fast(&compressed, &mut out, 0), Ok(0));
}

#[test]
fn fast_offset_before_output_start() {
    let data = [b'a'; 16];
    let mut compressed = compress_vec(&data);
    compressed[2] = 0x09;
    let mut out = [0u8; 16];
    assert_eq!(
        decompress_fast(&compressed, &mut out, 16),
        Err(DecompressError::MalformedSource)
    );
}

#[test]
fn fast_destination_too_small_for_original_size() {
    let data = [b'a'; 16];
    let compressed = compress_vec(&data);
    let mut out = [0u8; 8];
    assert_eq!(
        decompress_fast(&compressed, &mut out, 16),
        Err(DecompressError::InsufficientDestinationBuffer)
    );
}

#[test]
fn fast_never_panics_on_garbage() {
    let mut out = vec![0u8; 1024];
    for seed in 0..200u32 {
        let garbage: Vec<u8> = (0..48u32)
            .map(|i| (i.wrapping_mul(40_503).wrapping_add(seed * 131) >> 3) as u8)
            .collect();
        let _ = decompress_fast(&garbage, &mut out, (seed as usize * 5) % 1024);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_block_to_vec
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn block_to_vec_round_trip() {
    let data = b"vec vec vec vec vec vec vec vec".to_vec();
    let compressed = compress_vec(&data);
    assert_eq!(decompress_block_to_vec(&compressed, data.len()), data);
}

#[test]
fn block_to_vec_wrong_size_is_empty() {
    let data = b"vec vec vec vec vec vec vec vec".to_vec();
    let compressed = compress_vec(&data);
    assert!(decompress_block_to_vec(&compressed, data.len() + 1).is_empty());
    assert!(decompress_block_to_vec(&compressed, data.len() - 1).is_empty());
}
