//! E2E Test Suite: Error Handling & Edge Cases
//!
//! Verifies that every failure surfaces as a typed error instead of a panic
//! or an out-of-bounds write.
//!
//! Coverage:
//! - Destination too small for compression or decompression
//! - Corrupt, truncated and hostile blocks
//! - Acceleration values outside the accepted range
//! - Partial decompression edge cases
//! - Error values: Display text and std::error::Error integration

use lz4::{
    compress_bound, compress_default, compress_fast, decompress_fast, decompress_safe,
    decompress_safe_partial, CompressError, DecompressError, LZ4_MAX_INPUT_SIZE,
};

fn compressed(src: &[u8]) -> Vec<u8> {
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress_default(src, &mut dst).expect("compression should succeed");
    dst.truncate(n);
    dst
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 1: decompress_safe with destination too small
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_decompress_dst_too_small() {
    let src = b"Hello, this is a test message for LZ4 compression!";
    let block = compressed(src);

    let mut dst = vec![0u8; 10];
    match decompress_safe(&block, &mut dst) {
        Err(DecompressError::InsufficientDestinationBuffer) => {}
        other => panic!("Expected Err(InsufficientDestinationBuffer), got {:?}", other),
    }
}

#[test]
fn test_decompress_fast_dst_too_small() {
    let src = b"Hello, this is a test message for LZ4 compression!";
    let block = compressed(src);

    let mut dst = vec![0u8; 10];
    assert_eq!(
        decompress_fast(&block, &mut dst, src.len()),
        Err(DecompressError::InsufficientDestinationBuffer)
    );
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 2: decompress_safe on corrupt data
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_decompress_corrupt_data() {
    // Token asks for 15+255+... literals that are not there.
    let garbage = [0xF0u8, 0xFF, 0xFF, 0xFF, 0x10];
    let mut dst = vec![0u8; 1024];
    assert_eq!(
        decompress_safe(&garbage, &mut dst),
        Err(DecompressError::MalformedSource)
    );
}

#[test]
fn test_decompress_empty_input() {
    let mut dst = vec![0u8; 16];
    assert_eq!(decompress_safe(&[], &mut dst), Err(DecompressError::MalformedSource));
    assert_eq!(decompress_fast(&[], &mut dst, 4), Err(DecompressError::MalformedSource));
}

#[test]
fn test_decompress_block_ending_on_match() {
    // "abcd" then a match of 4 at offset 4 with no closing literal sequence.
    let block = [0x40u8, b'a', b'b', b'c', b'd', 0x04, 0x00];
    let mut dst = vec![0u8; 64];
    assert_eq!(
        decompress_safe(&block, &mut dst),
        Err(DecompressError::MalformedSource)
    );
    assert_eq!(
        decompress_fast(&block, &mut dst, 8),
        Err(DecompressError::MalformedSource)
    );
}

#[test]
fn test_decompress_truncated_offset() {
    let block = [0x40u8, b'a', b'b', b'c', b'd', 0x04];
    let mut dst = vec![0u8; 64];
    assert_eq!(
        decompress_safe(&block, &mut dst),
        Err(DecompressError::MalformedSource)
    );
}

#[test]
fn test_decompress_truncation_never_yields_full_output() {
    let src = b"Truncation anywhere must be caught, never read past the end. ".repeat(8);
    let block = compressed(&src);
    let mut dst = vec![0u8; src.len()];
    for cut in 0..block.len() {
        // A cut that lands right after a literal run is itself a valid,
        // shorter block; anything else must be rejected.
        match decompress_safe(&block[..cut], &mut dst) {
            Ok(n) => {
                assert!(n < src.len(), "prefix of {cut} bytes decoded everything");
                assert_eq!(&dst[..n], &src[..n]);
            }
            Err(e) => assert_eq!(e, DecompressError::MalformedSource, "cut {cut}"),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 3: compress_default with undersized destination
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_compress_dst_empty() {
    let src = b"Some data to compress";
    let mut dst: Vec<u8> = Vec::new();
    assert_eq!(
        compress_default(src, &mut dst),
        Err(CompressError::InsufficientDestinationBuffer)
    );
}

#[test]
fn test_compress_dst_too_small() {
    let src = b"This is a longer message that will definitely need more than 5 bytes";
    let mut dst = vec![0xEEu8; 5];
    assert_eq!(
        compress_default(src, &mut dst),
        Err(CompressError::InsufficientDestinationBuffer)
    );
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 4: compress_fast with acceleration outside the accepted range
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_compress_fast_zero_acceleration() {
    let src = b"Test data for zero acceleration, zero acceleration, zero acceleration";
    let mut dst = vec![0u8; compress_bound(src.len())];
    let n = compress_fast(src, &mut dst, 0).expect("acceleration 0 behaves as 1");

    let mut out = vec![0u8; src.len()];
    assert_eq!(decompress_safe(&dst[..n], &mut out), Ok(src.len()));
    assert_eq!(&out[..], &src[..]);
}

#[test]
fn test_compress_fast_negative_acceleration() {
    let src = b"Test data for negative acceleration";
    let mut dst = vec![0u8; compress_bound(src.len())];
    assert!(compress_fast(src, &mut dst, -100).is_ok());
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 5: LZ4_MAX_INPUT_SIZE
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_max_input_size_constant() {
    assert_eq!(LZ4_MAX_INPUT_SIZE, 0x7E00_0000);
    assert_eq!(LZ4_MAX_INPUT_SIZE, 2_113_929_216);
}

#[test]
fn test_compress_bound_rejects_oversized_input() {
    // Allocating 2 GiB in a test is not practical; the bound reports the limit.
    assert_eq!(compress_bound(LZ4_MAX_INPUT_SIZE + 1), 0);
    assert_eq!(compress_bound(usize::MAX), 0);
    assert!(compress_bound(LZ4_MAX_INPUT_SIZE) > 0);
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 6: decompress_safe_partial edge cases
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_decompress_partial_target_exceeds_dst() {
    let src = b"Partial decompression test data";
    let block = compressed(src);

    let mut dst = vec![0u8; 10];
    assert_eq!(decompress_safe_partial(&block, &mut dst, 20), Ok(10));
    assert_eq!(&dst[..], &src[..10]);
}

#[test]
fn test_decompress_partial_zero_target() {
    let block = compressed(b"Test");
    let mut dst = vec![0u8; 100];
    assert_eq!(decompress_safe_partial(&block, &mut dst, 0), Ok(0));
}

#[test]
fn test_decompress_partial_target_larger_than_original() {
    let src = b"Short";
    let block = compressed(src);
    let mut dst = vec![0u8; 1024];
    assert_eq!(decompress_safe_partial(&block, &mut dst, 1000), Ok(src.len()));
    assert_eq!(&dst[..src.len()], src);
}

#[test]
fn test_decompress_partial_still_rejects_bad_offset() {
    // The match in the first sequence points 9 bytes back after 1 literal.
    let block = [0x16u8, b'a', 0x09, 0x00, 0x50, b'a', b'a', b'a', b'a', b'a'];
    let mut dst = vec![0u8; 16];
    assert_eq!(
        decompress_safe_partial(&block, &mut dst, 16),
        Err(DecompressError::MalformedSource)
    );
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 7: Additional edge cases
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_compress_empty_input() {
    let mut dst = vec![0u8; 100];
    assert_eq!(compress_default(&[], &mut dst), Ok(1));
    assert_eq!(dst[0], 0x00);
}

#[test]
fn test_roundtrip_single_byte() {
    let src = b"X";
    let block = compressed(src);
    assert_eq!(block, vec![0x10, b'X']);

    let mut decompressed = vec![0u8; 100];
    let size = decompress_safe(&block, &mut decompressed).unwrap();
    assert_eq!(size, 1);
    assert_eq!(&decompressed[..size], src);
}

#[test]
fn test_compress_large_repeated_data() {
    let src = vec![b'A'; 10_000];
    let block = compressed(&src);
    assert!(block.len() < 100, "repeated data should compress well");

    let mut decompressed = vec![0u8; 10_000];
    assert_eq!(decompress_safe(&block, &mut decompressed), Ok(src.len()));
    assert_eq!(decompressed, src);
}

// ═════════════════════════════════════════════════════════════════════════════
// Test 8: Error values
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_errors_are_std_errors() {
    fn as_dyn(e: impl std::error::Error + Send + Sync + 'static) -> Box<dyn std::error::Error> {
        Box::new(e)
    }
    let c = as_dyn(CompressError::InsufficientDestinationBuffer);
    let d = as_dyn(DecompressError::MalformedSource);
    assert!(!c.to_string().is_empty());
    assert!(!d.to_string().is_empty());
    assert_ne!(
        DecompressError::MalformedSource.to_string(),
        DecompressError::InsufficientDestinationBuffer.to_string()
    );
}
