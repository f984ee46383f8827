#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The first byte picks an acceleration so the skip schedule gets covered too.
    let acceleration = data.first().map_or(1, |&b| i32::from(b) * 257 - 1000);

    let mut compressed = vec![0u8; lz4::compress_bound(data.len())];
    let n = lz4::compress_fast(data, &mut compressed, acceleration)
        .expect("a compress_bound-sized destination always fits");
    let compressed = &compressed[..n];

    let mut safe = vec![0u8; data.len()];
    assert_eq!(lz4::decompress_safe(compressed, &mut safe), Ok(data.len()));
    assert_eq!(safe, data, "safe decode mismatch ({n} compressed bytes)");

    let mut fast = vec![0u8; data.len()];
    assert_eq!(
        lz4::decompress_fast(compressed, &mut fast, data.len()),
        Ok(data.len())
    );
    assert_eq!(fast, data, "fast decode mismatch ({n} compressed bytes)");

    // One byte short must be refused, never truncated silently.
    if let Some(short) = data.len().checked_sub(1) {
        let mut tight = vec![0u8; short];
        assert!(lz4::decompress_safe(compressed, &mut tight).is_err());
    }
});
