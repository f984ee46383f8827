#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through every decoder. Errors are expected; panics and
    // writes past the destination are not.
    let large = data.len().saturating_mul(255).min(1 << 20);

    for capacity in [0usize, 16, 4096, data.len(), large] {
        let mut dst = vec![0u8; capacity];
        if let Ok(n) = lz4::decompress_safe(data, &mut dst) {
            assert!(n <= capacity);
        }
        if let Ok(n) = lz4::decompress_safe_partial(data, &mut dst, capacity / 3) {
            assert!(n <= capacity / 3);
        }
        if let Ok(n) = lz4::decompress_fast(data, &mut dst, capacity) {
            assert_eq!(n, capacity);
        }
    }
});
