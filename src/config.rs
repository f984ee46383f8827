// config.rs: Compile-time configuration constants for the block codec.
//
// These are the knobs lz4.h exposes as preprocessor tunables. They are fixed at
// build time; nothing here is read from the environment.

// Log2 of the match-finder hash-table size in bytes.
// 14 → 16 KiB → 4096 `u32` slots. Raising it finds more matches on large
// inputs at the cost of a bigger table to reset on every call.
pub const LZ4_MEMORY_USAGE: u32 = 14;

// Acceleration used by `compress_default`.
// An acceleration of 1 probes every position while no match is pending.
pub const LZ4_ACCELERATION_DEFAULT: i32 = 1;

// Upper clamp for caller-supplied acceleration factors.
pub const LZ4_ACCELERATION_MAX: i32 = 65_537;

// Number of consecutive misses (as a power of two) before the search step grows.
pub const LZ4_SKIP_TRIGGER: u32 = 6;
