//! Base-255 continuation encoding for literal and match lengths.
//!
//! A token nibble holds lengths `0..=14` directly. The value `15` means the
//! length continues in the following bytes: each `255` byte adds 255 and
//! continues, the first byte below `255` adds its value and terminates.

/// Nibble value that signals "length continues in extra bytes".
pub const LENGTH_CONTINUES: usize = 15;

/// Number of continuation bytes needed to carry `rest`, the part of a length
/// left over after subtracting [`LENGTH_CONTINUES`].
#[inline]
pub const fn variable_length_size(rest: usize) -> usize {
    rest / 255 + 1
}

/// Write the continuation bytes for `rest` into `dst` starting at `op`.
///
/// Returns the position just past the last byte written, or `None` if
/// `dst` cannot hold the whole sequence. Nothing is written on failure.
#[inline]
pub fn write_variable_length(dst: &mut [u8], op: usize, rest: usize) -> Option<usize> {
    let n = variable_length_size(rest);
    let out = dst.get_mut(op..op.checked_add(n)?)?;
    let (full, last) = out.split_at_mut(n - 1);
    full.fill(255);
    last[0] = (rest % 255) as u8;
    Some(op + n)
}

/// Read a continuation sequence from `src` starting at `ip`.
///
/// Returns `(value, next_ip)`, or `None` when the sequence runs past the end
/// of `src` or the accumulated value overflows `usize`.
#[inline]
pub fn read_variable_length(src: &[u8], mut ip: usize) -> Option<(usize, usize)> {
    let mut length: usize = 0;
    loop {
        let s = *src.get(ip)?;
        ip += 1;
        length = length.checked_add(s as usize)?;
        if s != 255 {
            return Some((length, ip));
        }
    }
}
