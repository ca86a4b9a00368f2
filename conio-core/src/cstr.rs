//! Zero-terminated byte strings and raw memory blocks.
//!
//! The caller owns every buffer; nothing here allocates. A slice with no
//! zero byte is treated as terminated at its end. Capacity is the caller's
//! problem: writing past the end of `dst` panics on the slice index rather
//! than corrupting memory.

use std::fmt;

/// Bytes before the first zero.
pub fn length(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

/// The string's bytes, terminator excluded.
pub fn content(s: &[u8]) -> &[u8] {
    &s[..length(s)]
}

/// Byte at `i`, reading the implicit terminator past the end of the slice.
fn byte_at(s: &[u8], i: usize) -> u8 {
    s.get(i).copied().unwrap_or(0)
}

/// Copy `src` into `dst`, terminator included.
///
/// `dst` needs room for `length(src) + 1` bytes.
pub fn copy<'a>(dst: &'a mut [u8], src: &[u8]) -> &'a mut [u8] {
    let n = length(src);
    dst[..n].copy_from_slice(&src[..n]);
    dst[n] = 0;
    dst
}

/// Append `src` at `dst`'s terminator.
///
/// `dst` needs room for `length(dst) + length(src) + 1` bytes.
pub fn concatenate<'a>(dst: &'a mut [u8], src: &[u8]) -> &'a mut [u8] {
    let end = length(dst);
    copy(&mut dst[end..], src);
    dst
}

/// Difference of the first mismatching byte pair, or 0 if equal.
///
/// The terminator takes part in the comparison, so a proper prefix sorts
/// first.
pub fn compare(a: &[u8], b: &[u8]) -> i32 {
    let mut i = 0;
    loop {
        let (x, y) = (byte_at(a, i), byte_at(b, i));
        if x != y || x == 0 {
            return i32::from(x) - i32::from(y);
        }
        i += 1;
    }
}

/// Overwrite exactly `n` bytes with `value`.
pub fn fill(dst: &mut [u8], value: u8, n: usize) -> &mut [u8] {
    dst[..n].fill(value);
    dst
}

/// Copy exactly `n` bytes from `src` to `dst`.
///
/// The borrow rules keep `dst` and `src` disjoint; use
/// [`block_copy_within`] to move bytes inside one buffer.
pub fn block_copy<'a>(dst: &'a mut [u8], src: &[u8], n: usize) -> &'a mut [u8] {
    dst[..n].copy_from_slice(&src[..n]);
    dst
}

/// Copy `n` bytes from offset `src` to offset `dst` in the same buffer.
pub fn block_copy_within(buf: &mut [u8], src: usize, dst: usize, n: usize) -> &mut [u8] {
    buf.copy_within(src..src + n, dst);
    buf
}

/// `sprintf` without substitution: copies `template` verbatim.
///
/// Returns `length(template)`. `args` are accepted and ignored.
pub fn formatted_copy(dst: &mut [u8], template: &[u8], _args: &[&dyn fmt::Display]) -> usize {
    copy(dst, template);
    length(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;

    /// Terminated copy of `s` with any embedded zeros removed.
    fn cstring(s: &[u8]) -> Vec<u8> {
        let mut v: Vec<u8> = s.iter().copied().filter(|&b| b != 0).collect();
        v.push(0);
        v
    }

    #[test]
    fn test_length() {
        assert_eq!(length(b"hello\0"), 5);
        assert_eq!(length(b"\0"), 0);
        assert_eq!(length(b"ab\0cd\0"), 2);
        assert_eq!(length(b"open"), 4);
    }

    #[test]
    fn test_copy_includes_terminator() {
        let mut buf = [0xEEu8; 8];
        copy(&mut buf, b"abc\0");
        assert_eq!(&buf[..5], b"abc\0\xEE");
    }

    #[test]
    fn test_concatenate() {
        let mut buf = [0u8; 16];
        copy(&mut buf, b"BBC\0");
        concatenate(&mut buf, b" Micro\0");
        assert_eq!(content(&buf), b"BBC Micro");
    }

    #[test]
    fn test_compare_scenarios() {
        assert_eq!(compare(b"ab\0", b"ab\0"), 0);
        assert!(compare(b"ab\0", b"ac\0") < 0);
        assert!(compare(b"ac\0", b"ab\0") > 0);
        assert_eq!(compare(b"ab\0", b"ac\0"), -1);
    }

    #[test]
    fn test_compare_prefix() {
        assert!(compare(b"ab\0", b"abc\0") < 0);
        assert_eq!(compare(b"abc\0", b"ab\0"), i32::from(b'c'));
    }

    #[test]
    fn test_compare_stops_at_terminator() {
        assert_eq!(compare(b"ab\0x", b"ab\0y"), 0);
    }

    #[test]
    fn test_fill() {
        let mut buf = [0u8; 8];
        fill(&mut buf, 0x20, 5);
        assert_eq!(&buf[..5], &[0x20; 5]);
        assert_eq!(&buf[5..], &[0; 3]);
    }

    #[test]
    fn test_block_copy_exact_count() {
        let mut dst = [0u8; 6];
        block_copy(&mut dst, b"a\0cdef", 4);
        assert_eq!(&dst, b"a\0cd\0\0");
    }

    #[test]
    fn test_block_copy_within() {
        let mut buf = *b"abcdef";
        block_copy_within(&mut buf, 0, 2, 3);
        assert_eq!(&buf, b"ababcf");
    }

    #[test]
    fn test_formatted_copy_ignores_args() {
        let mut buf = [0u8; 16];
        let n = formatted_copy(&mut buf, b"Color %d\0", &[&3]);
        assert_eq!(n, 8);
        assert_eq!(content(&buf), b"Color %d");
    }

    #[test]
    #[should_panic]
    fn test_copy_without_capacity_panics() {
        let mut buf = [0u8; 3];
        copy(&mut buf, b"abc\0");
    }

    // Property-Based Tests

    #[quickcheck_macros::quickcheck]
    fn prop_length_counts_bytes_before_terminator(s: Vec<u8>) -> bool {
        let c = cstring(&s);
        length(&c) == c.len() - 1
    }

    #[quickcheck_macros::quickcheck]
    fn prop_copy_compares_equal(s: Vec<u8>) -> bool {
        let src = cstring(&s);
        let mut buf = vec![0xFFu8; src.len()];
        compare(copy(&mut buf, &src), &src) == 0
    }

    #[quickcheck_macros::quickcheck]
    fn prop_concatenate_adds_lengths(a: Vec<u8>, b: Vec<u8>) -> bool {
        let (a, b) = (cstring(&a), cstring(&b));
        let mut buf = vec![0u8; a.len() + b.len()];
        copy(&mut buf, &a);
        let before = length(&buf);
        length(concatenate(&mut buf, &b)) == before + length(&b)
    }

    #[quickcheck_macros::quickcheck]
    fn prop_compare_reflexive(a: Vec<u8>) -> bool {
        let a = cstring(&a);
        compare(&a, &a) == 0
    }

    #[quickcheck_macros::quickcheck]
    fn prop_compare_antisymmetric(a: Vec<u8>, b: Vec<u8>) -> TestResult {
        let (a, b) = (cstring(&a), cstring(&b));
        if a == b {
            return TestResult::discard();
        }
        let (ab, ba) = (compare(&a, &b), compare(&b, &a));
        TestResult::from_bool(ab != 0 && ab.signum() == -ba.signum())
    }

    #[quickcheck_macros::quickcheck]
    fn prop_fill_exact(value: u8, n: u8, slack: u8) -> bool {
        let (n, slack) = (n as usize, slack as usize);
        let mut buf = vec![!value; n + slack];
        fill(&mut buf, value, n);
        buf[..n].iter().all(|&b| b == value) && buf[n..].iter().all(|&b| b == !value)
    }
}
