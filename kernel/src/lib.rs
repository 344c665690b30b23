//! Element-wise integer addition kernel
//!
//! The loop carries no cross-iteration dependency, so a synthesis tool can
//! pipeline it with one addition per cycle, reading `a` and `b` through
//! independent ports and writing `c` through a third.

#![cfg_attr(not(test), no_std)]

/// `c[i] = a[i] + b[i]` for `0 <= i < size`, wrapping on overflow
///
/// A non-positive `size` writes nothing. Iteration also stops at the end of
/// the shortest slice.
pub fn add(a: &[i32], b: &[i32], c: &mut [i32], size: i32) {
    if size <= 0 {
        return;
    }
    for ((c, a), b) in c.iter_mut().zip(a).zip(b).take(size as usize) {
        *c = a.wrapping_add(*b);
    }
}

/// C-ABI entry point with the device argument order `(a, b, c, size)`
///
/// # Safety
/// `a` and `b` must be valid for `size` reads and `c` for `size` writes.
#[no_mangle]
pub unsafe extern "C" fn adder(a: *const i32, b: *const i32, c: *mut i32, size: i32) {
    if size <= 0 {
        return;
    }
    let n = size as usize;
    add(
        core::slice::from_raw_parts(a, n),
        core::slice::from_raw_parts(b, n),
        core::slice::from_raw_parts_mut(c, n),
        size,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_elementwise() {
        let a = [1, -2, 3, 1000];
        let b = [10, 20, -30, -1000];
        let mut c = [0; 4];
        add(&a, &b, &mut c, 4);
        assert_eq!(c, [11, 18, -27, 0]);
    }

    #[test]
    fn wraps_on_overflow() {
        let a = [i32::MAX, i32::MIN];
        let b = [1, -1];
        let mut c = [0; 2];
        add(&a, &b, &mut c, 2);
        assert_eq!(c, [i32::MIN, i32::MAX]);
    }

    #[test]
    fn non_positive_size_is_noop() {
        let a = [1, 2];
        let b = [3, 4];
        let mut c = [7, 7];
        add(&a, &b, &mut c, 0);
        assert_eq!(c, [7, 7]);
        add(&a, &b, &mut c, -3);
        assert_eq!(c, [7, 7]);
    }

    #[test]
    fn partial_size() {
        let a = [1, 2, 3];
        let b = [1, 2, 3];
        let mut c = [0; 3];
        add(&a, &b, &mut c, 2);
        assert_eq!(c, [2, 4, 0]);
    }

    #[test]
    fn size_beyond_slices_stops_at_shortest() {
        let a = [1, 2];
        let b = [1, 2, 3];
        let mut c = [0; 3];
        add(&a, &b, &mut c, 100);
        assert_eq!(c, [2, 4, 0]);
    }

    #[test]
    fn c_entry_point() {
        let a = vec![5, 6, 7];
        let b = vec![-5, 4, 3];
        let mut c = vec![0; 3];
        unsafe { adder(a.as_ptr(), b.as_ptr(), c.as_mut_ptr(), 3) };
        assert_eq!(c, vec![0, 10, 10]);
    }

    #[test]
    fn c_entry_point_ignores_null_when_empty() {
        unsafe { adder(core::ptr::null(), core::ptr::null(), core::ptr::null_mut(), 0) };
    }
}
